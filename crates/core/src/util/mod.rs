pub mod range;

/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs how long it took, and evaluates to the value of the
/// expression.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

/// Unbounded linear interpolation. `progress` of 0 gives `a`, 1 gives `b`.
pub fn lerp(a: f64, b: f64, progress: f64) -> f64 {
    (a * (1.0 - progress)) + (b * progress)
}

/// Linear interpolation between two integers, with `progress` clamped to
/// `[0, 1]` and the result rounded to the nearest integer.
pub fn lerp_int(a: i32, b: i32, progress: f64) -> i32 {
    let progress = progress.clamp(0.0, 1.0);
    (a as f64 + (progress * (b as f64 - a as f64))).round() as i32
}
