use crate::world::{
    generate::{noise::CellNoiseFn, Generate, WorldBuilder},
    World,
};

/// Generate moisture with a noise function, then dry out high ground. Must
/// run after elevation.
#[derive(Debug)]
pub struct MoistureGenerator;

impl MoistureGenerator {
    /// Fraction of moisture lost on the highest possible cell. Lower cells
    /// lose proportionally less.
    const ELEVATION_DRYING: f32 = 0.5;
}

impl Generate for MoistureGenerator {
    fn generate(&self, world: &mut WorldBuilder) -> anyhow::Result<()> {
        let noise_fn = CellNoiseFn::new(
            &mut world.rng,
            &world.config.moisture,
            World::MOISTURE_RANGE,
        );

        let moistures: Vec<_> = world
            .map
            .iter()
            .map(|(coord, cell)| {
                let (x, y) = world.map.unit_position(coord);
                let elevation = World::ELEVATION_RANGE
                    .value(cell.elevation)
                    .normalize()
                    .inner();
                let drying = 1.0 - Self::ELEVATION_DRYING * elevation;
                let moisture = noise_fn
                    .get(x, y)
                    .apply(|value| value * drying)
                    .clamp()
                    .inner();
                (coord, moisture)
            })
            .collect();

        for (coord, moisture) in moistures {
            world.map.cell_mut(coord).moisture = moisture;
        }
        Ok(())
    }
}
