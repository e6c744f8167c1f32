use thiserror::Error;

/// Errors that can occur while building or accessing map structures. World
/// generation wraps these in [anyhow::Error], along with config validation
/// errors.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum GeoMapError {
    /// A map dimension (chunk size, chunk count, width, height) was zero, or
    /// too large for cell coordinates to address
    #[error(
        "invalid dimension `{name}` = {value}; \
        must be between 1 and 2147483647"
    )]
    InvalidDimensions { name: &'static str, value: u32 },

    /// Chunk maps need at least one byte per cell. Zero-sized cell types
    /// would make every chunk buffer empty.
    #[error("chunk map cell type is zero-sized")]
    ZeroSizedCell,

    /// A generation or noise parameter was outside its usable domain
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },

    /// Direct access to a value map outside its bounds. Value maps do not
    /// wrap.
    #[error(
        "coordinate ({x}, {y}) is outside value map of size {width}x{height}"
    )]
    OutOfRange {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    /// Raw index access outside of a value map's buffer
    #[error("index {index} is outside value map of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Spatial storage only has one link per item, allocated up front
    #[error(
        "item index {item_index} exceeds spatial storage capacity of \
        {max_item_count}"
    )]
    OutOfCapacity {
        item_index: usize,
        max_item_count: usize,
    },

    /// An item can only be stored at one coordinate at a time
    #[error("item {item_index} is already in spatial storage")]
    ItemAlreadyStored { item_index: usize },

    /// The item isn't linked into the slot that the coordinate hashes to
    #[error("item {item_index} is not stored at ({x}, {y})")]
    ItemNotFound { item_index: usize, x: i32, y: i32 },
}

pub type GeoMapResult<T> = Result<T, GeoMapError>;
