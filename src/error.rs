use thiserror::Error;

/// Errors raised when a map or configuration cannot produce a sane view.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The map has no rows.
    #[error("map has no rows")]
    EmptyMap,
    /// The first row of the map has no cells.
    #[error("map rows have no columns")]
    EmptyRow,
    /// A row differs in length from the first row.
    #[error("map row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// Tile size is zero, negative or not finite.
    #[error("tile size must be a positive finite number, got {0}")]
    InvalidTileSize(f32),
    /// Field of view is outside (0, 180) degrees.
    #[error("field of view must lie strictly between 0 and 180 degrees, got {0}")]
    InvalidFov(f32),
    /// Screen width or height is zero.
    #[error("screen dimensions must be non-zero, got {width}x{height}")]
    InvalidScreen {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// Strip width is zero or wider than the screen.
    #[error("strip width {strip_width} must be between 1 and the screen width {screen_width}")]
    InvalidStripWidth {
        /// Requested strip width.
        strip_width: u32,
        /// Screen width it must fit into.
        screen_width: u32,
    },
    /// A speed is negative or not finite.
    #[error("{name} must be a finite, non-negative number, got {value}")]
    InvalidSpeed {
        /// Which speed field was rejected.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// Minimap scale is outside (0, 1].
    #[error("minimap scale must lie in (0, 1], got {0}")]
    InvalidMinimapScale(f32),
    /// The viewer would start inside a wall or outside the map.
    #[error("spawn point ({x}, {y}) is not an open cell")]
    SpawnInWall {
        /// World x of the spawn point.
        x: f32,
        /// World y of the spawn point.
        y: f32,
    },
}
