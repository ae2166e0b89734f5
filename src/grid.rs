use crate::error::ConfigError;

/// Content id of an empty cell. Any other value is a wall.
pub const EMPTY: u8 = 0;

/// The 15x11 map the viewer spawns into when no map is configured.
pub const DEFAULT_MAP: [[u8; 15]; 11] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, 0, 1],
    [1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 0, 0, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Static tile map. Row `i` spans world y in `[i*tile, (i+1)*tile)`.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Vec<u8>, // row-major, rows * cols
    rows: usize,
    cols: usize,
    tile_size: f32,
}

impl Grid {
    /// Builds a grid from rectangular rows of content ids.
    pub fn new<R: AsRef<[u8]>>(rows: &[R], tile_size: f32) -> Result<Self, ConfigError> {
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(ConfigError::InvalidTileSize(tile_size));
        }
        let first = rows.first().ok_or(ConfigError::EmptyMap)?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(ConfigError::EmptyRow);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(ConfigError::RaggedRow {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            cells,
            rows: rows.len(),
            cols,
            tile_size,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// World width covered by the map.
    pub fn width(&self) -> f32 {
        self.cols as f32 * self.tile_size
    }

    /// World height covered by the map.
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// Content of cell `(row, col)`, `None` when out of range.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Content of the cell containing world point `(x, y)`, `None` outside the map.
    #[inline]
    pub fn content_at(&self, x: f32, y: f32) -> Option<u8> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let i = (y / self.tile_size).floor();
        let j = (x / self.tile_size).floor();
        if i < 0.0 || j < 0.0 {
            return None;
        }
        self.cell(i as usize, j as usize)
    }

    /// Whether world point `(x, y)` is solid.
    ///
    /// Anything outside `[0, width) x [0, height)` is solid, as is any
    /// non-finite coordinate. Grid stepping relies on this to terminate.
    #[inline]
    pub fn wall_at(&self, x: f32, y: f32) -> bool {
        self.content_at(x, y).is_none_or(|c| c != EMPTY)
    }

    /// Iterates `(row, col, content)` over every cell.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &c)| (idx / self.cols, idx % self.cols, c))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            cells: DEFAULT_MAP.iter().flatten().copied().collect(),
            rows: DEFAULT_MAP.len(),
            cols: DEFAULT_MAP[0].len(),
            tile_size: 64.0,
        }
    }
}
