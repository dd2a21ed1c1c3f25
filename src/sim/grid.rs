//! Grid geometry: cell positions, movement directions, and play-field bounds.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A cell position on the grid, in cell coordinates (not pixels).
pub type GridPos = IVec2;

/// Movement direction of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in cell coordinates. Y grows downward (canvas convention).
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    /// The reversal of this direction (a snake may never turn into this).
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Errors from grid construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Cell size of zero cannot tile anything
    ZeroCellSize,
    /// Fewer than `MIN_CELLS_PER_AXIS` cells fit along an axis
    TooSmall { cols: i32, rows: i32 },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::ZeroCellSize => write!(f, "cell size must be non-zero"),
            GridError::TooSmall { cols, rows } => {
                write!(f, "grid of {cols}x{rows} cells is too small to play on")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Minimum playable extent along each axis
pub const MIN_CELLS_PER_AXIS: i32 = 3;

/// The play field: a fixed-size grid of uniform square cells.
///
/// Bounds are derived from the rendering surface the way the original
/// canvas does it: `floor(canvas / cell_size)` cells per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
    /// Cell edge length in pixels, kept for renderers
    pub cell_size: u32,
}

impl Grid {
    /// Build a grid from a canvas size. Fails fast on a malformed size
    /// rather than producing undefined mid-game behavior.
    pub fn new(canvas_width: u32, canvas_height: u32, cell_size: u32) -> Result<Self, GridError> {
        if cell_size == 0 {
            return Err(GridError::ZeroCellSize);
        }
        let cols = (canvas_width / cell_size) as i32;
        let rows = (canvas_height / cell_size) as i32;
        if cols < MIN_CELLS_PER_AXIS || rows < MIN_CELLS_PER_AXIS {
            return Err(GridError::TooSmall { cols, rows });
        }
        Ok(Self {
            cols,
            rows,
            cell_size,
        })
    }

    /// True if `pos` lies inside the play field
    pub fn contains(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.cols && pos.y >= 0 && pos.y < self.rows
    }

    /// Starting cell for the snake head
    pub fn center(&self) -> GridPos {
        IVec2::new(self.cols / 2, self.rows / 2)
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        (self.cols as usize) * (self.rows as usize)
    }
}
