//! Grid module - the 10x20 playing field
//!
//! Each cell holds a [`Cell`] value: `0` for empty, `1..=7` for the shape that
//! occupies it. Storage is a flat row-major array, so a grid is a cheap value
//! to copy; every mutation in the game produces a fresh grid.
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom). Pieces may sit partly above row 0 while spawning; those
//! cells are never written.

use arrayvec::ArrayVec;

use crate::tetromino::Tetromino;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_CELL};

/// Total number of cells on the grid
const GRID_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const ROWS: usize = BOARD_HEIGHT as usize;
const COLS: usize = BOARD_WIDTH as usize;

/// The playing field - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [EMPTY_CELL; GRID_SIZE],
        }
    }

    /// Build a grid from explicit rows (row 0 first).
    pub fn from_rows(rows: &[[Cell; COLS]; ROWS]) -> Self {
        let mut grid = Self::new();
        for (y, row) in rows.iter().enumerate() {
            grid.cells[y * COLS..(y + 1) * COLS].copy_from_slice(row);
        }
        grid
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * COLS + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(EMPTY_CELL))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= ROWS {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != EMPTY_CELL)
    }

    /// One row of cells (panics if `y` is out of range).
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * COLS..(y + 1) * COLS]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(COLS)
    }

    /// Copy out as a 2D array (row 0 first)
    pub fn to_rows(&self) -> [[Cell; COLS]; ROWS] {
        let mut out = [[EMPTY_CELL; COLS]; ROWS];
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
        out
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != EMPTY_CELL).count()
    }

    /// Remove every full row, shifting the rows above it down and filling the
    /// top with empty rows. All full rows go in a single pass.
    ///
    /// Returns the indices (in the pre-clear grid) of the rows removed, bottom
    /// to top.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, ROWS> {
        let mut cleared_rows = ArrayVec::new();
        let mut write_y = ROWS;

        // Scan from bottom to top
        for read_y in (0..ROWS).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * COLS;
                    self.cells
                        .copy_within(src_start..src_start + COLS, write_y * COLS);
                }
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * COLS].fill(EMPTY_CELL);

        cleared_rows
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// A board of all-empty cells.
pub fn empty_grid() -> Grid {
    Grid::new()
}

/// Copy of `grid` with the piece's cells written in. Cells that fall outside
/// the board are dropped.
pub fn place_on_grid(piece: &Tetromino, grid: &Grid) -> Grid {
    let mut out = grid.clone();
    for (x, y, cell) in piece.cells() {
        out.set(x, y, cell);
    }
    out
}

/// Copy of `grid` with the piece's in-bounds cells cleared.
pub fn remove_from_grid(piece: &Tetromino, grid: &Grid) -> Grid {
    let mut out = grid.clone();
    for (x, y, _) in piece.cells() {
        out.set(x, y, EMPTY_CELL);
    }
    out
}

/// Whether every cell of the piece is inside the side walls, above the floor
/// and over an empty grid cell. Cells above row 0 count as free.
pub fn fits(piece: &Tetromino, grid: &Grid) -> bool {
    piece.cells().all(|(x, y, _)| {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        y < 0 || grid.is_empty_at(x, y)
    })
}

/// Whether the piece could be translated by (dx, dy). `grid` must not contain
/// the piece itself.
pub fn can_move(piece: &Tetromino, dx: i8, dy: i8, grid: &Grid) -> bool {
    fits(&piece.shifted(dx, dy), grid)
}
