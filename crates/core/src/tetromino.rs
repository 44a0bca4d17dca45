//! Tetromino module - shape table, rotation and spawn geometry
//!
//! Each shape is a square bounding matrix (2x2, 3x3 or 4x4) whose non-zero
//! cells carry the shape's color id. Rotation is plain matrix rotation inside
//! that box; there are no wall kicks, so a rotation that does not fit in place
//! is simply refused by the caller.

use crate::error::CoreError;
use crate::types::{Cell, ColorStyle, ShapeKind, EMPTY_CELL};

/// Largest bounding box edge (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

type Matrix = [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];

const I_CELLS: Matrix = [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]];
const J_CELLS: Matrix = [[2, 0, 0, 0], [2, 2, 2, 0], [0, 0, 0, 0], [0, 0, 0, 0]];
const L_CELLS: Matrix = [[0, 0, 3, 0], [3, 3, 3, 0], [0, 0, 0, 0], [0, 0, 0, 0]];
const O_CELLS: Matrix = [[4, 4, 0, 0], [4, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]];
const S_CELLS: Matrix = [[0, 5, 5, 0], [5, 5, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]];
const T_CELLS: Matrix = [[0, 6, 0, 0], [6, 6, 6, 0], [0, 0, 0, 0], [0, 0, 0, 0]];
const Z_CELLS: Matrix = [[7, 7, 0, 0], [0, 7, 7, 0], [0, 0, 0, 0], [0, 0, 0, 0]];

/// A shape's bounding matrix in one rotation state.
///
/// Only the top-left `size x size` corner of `cells` is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: ShapeKind,
    size: u8,
    cells: Matrix,
}

impl Shape {
    /// Canonical (spawn orientation) shape for a kind
    pub fn of(kind: ShapeKind) -> Self {
        let (size, cells) = match kind {
            ShapeKind::I => (4, I_CELLS),
            ShapeKind::J => (3, J_CELLS),
            ShapeKind::L => (3, L_CELLS),
            ShapeKind::O => (2, O_CELLS),
            ShapeKind::S => (3, S_CELLS),
            ShapeKind::T => (3, T_CELLS),
            ShapeKind::Z => (3, Z_CELLS),
        };
        Self { kind, size, cells }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Edge length of the bounding box
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Cell at (row, col) within the box; empty outside it
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row >= self.size() || col >= self.size() {
            return EMPTY_CELL;
        }
        self.cells[row][col]
    }

    /// Rows of the bounding box, top first
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        let n = self.size();
        self.cells[..n].iter().map(move |row| &row[..n])
    }

    /// Occupied cells as (col, row, value) offsets from the box's top-left
    pub fn occupied(&self) -> impl Iterator<Item = (i8, i8, Cell)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |row| {
            (0..n).filter_map(move |col| {
                let cell = self.cells[row][col];
                (cell != EMPTY_CELL).then_some((col as i8, row as i8, cell))
            })
        })
    }

    /// Rotate 90° clockwise within the bounding box
    pub fn rotate(&self) -> Self {
        let n = self.size();
        let mut cells = [[EMPTY_CELL; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (row, out_row) in cells.iter_mut().enumerate().take(n) {
            for (col, out) in out_row.iter_mut().enumerate().take(n) {
                *out = self.cells[n - 1 - col][row];
            }
        }
        Self { cells, ..*self }
    }

    /// Rotate 90° counter-clockwise within the bounding box
    pub fn rotate_ccw(&self) -> Self {
        let n = self.size();
        let mut cells = [[EMPTY_CELL; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (row, out_row) in cells.iter_mut().enumerate().take(n) {
            for (col, out) in out_row.iter_mut().enumerate().take(n) {
                *out = self.cells[col][n - 1 - row];
            }
        }
        Self { cells, ..*self }
    }
}

/// Spawn origin (x, y) of a shape's bounding box.
///
/// The I piece starts one row higher so its filled row lands on row 0.
pub fn spawn_origin(kind: ShapeKind) -> (i8, i8) {
    match kind {
        ShapeKind::I => (3, -1),
        ShapeKind::O => (4, 0),
        _ => (3, 0),
    }
}

/// A piece: a shape and where its bounding box's top-left corner sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub origin_x: i8,
    pub origin_y: i8,
    pub shape: Shape,
}

impl Tetromino {
    /// Create a new tetromino at its spawn position
    pub fn spawn(kind: ShapeKind) -> Self {
        let (origin_x, origin_y) = spawn_origin(kind);
        Self {
            origin_x,
            origin_y,
            shape: Shape::of(kind),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            origin_x: self.origin_x + dx,
            origin_y: self.origin_y + dy,
            ..*self
        }
    }

    pub fn with_shape(&self, shape: Shape) -> Self {
        Self { shape, ..*self }
    }

    /// Occupied cells in board coordinates as (x, y, value)
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8, Cell)> + '_ {
        self.shape
            .occupied()
            .map(move |(dx, dy, cell)| (self.origin_x + dx, self.origin_y + dy, cell))
    }
}

/// Display color identifier for a cell value.
///
/// ```
/// use blocktris_core::color_style_for;
/// use blocktris_types::ColorStyle;
///
/// assert_eq!(color_style_for(1).unwrap().as_str(), "cyan");
/// assert_eq!(color_style_for(7), Ok(ColorStyle::Red));
/// assert!(color_style_for(0).is_err());
/// ```
pub fn color_style_for(cell: Cell) -> Result<ColorStyle, CoreError> {
    ShapeKind::from_cell(cell)
        .map(ColorStyle::of)
        .ok_or(CoreError::OutOfRangeColor(cell))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(shape: &Shape) -> Vec<Vec<Cell>> {
        shape.rows().map(|row| row.to_vec()).collect()
    }

    #[test]
    fn test_every_shape_has_four_cells_of_its_color() {
        for kind in ShapeKind::ALL {
            let shape = Shape::of(kind);
            let cells: Vec<_> = shape.occupied().collect();
            assert_eq!(cells.len(), 4, "{:?}", kind);
            assert!(cells.iter().all(|&(_, _, c)| c == kind.color_id()));
        }
    }

    #[test]
    fn test_t_rotates_clockwise() {
        let t = Shape::of(ShapeKind::T).rotate();
        assert_eq!(matrix(&t), vec![vec![0, 6, 0], vec![0, 6, 6], vec![0, 6, 0]]);
    }

    #[test]
    fn test_i_rotates_into_column() {
        let i = Shape::of(ShapeKind::I).rotate();
        assert_eq!(
            matrix(&i),
            vec![
                vec![0, 0, 1, 0],
                vec![0, 0, 1, 0],
                vec![0, 0, 1, 0],
                vec![0, 0, 1, 0],
            ]
        );
    }

    #[test]
    fn test_rotate_ccw_undoes_rotate() {
        for kind in ShapeKind::ALL {
            let shape = Shape::of(kind);
            assert_eq!(shape.rotate().rotate_ccw(), shape);
            assert_eq!(shape.rotate_ccw(), shape.rotate().rotate().rotate());
        }
    }

    #[test]
    fn test_spawn_origins() {
        assert_eq!(Tetromino::spawn(ShapeKind::I).origin_y, -1);
        assert_eq!(Tetromino::spawn(ShapeKind::O).origin_x, 4);
        assert_eq!(Tetromino::spawn(ShapeKind::T).origin_x, 3);
        assert_eq!(Tetromino::spawn(ShapeKind::T).origin_y, 0);
    }

    #[test]
    fn test_cells_are_translated_by_origin() {
        let piece = Tetromino::spawn(ShapeKind::O);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(4, 0, 4), (5, 0, 4), (4, 1, 4), (5, 1, 4)]);
    }

    #[test]
    fn test_color_style_out_of_range() {
        assert_eq!(color_style_for(0), Err(CoreError::OutOfRangeColor(0)));
        assert_eq!(color_style_for(8), Err(CoreError::OutOfRangeColor(8)));
        assert_eq!(color_style_for(4), Ok(ColorStyle::Yellow));
    }
}
