//! Shared types module - data definitions and fixed tables
//!
//! This crate defines the fundamental values passed between the game core,
//! the event sources and the presentation layer. Everything here is plain data
//! with no behavior beyond parsing and table lookups.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//!
//! # Cell Values
//!
//! A board cell is a `u8`: `0` is empty, `1..=7` names the shape that occupies
//! it (in shape table order `I, J, L, O, S, T, Z`).
//!
//! # Progression Tables
//!
//! | Table | Values |
//! |-------|--------|
//! | `LINE_CLEAR_SCORES` | 0, 100, 300, 500, 800, 1200, 1500 |
//! | `LEVEL_SPEEDS_MS` | 800 ms at level 1 down to 84 ms at level 22 |
//! | `SPEED_FLOOR_MS` | 80 ms beyond the table |
//! | `LEVEL_LINE_THRESHOLDS` | 0, 10, 21, 33, ... 800 |
//!
//! # Examples
//!
//! ```
//! use blocktris_types::{GameEvent, GameKey, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(ShapeKind::T.color_id(), 6);
//! assert_eq!(ShapeKind::from_cell(1), Some(ShapeKind::I));
//!
//! let key = GameKey::from_code("ArrowLeft").unwrap();
//! assert_eq!(key, GameKey::Left);
//! assert_eq!(GameKey::from_code("KeyQ"), None);
//!
//! assert_eq!(GameEvent::KeyUp(key).kind(), "KEYUP");
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// A board cell: `0` = empty, `1..=7` = shape color id.
pub type Cell = u8;

/// The empty cell value.
pub const EMPTY_CELL: Cell = 0;

/// Bonus for clearing N rows with one lock, indexed by N.
pub const LINE_CLEAR_SCORES: [u32; 7] = [0, 100, 300, 500, 800, 1200, 1500];

/// Tick interval per level in milliseconds (index 0 = level 1).
pub const LEVEL_SPEEDS_MS: [u32; 22] = [
    800, 720, 648, 583, 524, 471, 423, 380, 342, 307, 276, 248, 223, 200, 180, 162, 145, 130,
    117, 105, 94, 84,
];

/// Tick interval for every level past the end of `LEVEL_SPEEDS_MS`.
pub const SPEED_FLOOR_MS: u32 = 80;

/// Cumulative line counts at which each level ends.
///
/// Level `n` lasts while `lines < LEVEL_LINE_THRESHOLDS[n]`; entry 0 is always
/// passed, so the smallest reachable level is 1.
pub const LEVEL_LINE_THRESHOLDS: [u32; 24] = [
    0, 10, 21, 33, 46, 60, 75, 91, 109, 129, 151, 175, 202, 232, 265, 302, 343, 389, 440, 497,
    561, 633, 713, 800,
];

/// Points for every row a piece descends during a hard drop.
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// The seven tetromino shapes, in shape table order.
///
/// The discriminant order matters: a shape's color id is its index + 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl ShapeKind {
    /// All shapes in table order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Position in the shape table (0..7).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The cell value this shape writes onto the board (1..=7).
    pub fn color_id(self) -> Cell {
        self as Cell + 1
    }

    /// Shape occupying a cell, or `None` for empty/invalid values.
    ///
    /// ```
    /// use blocktris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_cell(7), Some(ShapeKind::Z));
    /// assert_eq!(ShapeKind::from_cell(0), None);
    /// assert_eq!(ShapeKind::from_cell(8), None);
    /// ```
    pub fn from_cell(cell: Cell) -> Option<Self> {
        match cell {
            0 => None,
            c => Self::from_index(c as usize - 1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
            ShapeKind::O => "O",
            ShapeKind::S => "S",
            ShapeKind::T => "T",
            ShapeKind::Z => "Z",
        }
    }
}

/// Display color identifiers, one per shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorStyle {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Lime,
    Purple,
    Red,
}

impl ColorStyle {
    /// Color of a shape.
    pub fn of(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::I => ColorStyle::Cyan,
            ShapeKind::J => ColorStyle::Blue,
            ShapeKind::L => ColorStyle::Orange,
            ShapeKind::O => ColorStyle::Yellow,
            ShapeKind::S => ColorStyle::Lime,
            ShapeKind::T => ColorStyle::Purple,
            ShapeKind::Z => ColorStyle::Red,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorStyle::Cyan => "cyan",
            ColorStyle::Blue => "blue",
            ColorStyle::Orange => "orange",
            ColorStyle::Yellow => "yellow",
            ColorStyle::Lime => "lime",
            ColorStyle::Purple => "purple",
            ColorStyle::Red => "red",
        }
    }
}

/// Keys the game reacts to.
///
/// Each key is identified by a layout-independent key code string, the same
/// identifiers a browser reports in `KeyboardEvent.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKey {
    /// Rotate the active piece 90° clockwise
    #[serde(rename = "ArrowUp")]
    RotateCw,
    /// Rotate the active piece 90° counter-clockwise
    #[serde(rename = "ArrowDown")]
    RotateCcw,
    /// Shift the active piece one column left
    #[serde(rename = "ArrowLeft")]
    Left,
    /// Shift the active piece one column right
    #[serde(rename = "ArrowRight")]
    Right,
    /// Drop the active piece until it locks
    #[serde(rename = "Space")]
    HardDrop,
    /// Drop the active piece by one row
    #[serde(rename = "KeyS")]
    SoftDrop,
}

impl GameKey {
    pub const ALL: [GameKey; 6] = [
        GameKey::RotateCw,
        GameKey::RotateCcw,
        GameKey::Left,
        GameKey::Right,
        GameKey::HardDrop,
        GameKey::SoftDrop,
    ];

    /// Parse a key code; unrecognized codes yield `None`.
    ///
    /// ```
    /// use blocktris_types::GameKey;
    ///
    /// assert_eq!(GameKey::from_code("ArrowUp"), Some(GameKey::RotateCw));
    /// assert_eq!(GameKey::from_code("Space"), Some(GameKey::HardDrop));
    /// assert_eq!(GameKey::from_code("arrowup"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.code() == code)
    }

    pub fn code(&self) -> &'static str {
        match self {
            GameKey::RotateCw => "ArrowUp",
            GameKey::RotateCcw => "ArrowDown",
            GameKey::Left => "ArrowLeft",
            GameKey::Right => "ArrowRight",
            GameKey::HardDrop => "Space",
            GameKey::SoftDrop => "KeyS",
        }
    }
}

/// One input to the game reducer.
///
/// Serialized as `{"kind": "PAUSE" | "LOOP" | "KEYUP", "value": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEvent {
    /// Set the pause flag
    Pause(bool),
    /// Gravity tick
    Loop,
    /// A recognized key was released
    #[serde(rename = "KEYUP")]
    KeyUp(GameKey),
}

impl GameEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::Pause(_) => "PAUSE",
            GameEvent::Loop => "LOOP",
            GameEvent::KeyUp(_) => "KEYUP",
        }
    }
}
