//! Serializable view of a [`GameState`], used by the state log and renderers.

use serde::{Deserialize, Serialize};

use crate::game_state::GameState;
use crate::tetromino::Tetromino;
use crate::types::{Cell, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub kind: ShapeKind,
    pub x: i8,
    pub y: i8,
    /// Bounding matrix in its current rotation
    pub shape: Vec<Vec<Cell>>,
}

impl From<&Tetromino> for PieceSnapshot {
    fn from(value: &Tetromino) -> Self {
        Self {
            kind: value.kind(),
            x: value.origin_x,
            y: value.origin_y,
            shape: value.shape.rows().map(|row| row.to_vec()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Grid including the active piece
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: PieceSnapshot,
    pub next: PieceSnapshot,
    pub level: u32,
    pub score: u32,
    pub lines: u32,
    pub speed: u32,
    pub paused: bool,
    pub over: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.over && !self.paused
    }
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        Self {
            board: state.grid().to_rows(),
            current: state.current().into(),
            next: state.next().into(),
            level: state.level(),
            score: state.score(),
            lines: state.lines(),
            speed: state.speed(),
            paused: state.paused(),
            over: state.over(),
        }
    }
}

impl GameState {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }
}
