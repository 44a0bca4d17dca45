//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the whole falling-block rule set as a pure state machine.
//! It has no dependency on terminals, timers or channels: a game is a
//! [`GameState`] value, and [`GameState::reduce`] turns one state and one
//! [`GameEvent`](types::GameEvent) into the next state.
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 grid, piece compositing and collision checks
//! - [`tetromino`]: shape table, rotation and spawn positions
//! - [`supply`]: seeded 7-bag piece supply
//! - [`progression`]: score, level and speed tables
//! - [`game_state`]: the reducer
//! - [`snapshot`]: serializable view of a state
//!
//! # Game Rules
//!
//! - **7-Bag Supply**: every shape appears once per seven pieces
//! - **Plain Rotation**: pieces rotate inside their bounding box; blocked rotations are refused
//! - **Immediate Lock**: a piece locks on the first tick it cannot fall
//! - **Scoring**: 100/300/500/800 for 1-4 lines, 2 points per hard-dropped row
//!
//! # Example
//!
//! ```
//! use blocktris_core::GameState;
//! use blocktris_types::{GameEvent, GameKey};
//!
//! let game = GameState::new(12345).unwrap();
//!
//! let game = game
//!     .reduce(&GameEvent::KeyUp(GameKey::Right))
//!     .reduce(&GameEvent::Loop)
//!     .reduce(&GameEvent::KeyUp(GameKey::HardDrop));
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! assert!(!game.over());
//! ```

pub mod error;
pub mod game_state;
pub mod grid;
pub mod progression;
pub mod snapshot;
pub mod supply;
pub mod tetromino;

pub use blocktris_types as types;

// Re-export commonly used types for convenience
pub use error::CoreError;
pub use game_state::GameState;
pub use grid::{can_move, empty_grid, fits, place_on_grid, remove_from_grid, Grid};
pub use progression::{hard_drop_score, level_for_lines, score_for_cleared_lines, speed_for_level};
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use supply::{PieceSupply, SimpleRng};
pub use tetromino::{color_style_for, spawn_origin, Shape, Tetromino};
