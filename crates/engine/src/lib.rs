//! Engine - event sources and the game loop.
//!
//! Turns the pure reducer in `blocktris-core` into a running game:
//!
//! - [`sources`]: pause, tick and key producers feeding one event channel
//! - [`game_loop`]: the single consumer folding events into published states
//! - [`state_log`]: optional JSON-lines record of every published state
//! - [`runtime`]: [`Engine`], a synchronous handle that owns the tokio runtime
//! - [`config`]: [`EngineConfig`] from environment variables

pub mod config;
pub mod game_loop;
pub mod runtime;
pub mod sources;
pub mod state_log;

pub use blocktris_core as core;
pub use blocktris_types as types;

pub use config::EngineConfig;
pub use game_loop::{run_game_loop, spawn_game, step, GameHandles};
pub use runtime::Engine;
pub use sources::{
    control_channels, run_sources, spawn_sources, Controls, EventSender, SourceInput, SourceReceivers,
};
pub use state_log::{StateLog, StateRecord};
