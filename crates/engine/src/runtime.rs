//! Engine runtime integration.
//!
//! Bridges a synchronous caller (the terminal loop) with the async producers
//! and game loop.

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::EngineConfig;
use crate::core::GameState;
use crate::game_loop::{spawn_game, GameHandles};
use crate::sources::Controls;
use crate::state_log::StateLog;

/// Running engine instance.
pub struct Engine {
    rt: Runtime,
    controls: Controls,
    states: watch::Receiver<GameState>,
    game: JoinHandle<GameState>,
}

impl Engine {
    /// Start the engine from environment variables.
    pub fn start_from_env() -> Result<Self> {
        Self::start(EngineConfig::from_env())
    }

    /// Start a new game with the given configuration.
    pub fn start(config: EngineConfig) -> Result<Self> {
        let initial = GameState::new(config.seed).context("failed to deal the first pieces")?;
        Self::start_with(initial, config)
    }

    /// Run an already prepared state.
    pub fn start_with(initial: GameState, config: EngineConfig) -> Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime")?;

        let GameHandles {
            controls,
            states,
            game,
        } = {
            let _guard = rt.enter();
            let log = config.state_log_path.map(StateLog::spawn);
            spawn_game(initial, config.start_paused, log)
        };

        Ok(Self {
            rt,
            controls,
            states,
            game,
        })
    }

    pub fn send_key(&self, code: &str) {
        self.controls.send_key(code);
    }

    pub fn set_paused(&self, paused: bool) {
        self.controls.set_paused(paused);
    }

    /// Returns the new pause value
    pub fn toggle_pause(&self) -> bool {
        self.controls.toggle_pause()
    }

    pub fn set_interval_ms(&self, interval_ms: u32) {
        self.controls.set_interval_ms(interval_ms);
    }

    pub fn interval_ms(&self) -> u32 {
        self.controls.interval_ms()
    }

    /// Latest published state
    pub fn state(&self) -> GameState {
        self.states.borrow().clone()
    }

    /// An independent receiver of every published state
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.states.clone()
    }

    /// Stop producers, wait for the game loop to drain and return the final
    /// state.
    pub fn shutdown(self) -> Result<GameState> {
        let Self {
            rt,
            controls,
            states,
            game,
        } = self;

        drop(controls);
        drop(states);
        rt.block_on(game).context("game loop task failed")
    }
}
