//! Engine configuration, read from environment variables.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Piece supply seed
    pub seed: u32,
    pub start_paused: bool,
    /// Append every published state to this file as JSON lines
    pub state_log_path: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            start_paused: false,
            state_log_path: None,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables; unset or unparsable values use the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("BLOCKTRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let start_paused = lookup("BLOCKTRIS_START_PAUSED")
            .map(|s| parse_flag(&s))
            .unwrap_or(false);

        let state_log_path = lookup("BLOCKTRIS_STATE_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            seed,
            start_paused,
            state_log_path,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
