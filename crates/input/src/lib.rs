//! Terminal input module.
//!
//! Decodes `crossterm` key events into the raw key codes the engine's key
//! channel accepts, plus the two keys the runner handles itself (quit and
//! pause).

pub mod map;

pub use blocktris_types as types;

pub use map::{is_pause_toggle, key_code, should_quit};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameKey;

    #[test]
    fn test_game_keys_round_trip_through_map() {
        use crossterm::event::{KeyCode, KeyEvent};

        for key in [KeyCode::Left, KeyCode::Right, KeyCode::Up, KeyCode::Down, KeyCode::Char(' '), KeyCode::Char('s')] {
            let code = key_code(KeyEvent::from(key)).unwrap();
            assert!(GameKey::from_code(&code).is_some(), "{}", code);
        }
        assert_eq!(GameKey::from_code("KeyQ"), None);
    }
}
