//! Key mapping from terminal events to key codes.
//!
//! Codes follow the browser `KeyboardEvent.code` naming (`ArrowLeft`, `Space`,
//! `KeyS`, ...). Unrecognized keys still get a code; the engine decides which
//! ones it reacts to.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Layout-independent code for a key press, or `None` for keys without one.
pub fn key_code(key: KeyEvent) -> Option<String> {
    let code = match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => "ArrowLeft".to_string(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => "ArrowRight".to_string(),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => "ArrowUp".to_string(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => "ArrowDown".to_string(),
        KeyCode::Char(' ') => "Space".to_string(),

        KeyCode::Char(c) if c.is_ascii_alphabetic() => format!("Key{}", c.to_ascii_uppercase()),
        KeyCode::Char(c) if c.is_ascii_digit() => format!("Digit{}", c),

        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        _ => return None,
    };
    Some(code)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if key flips the pause flag.
pub fn is_pause_toggle(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('p') | KeyCode::Char('P'))
}
