//! Terminal runner (default binary).
//!
//! Reads keys with crossterm, feeds them to the engine and draws whatever state
//! the engine last published.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blocktris::engine::{Engine, EngineConfig};
use blocktris::input::{is_pause_toggle, key_code, should_quit};
use blocktris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// How long to wait for input before redrawing
const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    println!("[Engine] Starting with seed {}", config.seed);
    if let Some(path) = &config.state_log_path {
        println!("[Engine] Logging states to {}", path);
    }

    let engine = Engine::start(config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &engine);

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    let last = engine.shutdown()?;
    println!(
        "[Engine] Final score {} (level {}, {} lines)",
        last.score(),
        last.level(),
        last.lines()
    );
    Ok(())
}

fn run(term: &mut TerminalRenderer, engine: &Engine) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&engine.state().snapshot(), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        if !event::poll(Duration::from_millis(FRAME_MS))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if is_pause_toggle(key) {
                    engine.toggle_pause();
                } else if let Some(code) = key_code(key) {
                    engine.send_key(&code);
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
