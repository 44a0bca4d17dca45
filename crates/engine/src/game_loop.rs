//! The single consumer: folds events into states one at a time.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::core::GameState;
use crate::sources::{control_channels, set_interval, spawn_sources, Controls};
use crate::state_log::StateLog;
use crate::types::GameEvent;

/// Everything a caller needs to drive and observe a running game
#[derive(Debug)]
pub struct GameHandles {
    pub controls: Controls,
    pub states: watch::Receiver<GameState>,
    /// Resolves to the final state once the loop stops
    pub game: JoinHandle<GameState>,
}

/// Apply one event and report the tick interval to switch to, if the speed
/// changed.
pub fn step(state: &GameState, event: &GameEvent) -> (GameState, Option<u32>) {
    let next = state.reduce(event);
    let retune = (next.speed() != state.speed()).then_some(next.speed());
    (next, retune)
}

/// Fold events until every state subscriber is gone or the event channel
/// closes, publishing each new state. Returns the last state.
pub async fn run_game_loop(
    mut state: GameState,
    mut events: mpsc::UnboundedReceiver<GameEvent>,
    states: watch::Sender<GameState>,
    interval: Arc<watch::Sender<u32>>,
    log: Option<StateLog>,
) -> GameState {
    let was_over = state.over();

    loop {
        let event = tokio::select! {
            _ = states.closed() => break,
            event = events.recv() => match event {
                Some(event) => event,
                None => break,
            },
        };

        let (next, retune) = step(&state, &event);
        if let Some(speed) = retune {
            set_interval(&interval, speed);
        }
        if let Some(log) = &log {
            log.record(event, &next);
        }
        states.send_replace(next.clone());
        state = next;
    }

    if let Some(log) = log {
        log.close().await;
    }
    if state.over() && !was_over {
        eprintln!(
            "[Engine] Game over: score {} lines {} level {}",
            state.score(),
            state.lines(),
            state.level()
        );
    }
    state
}

/// Start producers and the game loop for `initial`. Must be called inside a
/// tokio runtime.
///
/// The tick interval starts at the state's speed. With `paused` set the game
/// starts paused and no tick is produced until it is resumed.
pub fn spawn_game(initial: GameState, paused: bool, log: Option<StateLog>) -> GameHandles {
    let initial = if initial.paused() == paused {
        initial
    } else {
        initial.reduce(&GameEvent::Pause(paused))
    };

    let (controls, receivers) = control_channels(paused, initial.speed());
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(initial.clone());

    spawn_sources(receivers, event_tx);
    let game = tokio::spawn(run_game_loop(
        initial,
        event_rx,
        state_tx,
        controls.interval_sender(),
        log,
    ));

    GameHandles {
        controls,
        states: state_rx,
        game,
    }
}
