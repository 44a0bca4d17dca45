//! Event sources - pause, tick and key producers
//!
//! One producer task merges three independent channels into the shared event
//! stream; the game loop is the only consumer. The control surface
//! ([`Controls`]) is push-style: setting a value never blocks and the producer
//! reacts as soon as it observes it.
//!
//! - **Pause**: a `watch` holds the current flag; writes that do not change it
//!   are swallowed, so every `PAUSE` event reflects a real transition.
//! - **Tick**: a `tokio::time::interval` rebuilt from scratch whenever the pause
//!   flag or the interval changes, so a new cadence never inherits a tick
//!   scheduled under the old one. Nothing ticks while paused.
//! - **Keys**: raw key codes; unrecognized codes, and anything sent while
//!   paused, never reach the stream.
//!
//! Pause transitions travel on the same queue as keys, pushed while the pause
//! flag is locked, so keys and pauses come out in the order callers made them.
//! Ticks are produced by the same task that applies pause transitions: once a
//! `PAUSE(true)` is queued, no `LOOP` follows it until `PAUSE(false)`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::types::{GameEvent, GameKey};

/// Sending half of the merged event stream
pub type EventSender = mpsc::UnboundedSender<GameEvent>;

/// Shortest accepted tick interval
pub const MIN_INTERVAL_MS: u32 = 1;

/// Ordered input from the control surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceInput {
    Pause(bool),
    Key(String),
}

/// Externally settable knobs: pause, tick interval and raw key input.
///
/// Cheap to clone; all clones drive the same producer.
#[derive(Debug, Clone)]
pub struct Controls {
    pause: Arc<watch::Sender<bool>>,
    interval_ms: Arc<watch::Sender<u32>>,
    inputs: mpsc::UnboundedSender<SourceInput>,
}

/// Producer-side ends of the control channels
#[derive(Debug)]
pub struct SourceReceivers {
    /// Pause flag at creation; later changes arrive on `inputs`
    pub paused: bool,
    pub interval_ms: watch::Receiver<u32>,
    pub inputs: mpsc::UnboundedReceiver<SourceInput>,
}

/// Create the control channels with their initial values
pub fn control_channels(paused: bool, interval_ms: u32) -> (Controls, SourceReceivers) {
    let (pause_tx, _) = watch::channel(paused);
    let (interval_tx, interval_rx) = watch::channel(interval_ms.max(MIN_INTERVAL_MS));
    let (input_tx, input_rx) = mpsc::unbounded_channel();

    let controls = Controls {
        pause: Arc::new(pause_tx),
        interval_ms: Arc::new(interval_tx),
        inputs: input_tx,
    };
    let receivers = SourceReceivers {
        paused,
        interval_ms: interval_rx,
        inputs: input_rx,
    };
    (controls, receivers)
}

impl Controls {
    /// Set the pause flag. Returns false if it already had this value.
    pub fn set_paused(&self, paused: bool) -> bool {
        self.pause.send_if_modified(|current| {
            if *current == paused {
                return false;
            }
            *current = paused;
            let _ = self.inputs.send(SourceInput::Pause(paused));
            true
        })
    }

    /// Flip the pause flag and return the new value
    pub fn toggle_pause(&self) -> bool {
        let mut now = false;
        self.pause.send_modify(|current| {
            *current = !*current;
            now = *current;
            let _ = self.inputs.send(SourceInput::Pause(now));
        });
        now
    }

    pub fn paused(&self) -> bool {
        *self.pause.borrow()
    }

    /// Change the tick interval. Returns false if it already had this value.
    pub fn set_interval_ms(&self, interval_ms: u32) -> bool {
        set_interval(&self.interval_ms, interval_ms)
    }

    pub fn interval_ms(&self) -> u32 {
        *self.interval_ms.borrow()
    }

    /// Feed one raw key code. Returns false once the producer has stopped.
    pub fn send_key(&self, code: impl Into<String>) -> bool {
        self.inputs.send(SourceInput::Key(code.into())).is_ok()
    }

    /// Handle the game loop uses to retune the ticker on speed changes
    pub(crate) fn interval_sender(&self) -> Arc<watch::Sender<u32>> {
        Arc::clone(&self.interval_ms)
    }
}

pub(crate) fn set_interval(sender: &watch::Sender<u32>, interval_ms: u32) -> bool {
    let interval_ms = interval_ms.max(MIN_INTERVAL_MS);
    sender.send_if_modified(|current| {
        if *current == interval_ms {
            return false;
        }
        *current = interval_ms;
        true
    })
}

/// Spawn the producer task
pub fn spawn_sources(receivers: SourceReceivers, events: EventSender) -> JoinHandle<()> {
    tokio::spawn(run_sources(receivers, events))
}

/// Emit `PAUSE` on every pause transition, `KEYUP` for recognized keys while
/// unpaused and `LOOP` at the configured cadence while unpaused.
///
/// Returns when every [`Controls`] clone is gone or the event channel closes.
pub async fn run_sources(receivers: SourceReceivers, events: EventSender) {
    let SourceReceivers {
        mut paused,
        mut interval_ms,
        mut inputs,
    } = receivers;
    let mut interval_open = true;

    loop {
        let period = Duration::from_millis(u64::from(
            (*interval_ms.borrow_and_update()).max(MIN_INTERVAL_MS),
        ));
        // First tick one full period from now, not immediately.
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                input = inputs.recv() => match input {
                    None => return,
                    Some(SourceInput::Pause(now)) => {
                        if now == paused {
                            continue;
                        }
                        paused = now;
                        if events.send(GameEvent::Pause(now)).is_err() {
                            return;
                        }
                        break;
                    }
                    Some(SourceInput::Key(code)) => {
                        if paused {
                            continue;
                        }
                        let Some(key) = GameKey::from_code(&code) else {
                            continue;
                        };
                        if events.send(GameEvent::KeyUp(key)).is_err() {
                            return;
                        }
                    }
                },
                changed = interval_ms.changed(), if interval_open => {
                    if changed.is_err() {
                        // Interval is fixed from here on; keep ticking.
                        interval_open = false;
                        continue;
                    }
                    break;
                }
                _ = ticker.tick(), if !paused => {
                    if events.send(GameEvent::Loop).is_err() {
                        return;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            out.push(event);
        }
        out
    }

    fn start(paused: bool, interval: u32) -> (Controls, mpsc::UnboundedReceiver<GameEvent>) {
        let (controls, receivers) = control_channels(paused, interval);
        let (tx, rx) = mpsc::unbounded_channel();
        spawn_sources(receivers, tx);
        (controls, rx)
    }

    fn loops(events: &[GameEvent]) -> usize {
        events.iter().filter(|e| **e == GameEvent::Loop).count()
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_at_interval() {
        let (_controls, mut rx) = start(false, 100);

        time::sleep(Duration::from_millis(50)).await;
        assert!(drain(&mut rx).is_empty());

        time::sleep(Duration::from_millis(300)).await;
        assert_eq!(drain(&mut rx), vec![GameEvent::Loop; 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_while_paused() {
        let (controls, mut rx) = start(false, 100);

        time::sleep(Duration::from_millis(150)).await;
        assert!(controls.set_paused(true));
        time::sleep(Duration::from_millis(1000)).await;

        let events = drain(&mut rx);
        assert_eq!(events, vec![GameEvent::Loop, GameEvent::Pause(true)]);

        assert!(controls.set_paused(false));
        time::sleep(Duration::from_millis(250)).await;
        let events = drain(&mut rx);
        assert_eq!(events[0], GameEvent::Pause(false));
        assert_eq!(loops(&events), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_pause_is_suppressed() {
        let (controls, mut rx) = start(true, 100);

        assert!(!controls.set_paused(true));
        time::sleep(Duration::from_millis(10)).await;
        assert!(drain(&mut rx).is_empty());

        assert!(!controls.toggle_pause());
        assert!(!controls.set_paused(false));
        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(drain(&mut rx), vec![GameEvent::Pause(false)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_change_restarts_timer() {
        let (controls, mut rx) = start(false, 800);

        time::sleep(Duration::from_millis(700)).await;
        assert!(controls.set_interval_ms(200));

        // The old 800ms deadline must not fire; the next tick is at 900ms.
        time::sleep(Duration::from_millis(150)).await;
        assert!(drain(&mut rx).is_empty());

        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(drain(&mut rx), vec![GameEvent::Loop]);

        assert!(!controls.set_interval_ms(200));
        assert_eq!(controls.interval_ms(), 200);
    }

    #[tokio::test(start_paused = true)]
    async fn test_key_filter() {
        let (controls, mut rx) = start(false, 10_000);

        controls.send_key("ArrowLeft");
        controls.send_key("KeyQ");
        controls.send_key("Space");
        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(
            drain(&mut rx),
            vec![
                GameEvent::KeyUp(GameKey::Left),
                GameEvent::KeyUp(GameKey::HardDrop)
            ]
        );

        controls.set_paused(true);
        controls.send_key("ArrowRight");
        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(drain(&mut rx), vec![GameEvent::Pause(true)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sources_stop_with_controls() {
        let (controls, receivers) = control_channels(false, 100);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_sources(receivers, tx);

        drop(controls);
        handle.await.unwrap();
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_and_pauses_keep_call_order() {
        let (controls, mut rx) = start(true, 10_000);

        controls.set_paused(false);
        controls.send_key("ArrowLeft");
        controls.send_key("Space");
        controls.set_paused(true);
        controls.send_key("ArrowRight");
        controls.toggle_pause();
        controls.send_key("ArrowUp");
        time::sleep(Duration::from_millis(10)).await;

        assert_eq!(
            drain(&mut rx),
            vec![
                GameEvent::Pause(false),
                GameEvent::KeyUp(GameKey::Left),
                GameEvent::KeyUp(GameKey::HardDrop),
                GameEvent::Pause(true),
                GameEvent::Pause(false),
                GameEvent::KeyUp(GameKey::RotateCw),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_loop_after_pause_is_queued() {
        let (controls, mut rx) = start(false, 100);

        // Pause lands exactly on a tick deadline; the tick must not follow it.
        time::sleep(Duration::from_millis(100)).await;
        controls.set_paused(true);
        time::sleep(Duration::from_millis(500)).await;

        let events = drain(&mut rx);
        let pause_at = events
            .iter()
            .position(|e| *e == GameEvent::Pause(true))
            .unwrap();
        assert!(events[pause_at..].iter().all(|e| *e != GameEvent::Loop));
        assert!(loops(&events) <= 1);
    }

    #[test]
    fn test_interval_floor() {
        let (controls, _receivers) = control_channels(false, 0);
        assert_eq!(controls.interval_ms(), MIN_INTERVAL_MS);
        controls.set_interval_ms(0);
        assert_eq!(controls.interval_ms(), MIN_INTERVAL_MS);
    }
}
