//! JSON-lines state log.
//!
//! A background task appends one `{"event": ..., "state": ...}` object per
//! published state. Write failures stop the log, never the game.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::{GameSnapshot, GameState};
use crate::types::GameEvent;

/// One line of the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub event: GameEvent,
    pub state: GameSnapshot,
}

/// Handle to the writer task
#[derive(Debug)]
pub struct StateLog {
    tx: mpsc::UnboundedSender<StateRecord>,
    task: JoinHandle<()>,
}

impl StateLog {
    /// Open (append mode) and start writing. Must be called inside a tokio runtime.
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tx, mut rx) = mpsc::unbounded_channel::<StateRecord>();

        let task = tokio::spawn(async move {
            use tokio::fs::OpenOptions;
            use tokio::io::AsyncWriteExt;

            let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("[Engine] State log {} disabled: {}", path.display(), e);
                    return;
                }
            };

            let mut buf: Vec<u8> = Vec::with_capacity(4096);

            while let Some(record) = rx.recv().await {
                buf.clear();
                if serde_json::to_writer(&mut buf, &record).is_err() {
                    continue;
                }
                buf.push(b'\n');
                if let Err(e) = file.write_all(&buf).await {
                    eprintln!("[Engine] State log write failed: {}", e);
                    break;
                }
            }

            let _ = file.flush().await;
        });

        Self { tx, task }
    }

    pub fn record(&self, event: GameEvent, state: &GameState) {
        let _ = self.tx.send(StateRecord {
            event,
            state: state.snapshot(),
        });
    }

    /// Stop accepting records and wait until everything queued is on disk
    pub async fn close(self) {
        let Self { tx, task } = self;
        drop(tx);
        let _ = task.await;
    }
}
