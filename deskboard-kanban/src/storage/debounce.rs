//! Debounced blob writes
//!
//! Each [`schedule`](DebouncedWriter::schedule) replaces the pending snapshot
//! and restarts the quiescence timer. When the timer elapses with no newer
//! schedule, the latest snapshot is written exactly once.

use super::BlobStore;
use crate::error::{KanbanError, Result};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, trace};

/// Coalesces rapid writes of one blob key into a single deferred write
#[derive(Clone)]
pub struct DebouncedWriter {
    inner: Arc<Inner>,
}

struct Inner {
    blob: Arc<dyn BlobStore>,
    key: String,
    quiescence: Duration,
    state: Mutex<State>,
    /// Held for the whole claim-and-write step so writes land in schedule order
    write_gate: tokio::sync::Mutex<()>,
}

#[derive(Default)]
struct State {
    generation: u64,
    pending: Option<Pending>,
    last_error: Option<KanbanError>,
    writes: u64,
}

struct Pending {
    generation: u64,
    payload: String,
    timer: JoinHandle<()>,
}

impl DebouncedWriter {
    pub fn new(blob: Arc<dyn BlobStore>, key: impl Into<String>, quiescence: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                blob,
                key: key.into(),
                quiescence,
                state: Mutex::new(State::default()),
                write_gate: tokio::sync::Mutex::new(()),
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    pub fn quiescence(&self) -> Duration {
        self.inner.quiescence
    }

    /// Schedule `payload` to be written after the quiescence window,
    /// cancelling any earlier schedule that has not started writing.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, payload: String) {
        let mut state = self.inner.lock_state();
        state.generation += 1;
        let generation = state.generation;

        if let Some(previous) = state.pending.take() {
            trace!(
                superseded = previous.generation,
                generation,
                "Superseding pending write"
            );
            previous.timer.abort();
        }

        let inner = Arc::clone(&self.inner);
        let quiescence = self.inner.quiescence;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(quiescence).await;
            inner.write_if_current(generation).await;
        });

        state.pending = Some(Pending {
            generation,
            payload,
            timer,
        });
    }

    /// Write the pending snapshot now, if any, and wait for any write already
    /// in flight. Returns the first failure not yet reported.
    pub async fn flush(&self) -> Result<()> {
        let _gate = self.inner.write_gate.lock().await;

        let pending = self.inner.lock_state().pending.take();
        if let Some(pending) = pending {
            pending.timer.abort();
            debug!(generation = pending.generation, key = %self.inner.key, "Flushing pending write");
            if let Err(e) = self.inner.write_payload(&pending.payload).await {
                // supersedes any older background failure
                self.inner.lock_state().last_error = None;
                return Err(e);
            }
        }

        match self.take_error() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Latest value of the key: the pending snapshot if one is waiting,
    /// otherwise what the blob store holds
    pub async fn read(&self) -> Result<Option<String>> {
        let pending = self
            .inner
            .lock_state()
            .pending
            .as_ref()
            .map(|p| p.payload.clone());
        match pending {
            Some(payload) => Ok(Some(payload)),
            None => self.inner.blob.read(&self.inner.key).await,
        }
    }

    /// True while a snapshot is waiting for its timer
    pub fn has_pending(&self) -> bool {
        self.inner.lock_state().pending.is_some()
    }

    /// Number of writes that reached the blob store
    pub fn write_count(&self) -> u64 {
        self.inner.lock_state().writes
    }

    /// Failure from a background write, cleared once taken
    pub fn take_error(&self) -> Option<KanbanError> {
        self.inner.lock_state().last_error.take()
    }
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, State> {
        // A panic while holding the lock cannot leave State half-updated
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn write_if_current(&self, generation: u64) {
        let _gate = self.write_gate.lock().await;

        let payload = {
            let mut state = self.lock_state();
            match &state.pending {
                Some(pending) if pending.generation == generation => {
                    state.pending.take().map(|p| p.payload)
                }
                _ => None,
            }
        };

        let Some(payload) = payload else {
            trace!(generation, "Timer fired for a superseded write");
            return;
        };

        debug!(generation, key = %self.key, bytes = payload.len(), "Writing debounced snapshot");
        if let Err(e) = self.write_payload(&payload).await {
            error!(key = %self.key, "Debounced write failed: {}", e);
            self.lock_state().last_error = Some(e);
        }
    }

    async fn write_payload(&self, payload: &str) -> Result<()> {
        self.blob.write(&self.key, payload).await?;
        self.lock_state().writes += 1;
        Ok(())
    }
}
