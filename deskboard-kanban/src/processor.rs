//! Operation processor with an activity log
//!
//! Every command goes through [`OperationProcessor::process`], which times it,
//! emits tracing events and records mutating commands in a bounded activity
//! log (newest first). The log can optionally be journaled to a blob key so it
//! survives restarts; journal writes are debounced like board snapshots.

use crate::error::Result;
use crate::operation::Execute;
use crate::storage::{BlobStore, DebouncedWriter};
use crate::store::BoardStore;
use crate::types::{LogEntry, OperationOutcome};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{debug, warn};

/// Entries kept when no capacity is given
pub const DEFAULT_ACTIVITY_CAPACITY: usize = 200;

/// Blob key for the activity journal
pub const ACTIVITY_KEY: &str = "kanban_activity";

/// Runs commands against a shared board store
pub struct OperationProcessor {
    store: Arc<BoardStore>,
    activity: Mutex<VecDeque<LogEntry>>,
    capacity: usize,
    journal: Option<DebouncedWriter>,
}

impl OperationProcessor {
    pub fn new(store: Arc<BoardStore>) -> Self {
        Self {
            store,
            activity: Mutex::new(VecDeque::new()),
            capacity: DEFAULT_ACTIVITY_CAPACITY,
            journal: None,
        }
    }

    /// Keep at most `capacity` entries (minimum one)
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Mirror the activity log to `key` in `blob`, using the store's
    /// debounce window
    pub fn with_journal(mut self, blob: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        let quiescence = self.store.settings().debounce;
        self.journal = Some(DebouncedWriter::new(blob, key, quiescence));
        self
    }

    pub fn store(&self) -> &Arc<BoardStore> {
        &self.store
    }

    /// Load journaled entries, replacing the in-memory log.
    ///
    /// An unreadable journal is logged and ignored; activity is not worth
    /// failing startup for.
    pub async fn load_activity(&self) -> Result<usize> {
        let Some(journal) = &self.journal else {
            return Ok(0);
        };
        let Some(raw) = journal.read().await? else {
            return Ok(0);
        };

        let entries: Vec<LogEntry> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(key = %journal.key(), "Ignoring unreadable activity journal: {}", e);
                return Ok(0);
            }
        };

        let mut activity = self.lock_activity();
        *activity = entries.into_iter().take(self.capacity).collect();
        Ok(activity.len())
    }

    /// Execute a command, recording it unless it is read-only
    pub async fn process<T: Execute>(&self, operation: &T) -> Result<T::Output> {
        let op = operation.op_string();
        let start = Instant::now();
        let result = operation.execute(&self.store).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let outcome = match &result {
            Ok(output) => {
                let outcome = operation.outcome(output);
                debug!(op = %op, duration_ms, ?outcome, "Operation completed");
                outcome
            }
            Err(e) => {
                warn!(op = %op, kind = %e.kind(), duration_ms, "Operation failed: {}", e);
                OperationOutcome::Failed {
                    kind: e.kind().to_string(),
                    error: e.to_string(),
                }
            }
        };

        if !operation.is_read_only() {
            let input = serde_json::to_value(operation).unwrap_or(Value::Null);
            let entry = LogEntry::new(
                op,
                operation.board_id().cloned(),
                input,
                outcome,
                duration_ms,
            );
            self.record(entry);
        }

        result
    }

    /// Recorded entries, newest first
    pub fn activity(&self, limit: Option<usize>) -> Vec<LogEntry> {
        let activity = self.lock_activity();
        let limit = limit.unwrap_or(activity.len());
        activity.iter().take(limit).cloned().collect()
    }

    pub fn clear_activity(&self) {
        self.lock_activity().clear();
    }

    /// Write any pending journal snapshot now
    pub async fn flush_activity(&self) -> Result<()> {
        match &self.journal {
            Some(journal) => journal.flush().await,
            None => Ok(()),
        }
    }

    fn record(&self, entry: LogEntry) {
        let snapshot = {
            let mut activity = self.lock_activity();
            activity.push_front(entry);
            activity.truncate(self.capacity);
            match &self.journal {
                Some(_) => serde_json::to_string(&*activity).ok(),
                None => None,
            }
        };

        if let (Some(journal), Some(payload)) = (&self.journal, snapshot) {
            journal.schedule(payload);
            if let Some(e) = journal.take_error() {
                warn!(key = %journal.key(), "Failed to journal activity: {}", e);
            }
        }
    }

    fn lock_activity(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        self.activity
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
