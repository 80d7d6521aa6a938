//! Log entry types for activity tracking

use super::ids::{BoardId, LogEntryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How an operation ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OperationOutcome {
    /// Mutation applied
    Applied,
    /// Ran successfully but changed nothing
    Unchanged,
    /// Rejected or failed; `kind` is the error classification
    Failed { kind: String, error: String },
}

impl OperationOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// A log entry recording an operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique ID for this log entry
    pub id: LogEntryId,

    /// When the operation finished
    pub timestamp: DateTime<Utc>,

    /// Canonical op string (e.g., "move card")
    pub op: String,

    /// Board the operation targeted, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_id: Option<BoardId>,

    /// The operation's parameters
    pub input: Value,

    pub outcome: OperationOutcome,

    /// How long the operation took
    pub duration_ms: u64,
}

impl LogEntry {
    /// Create a new log entry
    pub fn new(
        op: impl Into<String>,
        board_id: Option<BoardId>,
        input: Value,
        outcome: OperationOutcome,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: LogEntryId::new(),
            timestamp: Utc::now(),
            op: op.into(),
            board_id,
            input,
            outcome,
            duration_ms,
        }
    }
}
