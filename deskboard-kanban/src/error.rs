//! Error types for the kanban engine

use crate::types::{Board, BoardId};
use std::fmt;
use thiserror::Error;

/// Result type for kanban operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Errors that can occur in kanban operations
#[derive(Debug, Error)]
pub enum KanbanError {
    /// Board not found
    #[error("board not found: {id}")]
    BoardNotFound { id: String },

    /// Column not found on the board
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Card not found anywhere on the board
    #[error("card not found: {id}")]
    CardNotFound { id: String },

    /// Card exists but not in the column the caller named
    #[error("card '{card}' is not in column '{column}'")]
    CardNotInColumn { card: String, column: String },

    /// Board data violates a structural invariant
    #[error("invalid board structure in '{board}': {message}")]
    InvalidStructure { board: String, message: String },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Duplicate ID
    #[error("duplicate {item_type} ID: {id}")]
    DuplicateId { item_type: String, id: String },

    /// Blob store refused a write because it would exceed its quota
    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Backing store failed for another reason
    #[error("storage failure: {message}")]
    Storage { message: String },

    /// A board mutation was committed in memory but could not be persisted.
    /// `board` is the board as it now stands in the store.
    #[error("changes to board '{}' were applied but not saved: {source}", .board.id)]
    Unpersisted {
        board: Box<Board>,
        source: Box<KanbanError>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification used by callers deciding how to react
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Board, column or card missing
    NotFound,
    /// Stored data is malformed
    InvalidStructure,
    /// Serialization or storage write failure; in-memory state already changed
    PersistenceFailure,
    /// Caller supplied a bad value
    InvalidInput,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidStructure => "invalid_structure",
            Self::PersistenceFailure => "persistence_failure",
            Self::InvalidInput => "invalid_input",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl KanbanError {
    /// Create an invalid structure error for a board
    pub fn invalid_structure(board: &BoardId, message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            board: board.to_string(),
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate ID error
    pub fn duplicate_id(item_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            item_type: item_type.into(),
            id: id.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BoardNotFound { .. }
            | Self::ColumnNotFound { .. }
            | Self::CardNotFound { .. }
            | Self::CardNotInColumn { .. } => ErrorKind::NotFound,
            Self::InvalidStructure { .. } => ErrorKind::InvalidStructure,
            Self::InvalidValue { .. } | Self::DuplicateId { .. } => ErrorKind::InvalidInput,
            Self::QuotaExceeded { .. }
            | Self::Storage { .. }
            | Self::Unpersisted { .. }
            | Self::Io(_)
            | Self::Json(_) => ErrorKind::PersistenceFailure,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_persistence_failure(&self) -> bool {
        self.kind() == ErrorKind::PersistenceFailure
    }

    /// The committed board when the failure came after the mutation applied
    pub fn committed_board(&self) -> Option<&Board> {
        match self {
            Self::Unpersisted { board, .. } => Some(&**board),
            _ => None,
        }
    }
}
