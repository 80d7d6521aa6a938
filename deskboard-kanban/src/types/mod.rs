//! Core types for the kanban engine

mod board;
mod card;
mod clock;
mod ids;
mod log;

pub use board::{Board, Column};
pub use card::{Assignee, Card, Priority};
pub(crate) use card::normalize_tags;
pub use ids::{AssigneeId, BoardId, CardId, ColumnId, LogEntryId};
pub use log::{LogEntry, OperationOutcome};
