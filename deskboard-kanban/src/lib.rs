//! Kanban board engine for the Deskboard admin app
//!
//! This crate holds the board model and everything that changes it: a board
//! store persisted through a debounced key-value blob write, the move/reorder
//! engine, a drag-and-drop state machine and the arithmetic for virtualized
//! card lists.
//!
//! ## Overview
//!
//! - **One blob, all boards** - Every board is serialized into a single JSON
//!   array under one key (`kanban_boards` by default)
//! - **Optimistic** - Mutations apply in memory at once; the write follows
//!   after a quiet period (300 ms by default), coalescing bursts into one
//! - **Status is placement** - A card's `status` is always the id of the
//!   column holding it
//! - **Commands** - Every operation is a struct implementing [`Execute`],
//!   run through an [`OperationProcessor`] that keeps an activity log
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use deskboard_kanban::{
//!     card::MoveCard, BoardStore, ColumnId, MemoryBlobStore, OperationProcessor,
//!     StoreSettings,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = BoardStore::open(Arc::new(MemoryBlobStore::new()), StoreSettings::default()).await?;
//! let processor = OperationProcessor::new(Arc::new(store));
//!
//! let board = processor.store().list_boards().await?.remove(0);
//! let card = board.column(ColumnId::Todo)?.cards[0].id.clone();
//!
//! let outcome = processor
//!     .process(&MoveCard::new(board.id.clone(), card, ColumnId::Todo, ColumnId::Done))
//!     .await?;
//! assert!(outcome.is_moved());
//!
//! processor.store().flush().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Stored format
//!
//! ```text
//! kanban_boards   [ Board { id, title, description?, columns: [ Column {
//!                     id, title, color, cards: [ Card { id, title, status,
//!                     priority, dueDate?, assignee?, tags?, ... } ] } ],
//!                     createdAt, updatedAt } ]
//! kanban_activity [ LogEntry, ... ]  newest first, optional journal
//! ```

pub mod defaults;
mod error;
mod operation;
mod processor;
pub mod storage;
mod store;
pub mod types;
pub mod virtual_list;

// Command modules
pub mod board;
pub mod card;
pub mod column;
pub mod drag;

pub use error::{ErrorKind, KanbanError, Result};
pub use operation::{Execute, Operation};
pub use processor::{OperationProcessor, ACTIVITY_KEY, DEFAULT_ACTIVITY_CAPACITY};
pub use storage::{open_blob_store, BlobStore, DebouncedWriter, FileBlobStore, MemoryBlobStore};
pub use store::{BoardStore, StoreSettings};
pub use types::{
    Assignee, AssigneeId, Board, BoardId, Card, CardId, Column, ColumnId, LogEntry, LogEntryId,
    OperationOutcome, Priority,
};
pub use virtual_list::{visible_range, VirtualList, VisibleWindow};

pub use deskboard_config::InsertPolicy;
