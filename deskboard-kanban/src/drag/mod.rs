//! Drag-and-drop interaction
//!
//! [`DragController`] turns drag gestures into [`MoveCard`](crate::card::MoveCard)
//! commands. Transient drag state (the card being dragged, the highlighted
//! column) lives only in the controller and never reaches the board model.
//! Drawing is delegated to a [`DragRenderer`].

mod controller;
mod renderer;

pub use controller::{ActiveDrag, DragController, DropOutcome, CLICK_GUARD};
pub use renderer::{DragRenderer, NoopRenderer, RecordingRenderer, RenderEvent};
