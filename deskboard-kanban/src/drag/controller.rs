//! Drag state machine: Idle -> Dragging -> Idle

use super::renderer::{DragRenderer, NoopRenderer};
use crate::card::{MoveCard, MoveOutcome};
use crate::error::KanbanError;
use crate::processor::OperationProcessor;
use crate::types::{Board, BoardId, CardId, ColumnId};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

/// Clicks arriving this soon after a drag ends are the drag's own pointer-up
pub const CLICK_GUARD: Duration = Duration::from_millis(100);

/// The drag in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDrag {
    pub board_id: BoardId,
    pub card_id: CardId,
    pub source: ColumnId,
    /// Column currently highlighted as the drop target
    pub over: Option<ColumnId>,
}

/// What a drop did
#[derive(Debug)]
pub enum DropOutcome {
    /// The card moved; the board as it now stands
    Moved(Board),
    /// Dropped where it already was
    Unchanged(Board),
    /// The card moved in the store but the write failed; `board` is the
    /// moved board the UI should show
    Unpersisted { board: Board, error: KanbanError },
    /// The move was rejected; nothing changed
    Failed(KanbanError),
    /// No drag was active
    Ignored,
}

impl DropOutcome {
    /// The UI boolean: true only when the card moved
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved(_) | Self::Unpersisted { .. })
    }

    pub fn board(&self) -> Option<&Board> {
        match self {
            Self::Moved(board) | Self::Unchanged(board) | Self::Unpersisted { board, .. } => {
                Some(board)
            }
            Self::Failed(_) | Self::Ignored => None,
        }
    }
}

/// Owns the single active drag and forwards drops to the move engine
pub struct DragController<R: DragRenderer = NoopRenderer> {
    processor: Arc<OperationProcessor>,
    renderer: R,
    active: Option<ActiveDrag>,
    ended_at: Option<Instant>,
}

impl DragController<NoopRenderer> {
    pub fn new(processor: Arc<OperationProcessor>) -> Self {
        Self::with_renderer(processor, NoopRenderer)
    }
}

impl<R: DragRenderer> DragController<R> {
    pub fn with_renderer(processor: Arc<OperationProcessor>, renderer: R) -> Self {
        Self {
            processor,
            renderer,
            active: None,
            ended_at: None,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    /// Pick up `card_id` from `column` on `board`.
    ///
    /// Refused when another drag is active or the card is not in that column.
    pub fn on_drag_start(&mut self, board: &Board, card_id: &CardId, column: ColumnId) -> bool {
        if let Some(active) = &self.active {
            debug!(active = %active.card_id, requested = %card_id, "Drag already in progress");
            return false;
        }

        let Some(card) = board
            .find_column(column)
            .and_then(|c| c.find_card(card_id))
        else {
            debug!(card = %card_id, column = %column, "Drag start on a card not in that column");
            return false;
        };

        trace!(card = %card_id, source = %column, "Drag started");
        self.renderer.show_drag_image(card);
        self.active = Some(ActiveDrag {
            board_id: board.id.clone(),
            card_id: card_id.clone(),
            source: column,
            over: None,
        });
        true
    }

    /// Pointer moved over `column`. Returns whether the highlight changed.
    pub fn on_drag_over(&mut self, column: ColumnId) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if active.over == Some(column) {
            return false;
        }

        if let Some(previous) = active.over.replace(column) {
            self.renderer.set_drop_highlight(previous, false);
        }
        self.renderer.set_drop_highlight(column, true);
        true
    }

    /// Pointer left `column`
    pub fn on_drag_leave(&mut self, column: ColumnId) {
        if let Some(active) = self.active.as_mut() {
            if active.over == Some(column) {
                active.over = None;
                self.renderer.set_drop_highlight(column, false);
            }
        }
    }

    /// Release over `column`, optionally at a position within it.
    ///
    /// Transient state is cleared before the move runs, so it is gone
    /// whatever the outcome.
    pub async fn on_drop(&mut self, column: ColumnId, index: Option<usize>) -> DropOutcome {
        let Some(active) = self.end() else {
            return DropOutcome::Ignored;
        };
        // a drop can land without a preceding drag-over
        self.renderer.set_drop_highlight(column, false);

        let mut command = MoveCard::new(active.board_id, active.card_id, active.source, column);
        command.dest_index = index;

        match self.processor.process(&command).await {
            Ok(MoveOutcome::Moved(board)) => DropOutcome::Moved(board),
            Ok(MoveOutcome::Unchanged(board)) => DropOutcome::Unchanged(board),
            Err(KanbanError::Unpersisted { board, source }) => {
                warn!(card = %command.card_id, dest = %column, "Drop applied but not saved: {}", source);
                DropOutcome::Unpersisted {
                    board: *board,
                    error: *source,
                }
            }
            Err(e) => {
                warn!(card = %command.card_id, dest = %column, "Drop failed: {}", e);
                DropOutcome::Failed(e)
            }
        }
    }

    /// Drag finished without a drop. Returns whether a drag was cancelled.
    pub fn on_drag_end(&mut self) -> bool {
        match self.end() {
            Some(active) => {
                trace!(card = %active.card_id, "Drag cancelled");
                true
            }
            None => false,
        }
    }

    /// Whether a click on a card should open it.
    ///
    /// Suppressed during a drag and for [`CLICK_GUARD`] after one ends.
    pub fn on_card_click(&mut self) -> bool {
        if self.active.is_some() {
            return false;
        }
        match self.ended_at.take() {
            Some(ended) if ended.elapsed() < CLICK_GUARD => {
                trace!("Click swallowed after drag");
                false
            }
            _ => true,
        }
    }

    /// Clear drag image, highlight and state; returns the finished drag
    fn end(&mut self) -> Option<ActiveDrag> {
        let active = self.active.take()?;
        if let Some(over) = active.over {
            self.renderer.set_drop_highlight(over, false);
        }
        self.renderer.clear_drag_image();
        self.ended_at = Some(Instant::now());
        Some(active)
    }
}
