//! MoveCard command: the move/reorder engine

use crate::error::{KanbanError, Result};
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::{Board, BoardId, CardId, ColumnId, OperationOutcome};
use async_trait::async_trait;
use deskboard_config::InsertPolicy;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Move a card from one column to another, or within a column
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveCard {
    pub board_id: BoardId,
    pub card_id: CardId,
    /// Column the card is expected to be in
    pub source: ColumnId,
    /// Column to move the card to
    pub dest: ColumnId,
    /// Requested position in the destination. Only honored under the
    /// `at-index` insert policy; `append` always places the card last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_index: Option<usize>,
}

operation!(MoveCard {
    verb: "move",
    noun: "card",
    description: "Move a card to a different column or position",
    board: board_id,
});

impl MoveCard {
    pub fn new(
        board_id: impl Into<BoardId>,
        card_id: impl Into<CardId>,
        source: ColumnId,
        dest: ColumnId,
    ) -> Self {
        Self {
            board_id: board_id.into(),
            card_id: card_id.into(),
            source,
            dest,
            dest_index: None,
        }
    }

    pub fn at_index(mut self, index: usize) -> Self {
        self.dest_index = Some(index);
        self
    }
}

/// Result of a successful move, carrying the board as it now stands
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", content = "board", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The card changed place
    Moved(Board),
    /// Valid request that changed nothing, e.g. a drop on the card's own
    /// column under the append policy
    Unchanged(Board),
}

impl MoveOutcome {
    /// The boolean the UI boundary expects: true only when the card moved
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved(_))
    }

    pub fn board(&self) -> &Board {
        match self {
            Self::Moved(board) | Self::Unchanged(board) => board,
        }
    }

    pub fn into_board(self) -> Board {
        match self {
            Self::Moved(board) | Self::Unchanged(board) => board,
        }
    }
}

/// Relocate a card within `board`. Returns whether anything changed.
///
/// Every lookup and structure check happens before the first mutation, so an
/// error leaves `board` exactly as it was. The caller refreshes the board's
/// own timestamp.
pub fn apply_move(
    board: &mut Board,
    card_id: &CardId,
    source: ColumnId,
    dest: ColumnId,
    dest_index: Option<usize>,
    policy: InsertPolicy,
) -> Result<bool> {
    let position = board
        .column(source)?
        .position_of(card_id)
        .ok_or_else(|| match board.locate_card(card_id) {
            Some(_) => KanbanError::CardNotInColumn {
                card: card_id.to_string(),
                column: source.to_string(),
            },
            None => KanbanError::CardNotFound {
                id: card_id.to_string(),
            },
        })?;
    board.column(dest)?;

    board.validate_column(source)?;
    board.validate_column(dest)?;

    if source == dest {
        return match policy {
            InsertPolicy::Append => Ok(false),
            InsertPolicy::AtIndex => {
                let column = board.column_mut(source)?;
                let last = column.cards.len() - 1;
                let target = dest_index.unwrap_or(last).min(last);
                if target == position {
                    return Ok(false);
                }
                let card = column.cards.remove(position);
                column.cards.insert(target, card);
                Ok(true)
            }
        };
    }

    let mut card = board.column_mut(source)?.cards.remove(position);
    card.status = dest;
    card.touch();

    let column = board.column_mut(dest)?;
    let index = match policy {
        InsertPolicy::Append => column.cards.len(),
        InsertPolicy::AtIndex => dest_index
            .unwrap_or(column.cards.len())
            .min(column.cards.len()),
    };
    column.cards.insert(index, card);
    Ok(true)
}

#[async_trait]
impl Execute for MoveCard {
    type Output = MoveOutcome;

    async fn execute(&self, store: &BoardStore) -> Result<MoveOutcome> {
        let policy = store.insert_policy();
        let (board, moved) = store
            .update_board(&self.board_id, |board| {
                apply_move(
                    board,
                    &self.card_id,
                    self.source,
                    self.dest,
                    self.dest_index,
                    policy,
                )
            })
            .await?;

        debug!(
            card = %self.card_id,
            source = %self.source,
            dest = %self.dest,
            moved,
            "Move applied"
        );

        Ok(if moved {
            MoveOutcome::Moved(board)
        } else {
            MoveOutcome::Unchanged(board)
        })
    }

    fn outcome(&self, output: &MoveOutcome) -> OperationOutcome {
        if output.is_moved() {
            OperationOutcome::Applied
        } else {
            OperationOutcome::Unchanged
        }
    }
}
