//! DeleteCard command

use crate::error::{KanbanError, Result};
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::{BoardId, Card, CardId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Remove a card from whichever column holds it
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteCard {
    pub board_id: BoardId,
    pub card_id: CardId,
}

operation!(DeleteCard {
    verb: "delete",
    noun: "card",
    description: "Delete a card",
    board: board_id,
});

impl DeleteCard {
    pub fn new(board_id: impl Into<BoardId>, card_id: impl Into<CardId>) -> Self {
        Self {
            board_id: board_id.into(),
            card_id: card_id.into(),
        }
    }
}

#[async_trait]
impl Execute for DeleteCard {
    type Output = Card;

    async fn execute(&self, store: &BoardStore) -> Result<Card> {
        let mut removed = None;

        store
            .update_board(&self.board_id, |board| {
                let (column, index) =
                    board
                        .locate_card(&self.card_id)
                        .ok_or_else(|| KanbanError::CardNotFound {
                            id: self.card_id.to_string(),
                        })?;
                removed = Some(board.column_mut(column)?.cards.remove(index));
                Ok(true)
            })
            .await?;

        removed.ok_or_else(|| KanbanError::CardNotFound {
            id: self.card_id.to_string(),
        })
    }
}
