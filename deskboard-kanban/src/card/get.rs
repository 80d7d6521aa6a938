//! GetCard command

use crate::error::{KanbanError, Result};
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::{BoardId, Card, CardId, ColumnId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Look up a card and where it sits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetCard {
    pub board_id: BoardId,
    pub card_id: CardId,
}

operation!(GetCard {
    verb: "get",
    noun: "card",
    description: "Retrieve a card with its column and position",
    board: board_id,
    read_only: true,
});

/// A card together with its column and index in that column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardLocation {
    pub card: Card,
    pub column: ColumnId,
    pub index: usize,
}

impl GetCard {
    pub fn new(board_id: impl Into<BoardId>, card_id: impl Into<CardId>) -> Self {
        Self {
            board_id: board_id.into(),
            card_id: card_id.into(),
        }
    }
}

#[async_trait]
impl Execute for GetCard {
    type Output = CardLocation;

    async fn execute(&self, store: &BoardStore) -> Result<CardLocation> {
        let board = store.get_board(&self.board_id).await?;
        let (column, index) =
            board
                .locate_card(&self.card_id)
                .ok_or_else(|| KanbanError::CardNotFound {
                    id: self.card_id.to_string(),
                })?;
        let card = board.column(column)?.cards[index].clone();
        Ok(CardLocation {
            card,
            column,
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBlobStore;
    use crate::store::StoreSettings;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_card() {
        let store = BoardStore::open(Arc::new(MemoryBlobStore::new()), StoreSettings::default())
            .await
            .unwrap();
        let board = store.list_boards().await.unwrap().remove(0);
        let expected = board.column(ColumnId::Todo).unwrap().cards[1].clone();

        let found = GetCard::new(board.id.clone(), expected.id.clone())
            .execute(&store)
            .await
            .unwrap();
        assert_eq!(found.card, expected);
        assert_eq!(found.column, ColumnId::Todo);
        assert_eq!(found.index, 1);

        let missing = GetCard::new(board.id.clone(), "ghost").execute(&store).await;
        assert!(matches!(missing, Err(KanbanError::CardNotFound { .. })));
    }
}
