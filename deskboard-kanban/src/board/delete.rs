//! DeleteBoard command

use crate::error::Result;
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::{Board, BoardId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Delete a board and every card on it
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteBoard {
    pub board_id: BoardId,
}

operation!(DeleteBoard {
    verb: "delete",
    noun: "board",
    description: "Delete a board and all of its cards",
    board: board_id,
});

impl DeleteBoard {
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: board_id.into(),
        }
    }
}

#[async_trait]
impl Execute for DeleteBoard {
    type Output = Board;

    async fn execute(&self, store: &BoardStore) -> Result<Board> {
        store.delete_board(&self.board_id).await
    }
}
