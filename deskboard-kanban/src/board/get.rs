//! GetBoard command

use crate::error::Result;
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::{Board, BoardId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Fetch one board
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetBoard {
    pub board_id: BoardId,
}

operation!(GetBoard {
    verb: "get",
    noun: "board",
    description: "Retrieve a board with its columns and cards",
    board: board_id,
    read_only: true,
});

impl GetBoard {
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: board_id.into(),
        }
    }
}

#[async_trait]
impl Execute for GetBoard {
    type Output = Board;

    async fn execute(&self, store: &BoardStore) -> Result<Board> {
        store.get_board(&self.board_id).await
    }
}
