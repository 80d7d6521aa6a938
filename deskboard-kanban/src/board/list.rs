//! ListBoards command

use crate::error::Result;
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::Board;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// List every board in insertion order
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListBoards {}

operation!(ListBoards {
    verb: "list",
    noun: "boards",
    description: "List all boards",
    read_only: true,
});

impl ListBoards {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl Execute for ListBoards {
    type Output = Vec<Board>;

    async fn execute(&self, store: &BoardStore) -> Result<Vec<Board>> {
        store.list_boards().await
    }
}
