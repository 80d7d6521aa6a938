//! CreateBoard command

use crate::error::Result;
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::Board;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Create a board with the built-in columns
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateBoard {
    /// Board title
    pub title: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

operation!(CreateBoard {
    verb: "create",
    noun: "board",
    description: "Create a board with the default columns",
});

impl CreateBoard {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[async_trait]
impl Execute for CreateBoard {
    type Output = Board;

    async fn execute(&self, store: &BoardStore) -> Result<Board> {
        store
            .create_board(self.title.clone(), self.description.clone())
            .await
    }
}
