//! UpdateBoard command

use crate::error::{KanbanError, Result};
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::{Board, BoardId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Update board title or description
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateBoard {
    pub board_id: BoardId,
    /// New title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description; an empty string clears it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

operation!(UpdateBoard {
    verb: "update",
    noun: "board",
    description: "Update board title or description",
    board: board_id,
});

impl UpdateBoard {
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: board_id.into(),
            title: None,
            description: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[async_trait]
impl Execute for UpdateBoard {
    type Output = Board;

    async fn execute(&self, store: &BoardStore) -> Result<Board> {
        let (board, _) = store
            .update_board(&self.board_id, |board| {
                let mut changed = false;

                if let Some(title) = &self.title {
                    let title = title.trim();
                    if title.is_empty() {
                        return Err(KanbanError::invalid_value("title", "must not be empty"));
                    }
                    if board.title != title {
                        board.title = title.to_string();
                        changed = true;
                    }
                }

                if let Some(description) = &self.description {
                    let description = Some(description.trim())
                        .filter(|d| !d.is_empty())
                        .map(str::to_string);
                    if board.description != description {
                        board.description = description;
                        changed = true;
                    }
                }

                Ok(changed)
            })
            .await?;
        Ok(board)
    }
}
