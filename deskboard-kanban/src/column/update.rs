//! UpdateColumn command

use crate::error::{KanbanError, Result};
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::{BoardId, Column, ColumnId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Change a column's display title or color
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateColumn {
    pub board_id: BoardId,
    pub column: ColumnId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// CSS color, e.g. `#3b82f6`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

operation!(UpdateColumn {
    verb: "update",
    noun: "column",
    description: "Update a column's title or color",
    board: board_id,
});

impl UpdateColumn {
    pub fn new(board_id: impl Into<BoardId>, column: ColumnId) -> Self {
        Self {
            board_id: board_id.into(),
            column,
            title: None,
            color: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[async_trait]
impl Execute for UpdateColumn {
    type Output = Column;

    async fn execute(&self, store: &BoardStore) -> Result<Column> {
        let (board, _) = store
            .update_board(&self.board_id, |board| {
                let column = board.column_mut(self.column)?;
                let mut changed = false;

                if let Some(title) = &self.title {
                    let title = title.trim();
                    if title.is_empty() {
                        return Err(KanbanError::invalid_value("title", "must not be empty"));
                    }
                    if column.title != title {
                        column.title = title.to_string();
                        changed = true;
                    }
                }
                if let Some(color) = &self.color {
                    let color = color.trim();
                    if color.is_empty() {
                        return Err(KanbanError::invalid_value("color", "must not be empty"));
                    }
                    if column.color != color {
                        column.color = color.to_string();
                        changed = true;
                    }
                }

                Ok(changed)
            })
            .await?;

        board.column(self.column).cloned()
    }
}
