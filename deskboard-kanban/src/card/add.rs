//! AddCard command

use crate::error::{KanbanError, Result};
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::{Assignee, BoardId, Card, ColumnId, Priority};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Add a card to the end of a column
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddCard {
    pub board_id: BoardId,
    /// Column the card starts in; also its status
    pub column: ColumnId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Assignee>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

operation!(AddCard {
    verb: "add",
    noun: "card",
    description: "Add a card to a column",
    board: board_id,
});

impl AddCard {
    pub fn new(board_id: impl Into<BoardId>, column: ColumnId, title: impl Into<String>) -> Self {
        Self {
            board_id: board_id.into(),
            column,
            title: title.into(),
            description: None,
            priority: None,
            due_date: None,
            assignee: None,
            tags: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignee = Some(assignee);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    fn build(&self) -> Result<Card> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(KanbanError::invalid_value("title", "must not be empty"));
        }

        let mut card = Card::new(title, self.column)
            .with_priority(self.priority.unwrap_or_default())
            .with_tags(self.tags.iter().map(String::as_str));
        card.description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        card.due_date = self.due_date;
        card.assignee = self.assignee.clone();
        Ok(card)
    }
}

#[async_trait]
impl Execute for AddCard {
    type Output = Card;

    async fn execute(&self, store: &BoardStore) -> Result<Card> {
        let card = self.build()?;

        store
            .update_board(&self.board_id, |board| {
                board.column_mut(self.column)?.cards.push(card.clone());
                Ok(true)
            })
            .await?;

        Ok(card)
    }
}
