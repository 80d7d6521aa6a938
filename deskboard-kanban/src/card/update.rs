//! UpdateCard command

use crate::error::{KanbanError, Result};
use crate::operation::{operation, Execute};
use crate::store::BoardStore;
use crate::types::{normalize_tags, Assignee, BoardId, Card, CardId, Priority};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Edit card fields. Unset fields are left alone.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateCard {
    pub board_id: BoardId,
    pub card_id: CardId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description; an empty string clears it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub clear_due_date: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Assignee>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub clear_assignee: bool,
    /// Replacement tag set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<u32>,
}

operation!(UpdateCard {
    verb: "update",
    noun: "card",
    description: "Edit a card's fields",
    board: board_id,
});

impl UpdateCard {
    pub fn new(board_id: impl Into<BoardId>, card_id: impl Into<CardId>) -> Self {
        Self {
            board_id: board_id.into(),
            card_id: card_id.into(),
            ..Self::default()
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

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn clearing_due_date(mut self) -> Self {
        self.clear_due_date = true;
        self
    }

    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignee = Some(assignee);
        self
    }

    pub fn clearing_assignee(mut self) -> Self {
        self.clear_assignee = true;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_counters(mut self, attachments: u32, comments: u32) -> Self {
        self.attachments = Some(attachments);
        self.comments = Some(comments);
        self
    }

    /// Apply the edits to `card`, returning whether any field changed
    fn apply(&self, card: &mut Card) -> Result<bool> {
        let before = card.clone();

        if let Some(title) = &self.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(KanbanError::invalid_value("title", "must not be empty"));
            }
            card.title = title.to_string();
        }
        if let Some(description) = &self.description {
            let description = description.trim();
            card.description = (!description.is_empty()).then(|| description.to_string());
        }
        if let Some(priority) = self.priority {
            card.priority = priority;
        }
        if self.clear_due_date {
            card.due_date = None;
        } else if let Some(due) = self.due_date {
            card.due_date = Some(due);
        }
        if self.clear_assignee {
            card.assignee = None;
        } else if let Some(assignee) = &self.assignee {
            card.assignee = Some(assignee.clone());
        }
        if let Some(tags) = &self.tags {
            card.tags = normalize_tags(tags.iter().map(String::as_str));
        }
        if let Some(attachments) = self.attachments {
            card.attachments = Some(attachments);
        }
        if let Some(comments) = self.comments {
            card.comments = Some(comments);
        }

        if *card == before {
            return Ok(false);
        }
        card.touch();
        Ok(true)
    }
}

#[async_trait]
impl Execute for UpdateCard {
    type Output = Card;

    async fn execute(&self, store: &BoardStore) -> Result<Card> {
        let (board, _) = store
            .update_board(&self.board_id, |board| {
                let (column, index) =
                    board
                        .locate_card(&self.card_id)
                        .ok_or_else(|| KanbanError::CardNotFound {
                            id: self.card_id.to_string(),
                        })?;
                let card = &mut board.column_mut(column)?.cards[index];
                self.apply(card)
            })
            .await?;

        board
            .find_card(&self.card_id)
            .cloned()
            .ok_or_else(|| KanbanError::CardNotFound {
                id: self.card_id.to_string(),
            })
    }
}
