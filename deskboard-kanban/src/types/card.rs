//! Card types: Card, Priority, Assignee

use super::ids::{AssigneeId, CardId, ColumnId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Card urgency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = crate::error::KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            other => Err(crate::error::KanbanError::invalid_value(
                "priority",
                format!("'{other}' is not one of low, medium, high, urgent"),
            )),
        }
    }
}

/// Person a card is assigned to. A copy of directory data, not a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub id: AssigneeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Assignee {
    pub fn new(id: impl Into<AssigneeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// A unit of work on the board.
///
/// `status` always names the column whose sequence holds the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ColumnId,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Assignee>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<u32>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Card {
    /// Create a new card with a fresh id in the given column
    pub fn new(title: impl Into<String>, status: ColumnId) -> Self {
        Self {
            id: CardId::new(),
            title: title.into(),
            description: None,
            status,
            priority: Priority::default(),
            due_date: None,
            assignee: None,
            tags: Vec::new(),
            attachments: None,
            comments: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<CardId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
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
        self.tags = normalize_tags(tags);
        self
    }

    pub fn with_counters(mut self, attachments: u32, comments: u32) -> Self {
        self.attachments = Some(attachments);
        self.comments = Some(comments);
        self
    }

    /// Mark the card as edited now
    pub fn touch(&mut self) {
        self.updated_at = Some(super::clock::advance(self.updated_at.or(Some(self.created_at))));
    }

    /// Latest of creation and update time
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// Trim, drop empties and de-duplicate while keeping first-seen order
pub(crate) fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.into().trim().to_string();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_creation() {
        let card = Card::new("Write release notes", ColumnId::Todo);
        assert_eq!(card.status, ColumnId::Todo);
        assert_eq!(card.priority, Priority::Medium);
        assert!(card.updated_at.is_none());
        assert_eq!(card.last_modified(), card.created_at);
    }

    #[test]
    fn test_card_serializes_camel_case_and_skips_empty() {
        let card = Card::new("Ship", ColumnId::InProgress)
            .with_id("card-1")
            .with_due_date(NaiveDate::from_ymd_opt(2026, 11, 2).unwrap());
        let json = serde_json::to_value(&card).unwrap();

        assert_eq!(json["status"], "in-progress");
        assert_eq!(json["dueDate"], "2026-11-02");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_none());
        assert!(json.get("tags").is_none());
        assert!(json.get("assignee").is_none());
    }

    #[test]
    fn test_card_reads_minimal_json() {
        let json = r#"{
            "id": "c1",
            "title": "Minimal",
            "status": "backlog",
            "createdAt": "2026-01-05T09:00:00Z"
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.priority, Priority::Medium);
        assert!(card.tags.is_empty());
    }

    #[test]
    fn test_tags_are_normalized() {
        let card = Card::new("Tags", ColumnId::Todo).with_tags([" ui ", "api", "", "ui"]);
        assert_eq!(card.tags, vec!["ui".to_string(), "api".to_string()]);
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!("URGENT".parse::<Priority>().unwrap(), Priority::Urgent);
        assert!("critical".parse::<Priority>().is_err());
    }

    #[test]
    fn test_touch_sets_updated_at() {
        let mut card = Card::new("Touch", ColumnId::Todo);
        card.touch();
        assert!(card.updated_at.is_some());
        assert!(card.last_modified() >= card.created_at);
    }
}
