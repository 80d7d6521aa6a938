//! Board-level types: Board, Column

use super::card::Card;
use super::clock;
use super::ids::{BoardId, CardId, ColumnId};
use crate::error::{KanbanError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The kanban board, the unit of persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub columns: Vec<Column>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Create an empty board (no columns) with a fresh id
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: BoardId::new(),
            title: title.into(),
            description: None,
            columns: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: impl Into<BoardId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Record a structural mutation
    pub fn touch(&mut self) {
        self.updated_at = clock::advance(Some(self.updated_at));
    }

    pub fn find_column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn find_column_mut(&mut self, id: ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == id)
    }

    /// Like [`find_column`](Self::find_column) but reports a missing column
    pub fn column(&self, id: ColumnId) -> Result<&Column> {
        self.find_column(id)
            .ok_or_else(|| KanbanError::ColumnNotFound { id: id.to_string() })
    }

    pub fn column_mut(&mut self, id: ColumnId) -> Result<&mut Column> {
        self.find_column_mut(id)
            .ok_or_else(|| KanbanError::ColumnNotFound { id: id.to_string() })
    }

    /// Column and index of a card, searching every column
    pub fn locate_card(&self, card_id: &CardId) -> Option<(ColumnId, usize)> {
        self.columns.iter().find_map(|column| {
            column
                .position_of(card_id)
                .map(|index| (column.id, index))
        })
    }

    pub fn find_card(&self, card_id: &CardId) -> Option<&Card> {
        self.columns.iter().find_map(|c| c.find_card(card_id))
    }

    /// Iterate all cards in column order
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.columns.iter().flat_map(|c| c.cards.iter())
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }

    /// Check one column's sequence: every card's status must name the column
    pub fn validate_column(&self, id: ColumnId) -> Result<()> {
        let column = self.column(id)?;
        if let Some(card) = column.cards.iter().find(|card| card.status != column.id) {
            return Err(KanbanError::invalid_structure(
                &self.id,
                format!(
                    "card '{}' has status '{}' but sits in column '{}'",
                    card.id, card.status, column.id
                ),
            ));
        }
        Ok(())
    }

    /// Check the whole board: unique column ids, status matches the owning
    /// column, and no card appears twice.
    pub fn validate(&self) -> Result<()> {
        let mut columns_seen = HashSet::new();
        let mut cards_seen = HashSet::new();

        for column in &self.columns {
            if !columns_seen.insert(column.id) {
                return Err(KanbanError::invalid_structure(
                    &self.id,
                    format!("column '{}' appears more than once", column.id),
                ));
            }
            self.validate_column(column.id)?;
            for card in &column.cards {
                if !cards_seen.insert(&card.id) {
                    return Err(KanbanError::invalid_structure(
                        &self.id,
                        format!("card '{}' appears more than once", card.id),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// A column is a workflow stage; its id is the status of its cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Display color, e.g. `#3b82f6`
    pub color: String,
    pub cards: Vec<Card>,
}

impl Column {
    pub fn new(id: ColumnId, title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            color: color.into(),
            cards: Vec::new(),
        }
    }

    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    pub fn position_of(&self, card_id: &CardId) -> Option<usize> {
        self.cards.iter().position(|c| &c.id == card_id)
    }

    pub fn find_card(&self, card_id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| &c.id == card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(cards_in_todo: Vec<Card>) -> Board {
        Board::new("Test").with_id("b1").with_columns(vec![
            Column::new(ColumnId::Todo, "To Do", "#3b82f6").with_cards(cards_in_todo),
            Column::new(ColumnId::Done, "Done", "#10b981"),
        ])
    }

    #[test]
    fn test_board_creation() {
        let board = Board::new("Sprint 12");
        assert_eq!(board.title, "Sprint 12");
        assert!(board.description.is_none());
        assert!(board.columns.is_empty());
        assert_eq!(board.created_at, board.updated_at);
    }

    #[test]
    fn test_touch_advances_updated_at() {
        let mut board = Board::new("Test");
        let before = board.updated_at;
        board.touch();
        assert!(board.updated_at > before);
    }

    #[test]
    fn test_locate_card() {
        let card = Card::new("A", ColumnId::Todo).with_id("a");
        let board = board_with(vec![card]);
        assert_eq!(
            board.locate_card(&CardId::from("a")),
            Some((ColumnId::Todo, 0))
        );
        assert_eq!(board.locate_card(&CardId::from("zzz")), None);
        assert_eq!(board.card_count(), 1);
    }

    #[test]
    fn test_validate_accepts_consistent_board() {
        let board = board_with(vec![
            Card::new("A", ColumnId::Todo).with_id("a"),
            Card::new("B", ColumnId::Todo).with_id("b"),
        ]);
        board.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_status_mismatch() {
        let board = board_with(vec![Card::new("A", ColumnId::Done).with_id("a")]);
        let err = board.validate().unwrap_err();
        assert!(matches!(err, KanbanError::InvalidStructure { .. }));
        assert!(err.to_string().contains("status 'done'"));
    }

    #[test]
    fn test_validate_rejects_duplicate_card() {
        let mut board = board_with(vec![Card::new("A", ColumnId::Todo).with_id("a")]);
        board.columns[1]
            .cards
            .push(Card::new("A again", ColumnId::Done).with_id("a"));
        assert!(matches!(
            board.validate(),
            Err(KanbanError::InvalidStructure { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_column() {
        let mut board = board_with(Vec::new());
        board
            .columns
            .push(Column::new(ColumnId::Todo, "Also To Do", "#000000"));
        assert!(board.validate().is_err());
    }

    #[test]
    fn test_board_json_round_trip_keeps_card_order() {
        let board = board_with(vec![
            Card::new("First", ColumnId::Todo).with_id("1"),
            Card::new("Second", ColumnId::Todo).with_id("2"),
            Card::new("Third", ColumnId::Todo).with_id("3"),
        ]);
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.contains("\"createdAt\""));
        let parsed: Board = serde_json::from_str(&json).unwrap();
        let ids: Vec<&str> = parsed.columns[0]
            .cards
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_column_without_cards_field_is_rejected() {
        let json = r##"{"id": "todo", "title": "To Do", "color": "#fff"}"##;
        assert!(serde_json::from_str::<Column>(json).is_err());
    }
}
