//! Built-in columns and the first-run sample board.
//!
//! `default_columns()` is the column set every new board starts with.
//! `seed_board()` is written once when the store finds no boards at all.

use crate::types::{Assignee, Board, Card, Column, ColumnId, Priority};

/// Title of the board created on first run
pub const SEED_BOARD_TITLE: &str = "Project Board";

/// Display title and color for each built-in column
pub fn column_style(id: ColumnId) -> (&'static str, &'static str) {
    match id {
        ColumnId::Backlog => ("Backlog", "#6b7280"),
        ColumnId::Todo => ("To Do", "#3b82f6"),
        ColumnId::InProgress => ("In Progress", "#f59e0b"),
        ColumnId::Review => ("Review", "#8b5cf6"),
        ColumnId::Done => ("Done", "#10b981"),
    }
}

/// One empty column per workflow stage, in workflow order
pub fn default_columns() -> Vec<Column> {
    ColumnId::ALL
        .iter()
        .map(|&id| {
            let (title, color) = column_style(id);
            Column::new(id, title, color)
        })
        .collect()
}

/// Sample board shown on first run
pub fn seed_board() -> Board {
    let sample = |id: ColumnId| -> Vec<Card> {
        match id {
            ColumnId::Backlog => vec![
                Card::new("Evaluate payroll export formats", id)
                    .with_priority(Priority::Low)
                    .with_tags(["research"]),
            ],
            ColumnId::Todo => vec![
                Card::new("Draft onboarding checklist", id)
                    .with_description("Steps for new hires in their first week")
                    .with_priority(Priority::High)
                    .with_assignee(Assignee::new("emp-001", "Dana Whitfield"))
                    .with_tags(["hr", "docs"]),
                Card::new("Review department budgets", id).with_priority(Priority::Medium),
            ],
            ColumnId::InProgress => vec![Card::new("Migrate employee directory", id)
                .with_priority(Priority::Urgent)
                .with_assignee(Assignee::new("emp-002", "Sam Okafor"))
                .with_counters(2, 5)],
            ColumnId::Review => vec![Card::new("Quarterly access audit", id)
                .with_priority(Priority::High)
                .with_tags(["security"])],
            ColumnId::Done => vec![Card::new("Set up project workspace", id)],
        }
    };

    let columns = default_columns()
        .into_iter()
        .map(|column| {
            let cards = sample(column.id);
            column.with_cards(cards)
        })
        .collect();

    Board::new(SEED_BOARD_TITLE)
        .with_description("Sample board created on first run")
        .with_columns(columns)
}
