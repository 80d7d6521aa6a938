//! `deskboard boards` - list, show, create and delete boards

use anyhow::Result;
use comfy_table::Cell;
use deskboard_kanban::board::{CreateBoard, DeleteBoard, ListBoards};
use deskboard_kanban::Board;

use crate::app::App;
use crate::cli::BoardAction;
use crate::table::{new_table, truncate_str};

pub async fn run_boards(app: &App, action: BoardAction) -> Result<()> {
    match action {
        BoardAction::List => list(app).await,
        BoardAction::Show { board } => show(app, &board).await,
        BoardAction::Create { title, description } => {
            let mut command = CreateBoard::new(title);
            if let Some(description) = description {
                command = command.with_description(description);
            }
            let board = app.processor.process(&command).await?;
            app.emit(&board, || println!("Created board '{}' ({})", board.title, board.id))
        }
        BoardAction::Delete { board } => {
            let board = app.resolve_board(&board).await?;
            let removed = app.processor.process(&DeleteBoard::new(board.id)).await?;
            app.emit(&removed, || {
                println!(
                    "Deleted board '{}' with {} card(s)",
                    removed.title,
                    removed.card_count()
                )
            })
        }
    }
}

async fn list(app: &App) -> Result<()> {
    let boards = app.processor.process(&ListBoards::new()).await?;
    app.emit(&boards, || {
        let mut table = new_table();
        table.set_header(vec!["ID", "Title", "Cards", "Updated"]);
        for board in &boards {
            table.add_row(vec![
                Cell::new(board.id.as_str()),
                Cell::new(truncate_str(&board.title, 40)),
                Cell::new(board.card_count()),
                Cell::new(board.updated_at.format("%Y-%m-%d %H:%M")),
            ]);
        }
        println!("{table}");
    })
}

async fn show(app: &App, key: &str) -> Result<()> {
    let board = app.resolve_board(key).await?;
    app.emit(&board, || print_board(&board))
}

fn print_board(board: &Board) {
    println!("{} ({})", board.title, board.id);
    if let Some(description) = &board.description {
        println!("{description}");
    }

    let mut table = new_table();
    table.set_header(
        board
            .columns
            .iter()
            .map(|c| format!("{} ({})", c.title, c.len())),
    );

    let depth = board.columns.iter().map(|c| c.len()).max().unwrap_or(0);
    for row in 0..depth {
        table.add_row(board.columns.iter().map(|c| {
            c.cards
                .get(row)
                .map(|card| format!("{}\n[{}] {}", truncate_str(&card.title, 28), card.priority, card.id))
                .unwrap_or_default()
        }));
    }
    println!("{table}");
}
