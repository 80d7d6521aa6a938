//! `deskboard column` - edit column presentation

use anyhow::{bail, Result};
use deskboard_kanban::column::UpdateColumn;

use crate::app::{parse_column, App};
use crate::cli::ColumnAction;

pub async fn run_column(app: &App, action: ColumnAction) -> Result<()> {
    match action {
        ColumnAction::Edit {
            board,
            column,
            title,
            color,
        } => {
            if title.is_none() && color.is_none() {
                bail!("nothing to change; pass --title and/or --color");
            }

            let board = app.resolve_board(&board).await?;
            let mut command = UpdateColumn::new(board.id, parse_column(&column)?);
            if let Some(title) = title {
                command = command.with_title(title);
            }
            if let Some(color) = color {
                command = command.with_color(color);
            }

            let updated = app.processor.process(&command).await?;
            app.emit(&updated, || {
                println!("{}: '{}' {}", updated.id, updated.title, updated.color)
            })
        }
    }
}
