//! `deskboard activity` - recent changes, newest first

use anyhow::Result;
use comfy_table::Cell;
use deskboard_kanban::OperationOutcome;

use crate::app::App;
use crate::table::{new_table, truncate_str};

pub fn run_activity(app: &App, limit: usize) -> Result<()> {
    let entries = app.processor.activity(Some(limit));
    app.emit(&entries, || {
        if entries.is_empty() {
            println!("No activity recorded.");
            return;
        }
        let mut table = new_table();
        table.set_header(vec!["When", "Operation", "Board", "Outcome"]);
        for entry in &entries {
            let outcome = match &entry.outcome {
                OperationOutcome::Applied => "applied".to_string(),
                OperationOutcome::Unchanged => "unchanged".to_string(),
                OperationOutcome::Failed { kind, error } => {
                    format!("{kind}: {}", truncate_str(error, 50))
                }
            };
            table.add_row(vec![
                Cell::new(entry.timestamp.format("%Y-%m-%d %H:%M:%S")),
                Cell::new(&entry.op),
                Cell::new(entry.board_id.as_ref().map(|b| b.as_str()).unwrap_or("-")),
                Cell::new(outcome),
            ]);
        }
        println!("{table}");
    })
}
