//! `deskboard window` - which cards a scrolled column would render

use anyhow::Result;
use comfy_table::Cell;
use deskboard_kanban::{Card, VirtualList, VisibleWindow};
use serde::Serialize;

use crate::app::{parse_column, App};
use crate::table::{new_table, truncate_str};

/// Viewport geometry for one column
pub struct WindowArgs {
    pub scroll: f64,
    pub viewport: f64,
    pub row_height: Option<f64>,
    pub overscan: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WindowReport<'a> {
    window: VisibleWindow,
    total_cards: usize,
    cards: &'a [Card],
}

pub async fn run_window(app: &App, board: &str, column: &str, args: WindowArgs) -> Result<()> {
    let board = app.resolve_board(board).await?;
    let column = board.column(parse_column(column)?)?;

    let settings = &app.config.virtualization;
    let mut list = VirtualList::new(
        args.row_height.unwrap_or(settings.row_height),
        args.overscan.unwrap_or(settings.overscan),
    );
    list.set_len(column.len());
    list.on_resize(args.viewport);
    list.on_scroll(args.scroll);

    let window = list.window();
    let report = WindowReport {
        window,
        total_cards: column.len(),
        cards: list.slice(&column.cards),
    };

    app.emit(&report, || {
        println!(
            "{}: rows {}..{} of {} (offset {}px, total {}px)",
            column.title,
            window.start,
            window.end,
            column.len(),
            window.offset,
            window.total_height
        );
        if window.is_empty() {
            return;
        }
        let mut table = new_table();
        table.set_header(vec!["Row", "Card", "Title"]);
        for (row, card) in (window.start..).zip(report.cards) {
            table.add_row(vec![
                Cell::new(row),
                Cell::new(card.id.as_str()),
                Cell::new(truncate_str(&card.title, 40)),
            ]);
        }
        println!("{table}");
    })
}
