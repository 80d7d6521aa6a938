//! Deskboard CLI library
//!
//! Exposes the CLI definition and command handlers so integration tests can
//! drive them without spawning the binary.

pub mod activity;
pub mod app;
pub mod boards;
pub mod cards;
pub mod cli;
pub mod columns;
pub mod table;
pub mod window;

pub use app::{settle, App};
pub use cli::{BoardAction, CardAction, Cli, ColumnAction, Commands};

use anyhow::Result;

/// Run one parsed command against an opened app
pub async fn dispatch(app: &App, command: Commands) -> Result<()> {
    match command {
        Commands::Boards { action } => boards::run_boards(app, action).await,
        Commands::Cards { action } => cards::run_cards(app, action).await,
        Commands::Column { action } => columns::run_column(app, action).await,
        Commands::Window {
            board,
            column,
            scroll,
            viewport,
            row_height,
            overscan,
        } => {
            let args = window::WindowArgs {
                scroll,
                viewport,
                row_height,
                overscan,
            };
            window::run_window(app, &board, &column, args).await
        }
        Commands::Activity { limit } => activity::run_activity(app, limit),
    }
}
