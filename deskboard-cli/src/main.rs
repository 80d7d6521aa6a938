//! Deskboard CLI - kanban boards from the terminal.
//!
//! Commands:
//! - `deskboard boards list|show|create|delete`: Manage boards
//! - `deskboard cards add|move|update|delete`: Manage cards
//! - `deskboard column edit`: Retitle or recolor a column
//! - `deskboard window <board> <column>`: Show the rendered slice of a scrolled column
//! - `deskboard activity`: Show recent changes
//!
//! Environment variables:
//! - DESKBOARD_*: Configuration overrides (see `deskboard --help`)
//! - RUST_LOG: Overrides the configured log level
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use anyhow::{Context, Result};
use clap::Parser;

use deskboard::{dispatch, settle, App, Cli};
use deskboard_common::{configure_logging, LogLevel};
use deskboard_config::ConfigLoader;

async fn run(cli: Cli) -> Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path.clone());
    }
    let config = loader.load().context("failed to load configuration")?;

    let level = if cli.debug {
        LogLevel::Debug
    } else {
        config.logging.level.parse().unwrap_or_default()
    };
    configure_logging(level);

    let app = App::open(config, cli.json).await?;
    let result = dispatch(&app, cli.command).await;
    // flush even after a failed command; earlier changes are still pending
    settle(result, app.close().await)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskboard::{BoardAction, CardAction, Commands};

    #[test]
    fn test_cli_parsing_boards_list() {
        let cli = Cli::parse_from(["deskboard", "boards", "list"]);
        assert!(matches!(
            cli.command,
            Commands::Boards {
                action: BoardAction::List
            }
        ));
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_parsing_card_move() {
        let cli = Cli::parse_from([
            "deskboard", "--json", "cards", "move", "Project Board", "card-1", "--to", "done",
        ]);
        assert!(cli.json);
        match cli.command {
            Commands::Cards {
                action:
                    CardAction::Move {
                        board,
                        card,
                        to,
                        from,
                        index,
                    },
            } => {
                assert_eq!(board, "Project Board");
                assert_eq!(card, "card-1");
                assert_eq!(to, "done");
                assert!(from.is_none());
                assert!(index.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parsing_repeated_tags() {
        let cli = Cli::parse_from([
            "deskboard", "cards", "add", "b", "todo", "Payroll", "--tag", "hr", "--tag", "finance",
        ]);
        match cli.command {
            Commands::Cards {
                action: CardAction::Add { tags, .. },
            } => assert_eq!(tags, vec!["hr", "finance"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_conflicting_due_flags() {
        let result = Cli::try_parse_from([
            "deskboard", "cards", "update", "b", "c", "--due", "2026-01-01", "--clear-due",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_assignee_needs_name() {
        let result =
            Cli::try_parse_from(["deskboard", "cards", "update", "b", "c", "--assignee-id", "e1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_window_accepts_negative_scroll() {
        let cli = Cli::parse_from([
            "deskboard", "window", "b", "todo", "--scroll", "-40", "--overscan", "2",
        ]);
        match cli.command {
            Commands::Window {
                scroll, overscan, ..
            } => {
                assert_eq!(scroll, -40.0);
                assert_eq!(overscan, Some(2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
