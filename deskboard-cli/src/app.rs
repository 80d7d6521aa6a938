//! Shared state for one CLI invocation

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use deskboard_config::DeskboardConfig;
use deskboard_kanban::{
    open_blob_store, Board, BoardStore, ColumnId, OperationProcessor, StoreSettings, ACTIVITY_KEY,
};
use serde::Serialize;
use tracing::{debug, error, warn};

/// Board store, processor and output mode for one run
pub struct App {
    pub config: DeskboardConfig,
    pub processor: Arc<OperationProcessor>,
    pub json: bool,
}

impl App {
    /// Open the configured store and load the activity journal
    pub async fn open(config: DeskboardConfig, json: bool) -> Result<Self> {
        let blob = open_blob_store(&config.storage);
        let store = BoardStore::open(Arc::clone(&blob), StoreSettings::from_config(&config))
            .await
            .with_context(|| {
                format!(
                    "failed to open boards in {}",
                    config.storage.directory.display()
                )
            })?;

        let processor = OperationProcessor::new(Arc::new(store)).with_journal(blob, ACTIVITY_KEY);
        let loaded = processor.load_activity().await?;
        debug!(entries = loaded, "Loaded activity journal");

        Ok(Self {
            config,
            processor: Arc::new(processor),
            json,
        })
    }

    pub fn store(&self) -> &BoardStore {
        self.processor.store()
    }

    /// Find a board by exact id, then by case-insensitive title
    pub async fn resolve_board(&self, key: &str) -> Result<Board> {
        let boards = self.store().list_boards().await?;

        if let Some(board) = boards.iter().find(|b| b.id.as_str() == key) {
            return Ok(board.clone());
        }

        let matches: Vec<&Board> = boards
            .iter()
            .filter(|b| b.title.eq_ignore_ascii_case(key))
            .collect();
        match matches.as_slice() {
            [board] => Ok((*board).clone()),
            [] => bail!("no board with id or title '{key}'"),
            _ => bail!("'{key}' matches {} boards; use the board id", matches.len()),
        }
    }

    /// Print `value` as JSON in `--json` mode, otherwise run `human`
    pub fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce()) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human();
        }
        Ok(())
    }

    /// Write pending changes and activity before the process exits
    pub async fn close(&self) -> Result<()> {
        let boards = self.store().flush().await.context("failed to save boards");
        if let Err(e) = self.processor.flush_activity().await {
            warn!("Failed to save activity journal: {}", e);
        }
        boards
    }
}

pub fn parse_column(value: &str) -> Result<ColumnId> {
    value.parse::<ColumnId>().with_context(|| {
        format!("unknown column '{value}' (expected backlog, todo, in-progress, review or done)")
    })
}

/// Combine a command's result with the final flush.
///
/// The command's own error wins; a flush failure behind it is logged so it
/// is not lost.
pub fn settle(result: Result<()>, flushed: Result<()>) -> Result<()> {
    match (result, flushed) {
        (Err(e), Err(flush_error)) => {
            error!("{:#}", flush_error);
            Err(e)
        }
        (result, flushed) => result.and(flushed),
    }
}
