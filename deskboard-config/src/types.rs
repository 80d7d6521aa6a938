//! Strongly typed configuration sections

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Quiescence window before a board snapshot is written
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Rows rendered above and below the viewport
pub const DEFAULT_OVERSCAN: usize = 5;

/// Estimated card row height in pixels
pub const DEFAULT_ROW_HEIGHT: f64 = 112.0;

/// Blob key holding the serialized board array
pub const DEFAULT_STORAGE_KEY: &str = "kanban_boards";

/// Upper bound for the debounce window; anything longer reads as a typo
const MAX_DEBOUNCE_MS: u64 = 60_000;

/// Complete Deskboard configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskboardConfig {
    pub storage: StorageConfig,
    pub persistence: PersistenceConfig,
    pub virtualization: VirtualizationConfig,
    pub moves: MoveConfig,
    pub logging: LoggingConfig,
}

impl DeskboardConfig {
    /// Check every section, reporting the first offending key
    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::validation("storage.key", "must not be empty"));
        }
        if self.storage.backend == StorageBackend::File
            && self.storage.directory.as_os_str().is_empty()
        {
            return Err(ConfigError::validation(
                "storage.directory",
                "required for the file backend",
            ));
        }
        if self.persistence.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::validation(
                "persistence.debounce_ms",
                format!("must be at most {MAX_DEBOUNCE_MS}"),
            ));
        }
        let row_height = self.virtualization.row_height;
        if !row_height.is_finite() || row_height <= 0.0 {
            return Err(ConfigError::validation(
                "virtualization.row_height",
                "must be a positive number",
            ));
        }
        let level = self.logging.level.to_ascii_lowercase();
        if !matches!(
            level.as_str(),
            "error" | "warn" | "warning" | "info" | "debug" | "trace"
        ) {
            return Err(ConfigError::validation(
                "logging.level",
                format!("unknown level '{}'", self.logging.level),
            ));
        }
        Ok(())
    }
}

/// Where board snapshots are kept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    /// Process-local map, lost on exit
    Memory,
    /// One JSON file per key under `directory`
    #[default]
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub directory: PathBuf,
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            directory: PathBuf::from(".deskboard"),
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub debounce_ms: u64,
}

impl PersistenceConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualizationConfig {
    pub row_height: f64,
    pub overscan: usize,
}

impl Default for VirtualizationConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

/// How a moved card is placed in its destination column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertPolicy {
    /// Always append at the end; the requested index is ignored and a drop
    /// into the card's own column changes nothing
    #[default]
    Append,
    /// Insert at the requested index, which also enables reordering within
    /// a column
    AtIndex,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveConfig {
    pub insert_policy: InsertPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
