//! Deskboard Configuration Management using Figment
//!
//! Configuration is layered with a clear precedence order (later sources win):
//!
//! 1. Built-in defaults ([`DeskboardConfig::default`])
//! 2. A configuration file: an explicit path, or the first of
//!    `deskboard.toml`, `deskboard.yaml`, `deskboard.yml`, `deskboard.json`
//!    found in the search directory
//! 3. Environment variables prefixed with `DESKBOARD_`, nested with `__`
//!    (e.g. `DESKBOARD_PERSISTENCE__DEBOUNCE_MS=150`)
//!
//! ## Example TOML Configuration
//!
//! ```toml
//! [storage]
//! backend = "file"
//! directory = ".deskboard"
//! key = "kanban_boards"
//!
//! [persistence]
//! debounce_ms = 300
//!
//! [virtualization]
//! row_height = 112.0
//! overscan = 5
//!
//! [moves]
//! insert_policy = "append"
//! ```
//!
//! ```no_run
//! use deskboard_config::ConfigLoader;
//!
//! let config = ConfigLoader::new().load()?;
//! println!("debounce: {:?}", config.persistence.debounce());
//! # Ok::<(), deskboard_config::ConfigError>(())
//! ```

mod error;
mod loader;
mod types;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigFormat, ConfigLoader, CONFIG_FILE_STEM, ENV_PREFIX};
pub use types::{
    DeskboardConfig, InsertPolicy, LoggingConfig, MoveConfig, PersistenceConfig, StorageBackend,
    StorageConfig, VirtualizationConfig, DEFAULT_DEBOUNCE_MS, DEFAULT_OVERSCAN,
    DEFAULT_ROW_HEIGHT, DEFAULT_STORAGE_KEY,
};
