//! Configuration loading with figment

use crate::error::{ConfigError, ConfigResult};
use crate::types::DeskboardConfig;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// File name (without extension) searched for in the search directory
pub const CONFIG_FILE_STEM: &str = "deskboard";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "DESKBOARD_";

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Builds a [`DeskboardConfig`] from defaults, one file and the environment.
///
/// No caching is performed; every [`load`](Self::load) reads the sources again.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    search_dir: PathBuf,
    explicit_file: Option<PathBuf>,
    use_env: bool,
}

impl ConfigLoader {
    /// Loader searching the current directory and reading the environment
    pub fn new() -> Self {
        Self {
            search_dir: PathBuf::from("."),
            explicit_file: None,
            use_env: true,
        }
    }

    /// Search this directory for `deskboard.{toml,yaml,yml,json}`
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dir = dir.into();
        self
    }

    /// Use exactly this file instead of searching; it must exist
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }

    /// Skip `DESKBOARD_*` environment overrides
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Load, merge and validate the configuration
    pub fn load(&self) -> ConfigResult<DeskboardConfig> {
        let figment = self.build_figment()?;
        let config: DeskboardConfig = figment.extract()?;
        config.validate()?;
        debug!(
            backend = ?config.storage.backend,
            debounce_ms = config.persistence.debounce_ms,
            insert_policy = ?config.moves.insert_policy,
            "Loaded deskboard configuration"
        );
        Ok(config)
    }

    /// The config file that [`load`](Self::load) would read, if any
    pub fn config_file(&self) -> ConfigResult<Option<(PathBuf, ConfigFormat)>> {
        if let Some(path) = &self.explicit_file {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound { path: path.clone() });
            }
            let format = ConfigFormat::from_path(path)
                .ok_or_else(|| ConfigError::UnsupportedFormat { path: path.clone() })?;
            return Ok(Some((path.clone(), format)));
        }

        for ext in ["toml", "yaml", "yml", "json"] {
            let candidate = self.search_dir.join(format!("{CONFIG_FILE_STEM}.{ext}"));
            trace!("Checking for config file {}", candidate.display());
            if candidate.is_file() {
                if let Some(format) = ConfigFormat::from_path(&candidate) {
                    return Ok(Some((candidate, format)));
                }
            }
        }
        Ok(None)
    }

    fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(DeskboardConfig::default()));

        if let Some((path, format)) = self.config_file()? {
            debug!("Loading config file: {} ({:?})", path.display(), format);
            figment = match format {
                ConfigFormat::Toml => figment.merge(Toml::file(&path)),
                ConfigFormat::Yaml => figment.merge(Yaml::file(&path)),
                ConfigFormat::Json => figment.merge(Json::file(&path)),
            };
        }

        if self.use_env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        Ok(figment)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
