//! Logging utilities for Deskboard
//!
//! Structured payloads are rendered with [`Pretty`]; binaries install a
//! subscriber with [`configure_logging`].

use serde::Serialize;
use std::fmt::Debug;
use std::str::FromStr;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Wrapper for pretty-printing types in logs as YAML
///
/// Use this in tracing statements to format complex types as YAML with a
/// newline before the content:
///
/// ```ignore
/// use deskboard_common::Pretty;
/// use tracing::info;
///
/// info!("Seeded board: {}", Pretty(&board));
/// ```
///
/// Debug is used as a fallback if YAML serialization fails.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> std::fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{}", yaml),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}

impl<T: Serialize + Debug> std::fmt::Debug for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

/// Verbosity selected by configuration or command-line flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

/// Install the global tracing subscriber writing to stderr.
///
/// `RUST_LOG` wins over `level` when set. Calling this more than once is
/// harmless: later calls leave the first subscriber in place and return false.
pub fn configure_logging(level: LogLevel) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("deskboard={0},{0}", level.as_directive())));

    registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(false),
        )
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize)]
    struct Sample {
        title: String,
        cards: usize,
    }

    #[test]
    fn test_pretty_renders_yaml_with_leading_newline() {
        let sample = Sample {
            title: "Sprint".into(),
            cards: 3,
        };
        let rendered = format!("{}", Pretty(&sample));
        assert!(rendered.starts_with('\n'));
        assert!(rendered.contains("title: Sprint"));
        assert!(rendered.contains("cards: 3"));
    }

    #[test]
    fn test_pretty_debug_matches_display() {
        let value = serde_json::json!({"a": 1});
        assert_eq!(format!("{:?}", Pretty(&value)), format!("{}", Pretty(&value)));
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!(" trace ".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_configure_logging_is_idempotent() {
        let _ = configure_logging(LogLevel::Debug);
        assert!(!configure_logging(LogLevel::Info));
    }
}
