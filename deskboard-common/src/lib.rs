//! # Deskboard Common
//!
//! Helpers shared by every Deskboard crate.
//!
//! - [`logging`] - `Pretty` log payload formatting and tracing subscriber setup

pub mod logging;

pub use logging::{configure_logging, LogLevel, Pretty};
