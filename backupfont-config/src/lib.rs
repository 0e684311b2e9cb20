//! Configuration system for the backupfont fontmap builder.
//!
//! This crate provides configuration loading and default values shared by the
//! `backupfont` CLI and the `glyphindex` host server. It includes:
//!
//! - Coverage priority order (last-wins legacy behaviour or first-wins)
//! - Fontmap output format (legacy byte layout or versioned header)
//! - Log level

pub mod config;
pub mod error;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::{FontmapFormat, LogLevel, PriorityOrder};
