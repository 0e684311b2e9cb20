//! Enum types used by [`crate::Config`] and the CLI flags that override it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How overlapping coverage between fonts is resolved.
///
/// The historical tool overwrote each codepoint with every font that covered
/// it, so the *last* font listed wins. That stays the default so existing
/// fontmaps are reproduced byte for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PriorityOrder {
    /// Every covering font overwrites the slot; the last listed font wins.
    #[default]
    LastWins,
    /// A slot is only claimed while still uncovered; the first listed font wins.
    FirstWins,
}

impl PriorityOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityOrder::LastWins => "last-wins",
            PriorityOrder::FirstWins => "first-wins",
        }
    }
}

impl fmt::Display for PriorityOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriorityOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-wins" | "last" => Ok(PriorityOrder::LastWins),
            "first-wins" | "first" => Ok(PriorityOrder::FirstWins),
            other => Err(format!(
                "unknown priority order '{other}' (expected last-wins or first-wins)"
            )),
        }
    }
}

/// On-disk layout of a fontmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FontmapFormat {
    /// Headerless layout readable by existing consumers.
    #[default]
    Legacy,
    /// Legacy layout prefixed with a magic tag and a version byte.
    Versioned,
}

impl FontmapFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontmapFormat::Legacy => "legacy",
            FontmapFormat::Versioned => "versioned",
        }
    }
}

impl fmt::Display for FontmapFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontmapFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(FontmapFormat::Legacy),
            "versioned" => Ok(FontmapFormat::Versioned),
            other => Err(format!(
                "unknown fontmap format '{other}' (expected legacy or versioned)"
            )),
        }
    }
}

/// Log level for diagnostic output on stderr.
///
/// The `--log-level` CLI flag and the `RUST_LOG` environment variable take
/// precedence over the configured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging
    Off,
    /// Errors only
    Error,
    /// Warnings and errors (skipped fonts are reported here)
    #[default]
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}
