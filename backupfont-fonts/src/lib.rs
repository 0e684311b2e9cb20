//! Glyph coverage scanning and fontmap encoding for backupfont.
//!
//! This crate provides:
//! - Font loading into an owned buffer with a borrowed `swash` parser handle
//! - Per-codepoint glyph coverage queries over the Basic Multilingual Plane
//! - Multi-font coverage resolution into a one-byte-per-codepoint slot table
//! - The binary fontmap codec (legacy headerless layout and a versioned one)
//!
//! # Architecture
//!
//! ```text
//! FontBuffer::read ─► ParsedFont ─┬─► CoverageScanner ─► Fontmap::write_to
//!                                 └─► SingleFontCoverage
//! ```
//!
//! Fonts are processed strictly one at a time; each buffer is dropped before
//! the next file is read.

pub mod coverage;
pub mod error;
pub mod fontmap;
pub mod loader;
pub mod scanner;
pub mod system;

pub use backupfont_config::{FontmapFormat, PriorityOrder};
pub use coverage::{
    CODEPOINT_COUNT, CodepointCoverage, GlyphLookup, MAX_CODEPOINT, SingleFontCoverage, covers,
    single_font_coverage,
};
pub use error::{FontError, FontmapError};
pub use fontmap::{FontEntry, Fontmap, FontmapStats};
pub use loader::{FontBuffer, ParsedFont};
pub use scanner::{CoverageScanner, FontOutcome, MAX_FONTS, ScanReport, check_font_count};
pub use system::{LocatedFont, SystemFonts};
