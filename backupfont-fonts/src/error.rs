//! Typed error variants for font loading, scanning and fontmap decoding.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading a font or validating a scan request.
#[derive(Debug, Error)]
pub enum FontError {
    /// The font file could not be opened or read.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A buffer for the font contents could not be allocated.
    #[error("Failed to allocate memory ({size} bytes)")]
    Allocation { size: u64 },

    /// The parser rejected the font data.
    #[error("Failed to load font")]
    Parse,

    /// No fonts were given.
    #[error("Insufficient arguments.")]
    InsufficientArguments,

    /// More fonts were given than a one-byte slot id can address.
    #[error("Too many fonts: {0} given, at most 255 are supported.")]
    TooManyFonts(usize),
}

/// Failures while encoding or decoding a fontmap.
#[derive(Debug, Error)]
pub enum FontmapError {
    /// The underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The data ended early or is internally inconsistent.
    #[error("corrupt fontmap: {0}")]
    Corrupt(String),

    /// A versioned fontmap with a version this build does not understand.
    #[error("unsupported fontmap version {0}")]
    UnsupportedVersion(u8),

    /// More fonts than the one-byte count field can hold.
    #[error("fontmap cannot hold {0} fonts, at most 255 are supported")]
    TooManyFonts(usize),

    /// The coverage table references a slot with no font entry.
    #[error("coverage references font slot {slot} but only {count} fonts are listed")]
    SlotOutOfRange { slot: u8, count: usize },
}
