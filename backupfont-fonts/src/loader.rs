//! Font file loading.
//!
//! A [`FontBuffer`] owns the complete bytes of one font file. Parsing borrows
//! from it, so a [`ParsedFont`] can never outlive the bytes it reads.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use swash::{Charmap, FontRef};

use crate::error::FontError;

/// Owned contents of a font file.
pub struct FontBuffer {
    data: Vec<u8>,
}

impl fmt::Debug for FontBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontBuffer")
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl FontBuffer {
    /// Read an entire font file into memory.
    ///
    /// The buffer is sized from the file metadata with a fallible reservation,
    /// so an oversized file reports [`FontError::Allocation`] instead of
    /// aborting. The file handle is closed before this returns.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| FontError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size = file.metadata().map_err(io_err)?.len();
        let capacity = usize::try_from(size).map_err(|_| FontError::Allocation { size })?;

        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| FontError::Allocation { size })?;
        file.read_to_end(&mut data).map_err(io_err)?;
        drop(file);

        log::debug!("Read {} bytes from {:?}", data.len(), path);
        Ok(Self { data })
    }

    /// Wrap bytes that are already in memory.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Initialize the parser over the first font in the buffer.
    ///
    /// Collections (`.ttc`) are not special-cased: only face 0 is used.
    pub fn parse(&self) -> Result<ParsedFont<'_>, FontError> {
        let font = FontRef::from_index(&self.data, 0).ok_or(FontError::Parse)?;
        Ok(ParsedFont {
            charmap: font.charmap(),
            font,
        })
    }
}

/// Parser handle bound to a [`FontBuffer`].
#[derive(Clone, Copy)]
pub struct ParsedFont<'a> {
    font: FontRef<'a>,
    charmap: Charmap<'a>,
}

impl fmt::Debug for ParsedFont<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedFont")
            .field("data_len", &self.font.data.len())
            .finish()
    }
}

impl ParsedFont<'_> {
    /// Raw glyph index for a codepoint; 0 is the missing glyph.
    pub fn glyph_index(&self, codepoint: u32) -> u16 {
        self.charmap.map(codepoint)
    }
}
