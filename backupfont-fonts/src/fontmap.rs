//! Binary fontmap encoding and decoding.
//!
//! Legacy layout, all fields positional:
//!
//! ```text
//! [count: u8]
//! count × { [name_len: u32 LE][name: name_len bytes] }
//! [coverage: 65536 bytes, index = codepoint, value = slot id]
//! ```
//!
//! The versioned layout is the same body prefixed with `b"BKFM"` and a
//! version byte.

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Read, Write};
use std::path::Path;

use backupfont_config::FontmapFormat;

use crate::coverage::{CODEPOINT_COUNT, CodepointCoverage};
use crate::error::FontmapError;
use crate::scanner::MAX_FONTS;

/// Magic tag opening a versioned fontmap.
pub const MAGIC: [u8; 4] = *b"BKFM";

/// Version byte written after [`MAGIC`].
pub const FORMAT_VERSION: u8 = 1;

/// Encode a name length as little-endian bytes, independent of host order.
pub fn encode_len(len: u32) -> [u8; 4] {
    len.to_le_bytes()
}

/// Decode a little-endian name length.
pub fn decode_len(bytes: [u8; 4]) -> u32 {
    u32::from_le_bytes(bytes)
}

/// One font name as stored in a fontmap.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FontEntry {
    name: Vec<u8>,
}

impl fmt::Debug for FontEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FontEntry").field(&self.name_lossy()).finish()
    }
}

impl FontEntry {
    pub fn new(name: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into() }
    }

    /// Entry named by the path exactly as it was given.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::new(path.as_ref().as_os_str().as_encoded_bytes())
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    /// Length as written to the length field.
    ///
    /// Names longer than `u32::MAX` bytes are rejected at encode time.
    pub fn len(&self) -> usize {
        self.name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// Per-font summary of a fontmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontmapStats {
    /// Codepoints no font covers.
    pub uncovered: usize,
    /// Codepoints owned by each font, in font order.
    pub per_font: Vec<usize>,
}

/// Font names plus the resolved coverage table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fontmap {
    fonts: Vec<FontEntry>,
    coverage: CodepointCoverage,
}

impl Fontmap {
    /// Build a fontmap, checking that every slot in `coverage` names a font.
    pub fn new(fonts: Vec<FontEntry>, coverage: CodepointCoverage) -> Result<Self, FontmapError> {
        if fonts.len() > MAX_FONTS {
            return Err(FontmapError::TooManyFonts(fonts.len()));
        }
        let max_slot = coverage.max_slot();
        if usize::from(max_slot) > fonts.len() {
            return Err(FontmapError::SlotOutOfRange {
                slot: max_slot,
                count: fonts.len(),
            });
        }
        Ok(Self { fonts, coverage })
    }

    /// Fontmap for the font paths that were passed to a scan, loaded or not.
    pub fn from_paths<P: AsRef<Path>>(
        paths: &[P],
        coverage: CodepointCoverage,
    ) -> Result<Self, FontmapError> {
        Self::new(paths.iter().map(FontEntry::from_path).collect(), coverage)
    }

    pub fn fonts(&self) -> &[FontEntry] {
        &self.fonts
    }

    pub fn coverage(&self) -> &CodepointCoverage {
        &self.coverage
    }

    /// Font that owns `codepoint`, if any.
    pub fn font_for(&self, codepoint: u16) -> Option<&FontEntry> {
        match self.coverage.get(codepoint) {
            0 => None,
            slot => self.fonts.get(usize::from(slot) - 1),
        }
    }

    pub fn stats(&self) -> FontmapStats {
        let counts = self.coverage.slot_counts();
        FontmapStats {
            uncovered: counts[0],
            per_font: counts[1..=self.fonts.len()].to_vec(),
        }
    }

    /// Serialize to `writer` in the given layout.
    pub fn write_to<W: Write>(&self, mut writer: W, format: FontmapFormat) -> Result<(), FontmapError> {
        if format == FontmapFormat::Versioned {
            writer.write_all(&MAGIC)?;
            writer.write_all(&[FORMAT_VERSION])?;
        }

        let count = u8::try_from(self.fonts.len())
            .map_err(|_| FontmapError::TooManyFonts(self.fonts.len()))?;
        writer.write_all(&[count])?;

        for font in &self.fonts {
            let len = u32::try_from(font.len()).map_err(|_| {
                FontmapError::Io(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "font name longer than u32::MAX bytes",
                ))
            })?;
            writer.write_all(&encode_len(len))?;
            writer.write_all(font.name())?;
        }

        writer.write_all(self.coverage.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize to an in-memory buffer.
    pub fn to_bytes(&self, format: FontmapFormat) -> Result<Vec<u8>, FontmapError> {
        let names: usize = self.fonts.iter().map(|f| 4 + f.len()).sum();
        let mut out = Vec::with_capacity(MAGIC.len() + 2 + names + CODEPOINT_COUNT);
        self.write_to(&mut out, format)?;
        Ok(out)
    }

    /// Decode from `reader`, which must be positioned at the start of a
    /// fontmap in the given layout. Reads exactly one fontmap.
    pub fn read_from<R: Read>(mut reader: R, format: FontmapFormat) -> Result<Self, FontmapError> {
        if format == FontmapFormat::Versioned {
            let mut magic = [0u8; 4];
            read_exact_or_corrupt(&mut reader, &mut magic, "magic")?;
            if magic != MAGIC {
                return Err(FontmapError::Corrupt("bad magic".to_string()));
            }
            let mut version = [0u8; 1];
            read_exact_or_corrupt(&mut reader, &mut version, "version")?;
            if version[0] != FORMAT_VERSION {
                return Err(FontmapError::UnsupportedVersion(version[0]));
            }
        }

        let mut count = [0u8; 1];
        read_exact_or_corrupt(&mut reader, &mut count, "font count")?;

        let mut fonts = Vec::with_capacity(usize::from(count[0]));
        for index in 0..count[0] {
            let mut len = [0u8; 4];
            read_exact_or_corrupt(&mut reader, &mut len, "name length")?;
            let len = decode_len(len) as u64;

            let mut name = Vec::new();
            (&mut reader).take(len).read_to_end(&mut name)?;
            if name.len() as u64 != len {
                return Err(FontmapError::Corrupt(format!(
                    "font {} name truncated ({} of {} bytes)",
                    index + 1,
                    name.len(),
                    len
                )));
            }
            fonts.push(FontEntry::new(name));
        }

        let mut slots = vec![0u8; CODEPOINT_COUNT];
        read_exact_or_corrupt(&mut reader, &mut slots, "coverage table")?;
        let coverage = CodepointCoverage::from_bytes(slots)
            .ok_or_else(|| FontmapError::Corrupt("coverage table size".to_string()))?;

        Self::new(fonts, coverage)
    }

    /// Decode a complete fontmap, detecting the layout from its first bytes.
    /// Trailing bytes after the coverage table are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FontmapError> {
        let mut cursor = io::Cursor::new(bytes);
        let fontmap = Self::read_from(&mut cursor, detect_format(bytes))?;
        let trailing = bytes.len() as u64 - cursor.position();
        if trailing != 0 {
            return Err(FontmapError::Corrupt(format!(
                "{trailing} trailing bytes after coverage table"
            )));
        }
        Ok(fontmap)
    }
}

/// Guess the layout of serialized fontmap bytes from the magic tag.
///
/// A legacy map with 66 fonts whose first name is a few megabytes long could
/// also start with the magic. Such a map is misread as versioned.
pub fn detect_format(bytes: &[u8]) -> FontmapFormat {
    if bytes.starts_with(&MAGIC) {
        FontmapFormat::Versioned
    } else {
        FontmapFormat::Legacy
    }
}

fn read_exact_or_corrupt<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    what: &str,
) -> Result<(), FontmapError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => FontmapError::Corrupt(format!("truncated {what}")),
        _ => FontmapError::Io(e),
    })
}
