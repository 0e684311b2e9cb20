//! Glyph coverage queries and per-codepoint coverage tables.

use std::fmt;
use std::ops::RangeInclusive;
use std::path::Path;

use crate::error::FontError;
use crate::loader::{FontBuffer, ParsedFont};

/// Highest codepoint considered (end of the Basic Multilingual Plane).
pub const MAX_CODEPOINT: u16 = 0xFFFF;

/// Number of entries in every coverage table.
pub const CODEPOINT_COUNT: usize = MAX_CODEPOINT as usize + 1;

/// Every codepoint a coverage table has an entry for.
pub fn codepoints() -> RangeInclusive<u16> {
    0..=MAX_CODEPOINT
}

/// Source of nominal glyph indices.
///
/// Implemented by [`ParsedFont`]; tests substitute in-memory tables.
pub trait GlyphLookup {
    /// Glyph index for `codepoint`, or 0 when the font has no glyph for it.
    fn glyph_index(&self, codepoint: u32) -> u16;
}

impl GlyphLookup for ParsedFont<'_> {
    fn glyph_index(&self, codepoint: u32) -> u16 {
        ParsedFont::glyph_index(self, codepoint)
    }
}

impl<T: GlyphLookup + ?Sized> GlyphLookup for &T {
    fn glyph_index(&self, codepoint: u32) -> u16 {
        (**self).glyph_index(codepoint)
    }
}

/// Whether `font` can render `codepoint` (glyph index 0 is the missing glyph).
pub fn covers<F: GlyphLookup + ?Sized>(font: &F, codepoint: u16) -> bool {
    font.glyph_index(u32::from(codepoint)) != 0
}

/// Resolved multi-font coverage: one slot byte per BMP codepoint.
///
/// 0 means no font covers the codepoint; 1..=255 is the 1-based input
/// position of the font that claimed it.
#[derive(Clone, PartialEq, Eq)]
pub struct CodepointCoverage {
    slots: Box<[u8]>,
}

impl fmt::Debug for CodepointCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodepointCoverage")
            .field("covered", &self.covered_count())
            .field("max_slot", &self.max_slot())
            .finish()
    }
}

impl Default for CodepointCoverage {
    fn default() -> Self {
        Self::new()
    }
}

impl CodepointCoverage {
    /// A table with every codepoint uncovered.
    pub fn new() -> Self {
        Self {
            slots: vec![0u8; CODEPOINT_COUNT].into_boxed_slice(),
        }
    }

    /// Adopt a raw table; `None` unless it has exactly [`CODEPOINT_COUNT`] entries.
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        (bytes.len() == CODEPOINT_COUNT).then(|| Self {
            slots: bytes.into_boxed_slice(),
        })
    }

    pub fn get(&self, codepoint: u16) -> u8 {
        self.slots[usize::from(codepoint)]
    }

    pub fn set(&mut self, codepoint: u16, slot: u8) {
        self.slots[usize::from(codepoint)] = slot;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.slots
    }

    /// Highest slot id present, 0 for an empty table.
    pub fn max_slot(&self) -> u8 {
        self.slots.iter().copied().max().unwrap_or(0)
    }

    pub fn covered_count(&self) -> usize {
        self.slots.iter().filter(|&&slot| slot != 0).count()
    }

    /// Number of codepoints held by each slot, indexed by slot id (index 0 =
    /// uncovered).
    pub fn slot_counts(&self) -> [usize; 256] {
        let mut counts = [0usize; 256];
        for &slot in self.slots.iter() {
            counts[usize::from(slot)] += 1;
        }
        counts
    }
}

/// Boolean coverage of a single font over the whole BMP.
#[derive(Clone, PartialEq, Eq)]
pub struct SingleFontCoverage {
    covered: Box<[bool]>,
}

impl fmt::Debug for SingleFontCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleFontCoverage")
            .field("covered", &self.covered_count())
            .finish()
    }
}

impl SingleFontCoverage {
    /// Probe every codepoint of `font`.
    pub fn from_font<F: GlyphLookup + ?Sized>(font: &F) -> Self {
        let covered: Vec<bool> = codepoints().map(|cp| covers(font, cp)).collect();
        Self {
            covered: covered.into_boxed_slice(),
        }
    }

    pub fn is_covered(&self, codepoint: u16) -> bool {
        self.covered[usize::from(codepoint)]
    }

    /// `(codepoint, covered)` for every codepoint 0x0000..=0xFFFF in order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, bool)> + '_ {
        codepoints().zip(self.covered.iter().copied())
    }

    /// Codepoints the font has no glyph for.
    pub fn missing(&self) -> impl Iterator<Item = u16> + '_ {
        self.iter().filter(|&(_, ok)| !ok).map(|(cp, _)| cp)
    }

    /// Missing codepoints collapsed into inclusive ranges.
    pub fn missing_ranges(&self) -> Vec<RangeInclusive<u16>> {
        let mut ranges: Vec<RangeInclusive<u16>> = Vec::new();
        for cp in self.missing() {
            match ranges.last_mut() {
                Some(range) if u32::from(*range.end()) + 1 == u32::from(cp) => {
                    *range = *range.start()..=cp;
                }
                _ => ranges.push(cp..=cp),
            }
        }
        ranges
    }

    pub fn covered_count(&self) -> usize {
        self.covered.iter().filter(|&&ok| ok).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.covered
    }
}

/// Load one font and probe its full BMP coverage.
///
/// Failures mirror [`FontBuffer::read`] and [`FontBuffer::parse`].
pub fn single_font_coverage(path: impl AsRef<Path>) -> Result<SingleFontCoverage, FontError> {
    let path = path.as_ref();
    let buffer = FontBuffer::read(path)?;
    let font = buffer.parse()?;
    let coverage = SingleFontCoverage::from_font(&font);
    log::debug!(
        "{:?} covers {} of {} codepoints",
        path,
        coverage.covered_count(),
        CODEPOINT_COUNT
    );
    Ok(coverage)
}
