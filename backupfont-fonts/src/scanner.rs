//! Multi-font coverage resolution.
//!
//! The scanner walks fonts in input order, assigning each the slot id of its
//! 1-based position, and records which slot ends up owning every codepoint.

use std::path::Path;

use backupfont_config::PriorityOrder;

use crate::coverage::{CodepointCoverage, GlyphLookup, codepoints, covers};
use crate::error::FontError;
use crate::loader::FontBuffer;

/// Most fonts a single fontmap can address (slot 0 is "uncovered").
pub const MAX_FONTS: usize = u8::MAX as usize;

/// Reject font lists that cannot be encoded, before touching the filesystem.
pub fn check_font_count(count: usize) -> Result<(), FontError> {
    match count {
        0 => Err(FontError::InsufficientArguments),
        n if n > MAX_FONTS => Err(FontError::TooManyFonts(n)),
        _ => Ok(()),
    }
}

/// What happened to one input font during a scan.
#[derive(Debug)]
pub enum FontOutcome {
    /// The font loaded; `covered` is how many codepoints it has glyphs for.
    Loaded { covered: usize },
    /// The font could not be loaded and contributed nothing.
    Skipped(FontError),
}

impl FontOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, FontOutcome::Loaded { .. })
    }
}

/// Result of a scan: the resolved table plus one outcome per input font.
#[derive(Debug)]
pub struct ScanReport {
    pub coverage: CodepointCoverage,
    /// Indexed by input position (slot id - 1).
    pub outcomes: Vec<FontOutcome>,
}

impl ScanReport {
    pub fn loaded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_loaded()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.loaded_count()
    }
}

/// Resolves per-codepoint font priority across an ordered font list.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverageScanner {
    priority: PriorityOrder,
}

impl CoverageScanner {
    pub fn new(priority: PriorityOrder) -> Self {
        Self { priority }
    }

    pub fn priority(&self) -> PriorityOrder {
        self.priority
    }

    /// Scan font files in order.
    ///
    /// A font that fails to load is skipped; only the argument-count checks
    /// abort the scan, and they run before any file is opened.
    pub fn scan<P: AsRef<Path>>(&self, paths: &[P]) -> Result<ScanReport, FontError> {
        check_font_count(paths.len())?;

        let mut coverage = CodepointCoverage::new();
        let mut outcomes = Vec::with_capacity(paths.len());

        for (slot, path) in (1..=u8::MAX).zip(paths) {
            let path = path.as_ref();
            let outcome = match self.scan_file(&mut coverage, path, slot) {
                Ok(covered) => {
                    log::info!("Font {} {:?}: {} codepoints", slot, path, covered);
                    FontOutcome::Loaded { covered }
                }
                Err(e) => {
                    log::warn!("Skipping font {} {:?}: {}", slot, path, e);
                    FontOutcome::Skipped(e)
                }
            };
            outcomes.push(outcome);
        }

        Ok(ScanReport { coverage, outcomes })
    }

    /// Load, apply and release one font file.
    fn scan_file(
        &self,
        coverage: &mut CodepointCoverage,
        path: &Path,
        slot: u8,
    ) -> Result<usize, FontError> {
        let buffer = FontBuffer::read(path)?;
        let font = buffer.parse()?;
        Ok(self.apply(coverage, &font, slot))
    }

    /// Resolve coverage for fonts that are already loaded; `None` entries
    /// stand for fonts that failed to load and still occupy their slot.
    pub fn resolve<F: GlyphLookup>(
        &self,
        fonts: &[Option<F>],
    ) -> Result<CodepointCoverage, FontError> {
        check_font_count(fonts.len())?;

        let mut coverage = CodepointCoverage::new();
        for (slot, font) in (1..=u8::MAX).zip(fonts) {
            if let Some(font) = font {
                self.apply(&mut coverage, font, slot);
            }
        }
        Ok(coverage)
    }

    /// Merge one font into `coverage` under `slot`; returns how many
    /// codepoints the font covers (whether or not it won them).
    pub fn apply<F: GlyphLookup + ?Sized>(
        &self,
        coverage: &mut CodepointCoverage,
        font: &F,
        slot: u8,
    ) -> usize {
        let mut covered = 0;
        for cp in codepoints() {
            if !covers(font, cp) {
                continue;
            }
            covered += 1;
            match self.priority {
                PriorityOrder::LastWins => coverage.set(cp, slot),
                PriorityOrder::FirstWins => {
                    if coverage.get(cp) == 0 {
                        coverage.set(cp, slot);
                    }
                }
            }
        }
        covered
    }
}
