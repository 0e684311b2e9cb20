//! The `get_missing_glyphs` callable.

use std::path::Path;

use backupfont_fonts::{SingleFontCoverage, single_font_coverage};

/// Result of a coverage request as a host sees it: either a table or an
/// error message, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphTable {
    /// Coverage for every codepoint 0x0000..=0xFFFF, `None` on failure.
    pub glyphs: Option<SingleFontCoverage>,
    /// Human-readable failure, `None` on success.
    pub error: Option<String>,
}

impl GlyphTable {
    pub fn ok(glyphs: SingleFontCoverage) -> Self {
        Self {
            glyphs: Some(glyphs),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            glyphs: None,
            error: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<SingleFontCoverage, String> {
        match (self.glyphs, self.error) {
            (Some(glyphs), None) => Ok(glyphs),
            (_, Some(error)) => Err(error),
            (None, None) => Err("no coverage returned".to_string()),
        }
    }
}

/// Probe the coverage of the font at `path`.
///
/// Open, allocation and parse failures are reported through
/// [`GlyphTable::error`].
pub fn get_missing_glyphs(path: impl AsRef<Path>) -> GlyphTable {
    let path = path.as_ref();
    match single_font_coverage(path) {
        Ok(glyphs) => GlyphTable::ok(glyphs),
        Err(e) => {
            log::debug!("get_missing_glyphs({:?}) failed: {}", path, e);
            GlyphTable::err(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_error_not_panic() {
        let table = get_missing_glyphs("/nonexistent/dir/font.ttf");
        assert!(!table.is_ok());
        assert!(table.glyphs.is_none());
        assert!(table.error.unwrap().contains("font.ttf"));
    }

    #[test]
    fn into_result_prefers_error() {
        assert_eq!(
            GlyphTable::err("Failed to load font").into_result(),
            Err("Failed to load font".to_string())
        );
    }
}
