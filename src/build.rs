//! The fontmap build: scan fonts, then write the artifact.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use backupfont_fonts::{
    CoverageScanner, FontError, Fontmap, FontmapError, FontmapFormat, PriorityOrder,
};
use thiserror::Error;

/// Everything needed to produce one fontmap.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub outfile: PathBuf,
    /// Fonts in input order; slot ids follow this order.
    pub fonts: Vec<PathBuf>,
    pub priority: PriorityOrder,
    pub format: FontmapFormat,
}

/// What a finished build did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub fonts: usize,
    pub loaded: usize,
    pub skipped: usize,
    /// Codepoints covered by at least one font.
    pub covered: usize,
}

#[derive(Debug, Error)]
pub enum BuildError {
    /// Bad font count; raised before any file is read.
    #[error(transparent)]
    Arguments(FontError),

    /// The output file could not be created or moved into place.
    #[error("Unable to open output file {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Fontmap(#[from] FontmapError),
}

/// Scan `options.fonts` and write the fontmap to `options.outfile`.
///
/// The output is written to a sibling temp file and renamed into place, so a
/// failed build never leaves a truncated fontmap behind.
pub fn build_fontmap(options: &BuildOptions) -> Result<BuildSummary, BuildError> {
    let scanner = CoverageScanner::new(options.priority);
    log::debug!(
        "Scanning {} fonts, overlaps resolved {}",
        options.fonts.len(),
        scanner.priority()
    );
    let report = scanner
        .scan(&options.fonts)
        .map_err(BuildError::Arguments)?;

    let summary = BuildSummary {
        fonts: options.fonts.len(),
        loaded: report.loaded_count(),
        skipped: report.skipped_count(),
        covered: report.coverage.covered_count(),
    };

    let fontmap = Fontmap::from_paths(&options.fonts, report.coverage)?;
    write_fontmap(&options.outfile, &fontmap, options.format)?;

    log::info!(
        "Wrote {:?}: {} fonts ({} skipped), {} codepoints covered",
        options.outfile,
        summary.fonts,
        summary.skipped,
        summary.covered
    );
    Ok(summary)
}

/// Write `fontmap` to `path` via a temp file and rename.
pub fn write_fontmap(
    path: &Path,
    fontmap: &Fontmap,
    format: FontmapFormat,
) -> Result<(), BuildError> {
    let temp_path = temp_path_for(path);
    let output_err = |source: io::Error| BuildError::Output {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(&temp_path).map_err(output_err)?;
    if let Err(e) = fontmap.write_to(BufWriter::new(file), format) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        output_err(e)
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
