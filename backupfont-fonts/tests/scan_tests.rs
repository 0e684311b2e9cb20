//! Integration tests for scanning font files and writing fontmaps.

use backupfont_fonts::{
    CODEPOINT_COUNT, CoverageScanner, FontBuffer, FontError, FontOutcome, Fontmap, FontmapFormat,
    PriorityOrder, single_font_coverage,
};
use backupfont_test_data::{NOT_A_FONT, SyntheticFont};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_font(dir: &TempDir, name: &str, font: &SyntheticFont) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, font.build()).expect("Failed to write font fixture");
    path
}

#[test]
fn test_read_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = FontBuffer::read(temp_dir.path().join("nope.ttf")).unwrap_err();
    match err {
        FontError::Io { path, source } => {
            assert!(path.ends_with("nope.ttf"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_read_sizes_buffer_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let font = SyntheticFont::covering(&[0x41]);
    let path = write_font(&temp_dir, "a.ttf", &font);
    let buffer = FontBuffer::read(&path).unwrap();
    assert_eq!(buffer.len(), font.build().len());
    assert!(buffer.parse().is_ok());
}

#[test]
fn test_last_font_wins() {
    let temp_dir = TempDir::new().unwrap();
    let f1 = write_font(&temp_dir, "f1.ttf", &SyntheticFont::covering(&[0x41, 0x42]));
    let f2 = write_font(&temp_dir, "f2.ttf", &SyntheticFont::covering(&[0x41]));

    let report = CoverageScanner::default().scan(&[&f1, &f2]).unwrap();
    assert_eq!(report.coverage.get(0x41), 2, "later font overwrites U+0041");
    assert_eq!(report.coverage.get(0x42), 1);
    assert_eq!(report.loaded_count(), 2);
}

#[test]
fn test_first_wins_option() {
    let temp_dir = TempDir::new().unwrap();
    let f1 = write_font(&temp_dir, "f1.ttf", &SyntheticFont::covering(&[0x41]));
    let f2 = write_font(&temp_dir, "f2.ttf", &SyntheticFont::covering(&[0x41]));

    let report = CoverageScanner::new(PriorityOrder::FirstWins)
        .scan(&[&f1, &f2])
        .unwrap();
    assert_eq!(report.coverage.get(0x41), 1);
}

#[test]
fn test_too_many_fonts_rejected_before_io() {
    // None of these paths exist; an Io error would mean a file was opened.
    let paths: Vec<PathBuf> = (0..256)
        .map(|i| PathBuf::from(format!("/nonexistent/font{i}.ttf")))
        .collect();
    let err = CoverageScanner::default().scan(&paths).unwrap_err();
    assert!(matches!(err, FontError::TooManyFonts(256)));
}

#[test]
fn test_empty_list_rejected() {
    let paths: Vec<PathBuf> = Vec::new();
    let err = CoverageScanner::default().scan(&paths).unwrap_err();
    assert!(matches!(err, FontError::InsufficientArguments));
}

#[test]
fn test_bad_font_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let f1 = write_font(&temp_dir, "f1.ttf", &SyntheticFont::covering(&[0x41]));
    let missing = temp_dir.path().join("missing.ttf");
    let f3 = write_font(&temp_dir, "f3.ttf", &SyntheticFont::covering(&[0x42]));

    let report = CoverageScanner::default().scan(&[&f1, &missing, &f3]).unwrap();
    assert_eq!(report.coverage.get(0x41), 1);
    assert_eq!(report.coverage.get(0x42), 3);
    assert_eq!(report.skipped_count(), 1);
    assert!(matches!(
        report.outcomes[1],
        FontOutcome::Skipped(FontError::Io { .. })
    ));
}

#[test]
fn test_unparseable_font_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let junk = temp_dir.path().join("junk.ttf");
    fs::write(&junk, NOT_A_FONT).unwrap();
    let good = write_font(&temp_dir, "good.ttf", &SyntheticFont::covering(&[0x20]));

    let report = CoverageScanner::default().scan(&[&junk, &good]).unwrap();
    assert!(matches!(report.outcomes[0], FontOutcome::Skipped(FontError::Parse)));
    assert_eq!(report.coverage.get(0x20), 2);
}

#[test]
fn test_font_without_coverage_is_not_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let empty = write_font(&temp_dir, "empty.ttf", &SyntheticFont::new());
    let report = CoverageScanner::default().scan(&[&empty]).unwrap();
    assert!(matches!(
        report.outcomes[0],
        FontOutcome::Loaded { covered: 0 }
    ));
    assert_eq!(report.coverage.covered_count(), 0);
}

#[test]
fn test_fontmap_lists_every_input_font() {
    let temp_dir = TempDir::new().unwrap();
    let f1 = write_font(&temp_dir, "f1.ttf", &SyntheticFont::covering(&[0x41]));
    let missing = temp_dir.path().join("missing.ttf");
    let paths = vec![f1, missing];

    let report = CoverageScanner::default().scan(&paths).unwrap();
    let fontmap = Fontmap::from_paths(&paths, report.coverage).unwrap();
    let bytes = fontmap.to_bytes(FontmapFormat::Legacy).unwrap();
    assert_eq!(bytes[0], 2, "count includes the font that failed to load");

    let decoded = Fontmap::from_bytes(&bytes).unwrap();
    assert_eq!(decoded.fonts().len(), 2);
    assert_eq!(decoded.fonts()[1].name(), paths[1].as_os_str().as_encoded_bytes());
}

#[test]
fn test_scan_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let paths = vec![
        write_font(&temp_dir, "latin.ttf", &SyntheticFont::new().with_range(0x20, 0x7E)),
        write_font(&temp_dir, "kana.ttf", &SyntheticFont::new().with_range(0x3040, 0x30FF)),
    ];

    let build = || {
        let report = CoverageScanner::default().scan(&paths).unwrap();
        Fontmap::from_paths(&paths, report.coverage)
            .unwrap()
            .to_bytes(FontmapFormat::Legacy)
            .unwrap()
    };
    assert_eq!(build(), build());
}

#[test]
fn test_single_font_coverage_exact_keys() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_font(&temp_dir, "two.ttf", &SyntheticFont::covering(&[0x20, 0x41]));

    let coverage = single_font_coverage(&path).unwrap();
    assert_eq!(coverage.iter().count(), CODEPOINT_COUNT);
    let covered: Vec<u16> = coverage.iter().filter(|&(_, ok)| ok).map(|(cp, _)| cp).collect();
    assert_eq!(covered, vec![0x20, 0x41]);
    assert_eq!(coverage.missing().count(), CODEPOINT_COUNT - 2);
}

#[test]
fn test_single_font_coverage_errors() {
    let temp_dir = TempDir::new().unwrap();
    assert!(matches!(
        single_font_coverage(temp_dir.path().join("missing.ttf")),
        Err(FontError::Io { .. })
    ));

    let junk = temp_dir.path().join("junk.ttf");
    fs::write(&junk, NOT_A_FONT).unwrap();
    let err = single_font_coverage(&junk).unwrap_err();
    assert_eq!(err.to_string(), "Failed to load font");
}
