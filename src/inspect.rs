//! Read-side commands: inspect a fontmap, look up a codepoint, list a font's
//! missing codepoints, and locate installed fonts.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use backupfont_fonts::fontmap::detect_format;
use backupfont_fonts::{Fontmap, SingleFontCoverage, SystemFonts};

/// Parse `U+0041`, `0x41`, a single literal character, or bare hex of two
/// or more digits (`41`).
pub fn parse_codepoint(text: &str) -> Result<u16> {
    let trimmed = text.trim();
    let hex = trimmed
        .strip_prefix("U+")
        .or_else(|| trimmed.strip_prefix("u+"))
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"));

    if let Some(hex) = hex {
        return u16::from_str_radix(hex, 16)
            .with_context(|| format!("'{text}' is not a BMP codepoint"));
    }

    let mut chars = trimmed.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return u16::try_from(u32::from(ch)).map_err(|_| {
            anyhow::anyhow!(
                "U+{:04X} is outside the Basic Multilingual Plane",
                u32::from(ch)
            )
        });
    }

    match u16::from_str_radix(trimmed, 16) {
        Ok(value) => Ok(value),
        Err(_) => bail!("'{text}' is not a codepoint"),
    }
}

pub fn read_fontmap(path: &Path) -> Result<Fontmap> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Fontmap::from_bytes(&bytes).with_context(|| format!("Failed to decode {}", path.display()))
}

/// Print the font list with per-font codepoint counts.
pub fn inspect<W: Write>(path: &Path, out: &mut W) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let format = detect_format(&bytes);
    let fontmap =
        Fontmap::from_bytes(&bytes).with_context(|| format!("Failed to decode {}", path.display()))?;
    let stats = fontmap.stats();

    writeln!(out, "format: {format}")?;
    writeln!(out, "fonts: {}", fontmap.fonts().len())?;
    for (index, (font, count)) in fontmap.fonts().iter().zip(&stats.per_font).enumerate() {
        writeln!(out, "{:>4}  {:>6}  {}", index + 1, count, font.name_lossy())?;
    }
    writeln!(out, "uncovered: {}", stats.uncovered)?;
    Ok(())
}

/// Print which font covers `codepoint`.
pub fn lookup<W: Write>(path: &Path, codepoint: u16, out: &mut W) -> Result<()> {
    let fontmap = read_fontmap(path)?;
    match fontmap.font_for(codepoint) {
        Some(font) => writeln!(
            out,
            "U+{:04X} {} {}",
            codepoint,
            fontmap.coverage().get(codepoint),
            font.name_lossy()
        )?,
        None => writeln!(out, "U+{codepoint:04X} uncovered")?,
    }
    Ok(())
}

/// Print missing codepoints of one font as ranges, or just their count.
pub fn missing<W: Write>(coverage: &SingleFontCoverage, count_only: bool, out: &mut W) -> Result<()> {
    if count_only {
        writeln!(out, "{}", coverage.missing().count())?;
        return Ok(());
    }
    for range in coverage.missing_ranges() {
        if range.start() == range.end() {
            writeln!(out, "U+{:04X}", range.start())?;
        } else {
            writeln!(out, "U+{:04X}-U+{:04X}", range.start(), range.end())?;
        }
    }
    Ok(())
}

/// Print the file backing each installed family, one per line.
///
/// Returns the number of families that were not found.
pub fn find<W: Write>(fonts: &SystemFonts, families: &[String], out: &mut W) -> Result<usize> {
    let mut not_found = 0;
    for family in families {
        match fonts.locate(family) {
            Some(located) => writeln!(out, "{}", located.path.display())?,
            None => {
                log::warn!("Font family '{}' not found", family);
                not_found += 1;
            }
        }
    }
    Ok(not_found)
}
