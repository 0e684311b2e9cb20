//! Test data shared between the backupfont crates.
//!
//! Real font files are large and carry licensing baggage, so the fixtures
//! here are synthesized on demand: a TrueType container with a single `cmap`
//! table holding a platform 3 / encoding 1, format 4 subtable. That is all a
//! charmap lookup needs.

/// Glyph id of the first mapped codepoint in a [`SyntheticFont`].
pub const FIRST_GLYPH: u16 = 1;

/// Bytes that no font parser accepts (wrong sfnt version tag).
pub static NOT_A_FONT: &[u8] = b"this is definitely not a font file";

/// Builder for a minimal cmap-only TrueType font.
///
/// Codepoints are assigned glyph ids in ascending codepoint order starting at
/// [`FIRST_GLYPH`]. U+FFFF is reserved for the format 4 terminator segment and
/// is silently dropped.
#[derive(Debug, Clone, Default)]
pub struct SyntheticFont {
    codepoints: Vec<u16>,
}

impl SyntheticFont {
    pub fn new() -> Self {
        Self::default()
    }

    /// Font covering exactly `codepoints`.
    pub fn covering(codepoints: &[u16]) -> Self {
        let mut font = Self::new();
        for &cp in codepoints {
            font = font.with_codepoint(cp);
        }
        font
    }

    pub fn with_codepoint(mut self, codepoint: u16) -> Self {
        self.codepoints.push(codepoint);
        self
    }

    /// Adds the inclusive range `start..=end`.
    pub fn with_range(mut self, start: u16, end: u16) -> Self {
        self.codepoints.extend(start..=end);
        self
    }

    /// Codepoints that will map to a non-zero glyph, sorted and deduplicated.
    pub fn mapped_codepoints(&self) -> Vec<u16> {
        let mut cps: Vec<u16> = self
            .codepoints
            .iter()
            .copied()
            .filter(|&cp| cp != 0xFFFF)
            .collect();
        cps.sort_unstable();
        cps.dedup();
        cps
    }

    /// Serialize to TrueType bytes.
    pub fn build(&self) -> Vec<u8> {
        let cmap = build_cmap(&self.segments());
        build_sfnt(*b"cmap", &cmap)
    }

    /// Collapse mapped codepoints into `(start, end, first_glyph)` runs.
    fn segments(&self) -> Vec<(u16, u16, u16)> {
        let mut segments: Vec<(u16, u16, u16)> = Vec::new();
        let mut glyph = FIRST_GLYPH;
        for cp in self.mapped_codepoints() {
            match segments.last_mut() {
                Some((_, end, _)) if u32::from(*end) + 1 == u32::from(cp) => *end = cp,
                _ => segments.push((cp, cp, glyph)),
            }
            glyph = glyph.wrapping_add(1);
        }
        segments
    }
}

fn build_cmap(segments: &[(u16, u16, u16)]) -> Vec<u8> {
    // Terminator segment: 0xFFFF + 1 wraps to glyph 0.
    let mut all: Vec<(u16, u16, u16)> = segments.to_vec();
    all.push((0xFFFF, 0xFFFF, 0));
    let seg_count = all.len() as u16;

    let mut pow = 1u16;
    let mut entry_selector = 0u16;
    while pow * 2 <= seg_count {
        pow *= 2;
        entry_selector += 1;
    }
    let search_range = pow * 2;
    let range_shift = seg_count * 2 - search_range;
    let subtable_len = 16 + 8 * seg_count;

    let mut sub = Vec::with_capacity(subtable_len as usize);
    push_u16(&mut sub, 4); // format
    push_u16(&mut sub, subtable_len);
    push_u16(&mut sub, 0); // language
    push_u16(&mut sub, seg_count * 2);
    push_u16(&mut sub, search_range);
    push_u16(&mut sub, entry_selector);
    push_u16(&mut sub, range_shift);
    for &(_, end, _) in &all {
        push_u16(&mut sub, end);
    }
    push_u16(&mut sub, 0); // reservedPad
    for &(start, _, _) in &all {
        push_u16(&mut sub, start);
    }
    for &(start, _, glyph) in &all {
        let delta = if start == 0xFFFF {
            1
        } else {
            glyph.wrapping_sub(start)
        };
        push_u16(&mut sub, delta);
    }
    for _ in &all {
        push_u16(&mut sub, 0); // idRangeOffset
    }

    let mut cmap = Vec::with_capacity(12 + sub.len());
    push_u16(&mut cmap, 0); // version
    push_u16(&mut cmap, 1); // numTables
    push_u16(&mut cmap, 3); // platform: Windows
    push_u16(&mut cmap, 1); // encoding: Unicode BMP
    push_u32(&mut cmap, 12);
    cmap.extend_from_slice(&sub);
    cmap
}

fn build_sfnt(tag: [u8; 4], table: &[u8]) -> Vec<u8> {
    let table_offset = 12 + 16;
    let mut out = Vec::with_capacity(table_offset + table.len() + 3);
    push_u32(&mut out, 0x0001_0000);
    push_u16(&mut out, 1); // numTables
    push_u16(&mut out, 16); // searchRange
    push_u16(&mut out, 0); // entrySelector
    push_u16(&mut out, 0); // rangeShift
    out.extend_from_slice(&tag);
    push_u32(&mut out, checksum(table));
    push_u32(&mut out, table_offset as u32);
    push_u32(&mut out, table.len() as u32);
    out.extend_from_slice(table);
    while out.len() % 4 != 0 {
        out.push(0);
    }
    out
}

fn checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

fn push_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_be_bytes());
}

fn push_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_truetype() {
        let bytes = SyntheticFont::covering(&[0x41]).build();
        assert_eq!(&bytes[..4], &[0, 1, 0, 0]);
        assert_eq!(&bytes[12..16], b"cmap");
        assert_eq!(bytes.len() % 4, 0);
    }

    #[test]
    fn consecutive_codepoints_share_a_segment() {
        let font = SyntheticFont::new().with_range(0x41, 0x5A).with_codepoint(0x20);
        assert_eq!(font.segments(), vec![(0x20, 0x20, 1), (0x41, 0x5A, 2)]);
    }

    #[test]
    fn terminator_codepoint_is_dropped() {
        let font = SyntheticFont::covering(&[0xFFFF, 0x30, 0x30]);
        assert_eq!(font.mapped_codepoints(), vec![0x30]);
    }
}
