//! JSON protocol types for communication between a scripting host and the
//! `glyphindex` server.
//!
//! The host writes [`HostRequest`] objects to the server's stdin (one JSON
//! object per line) and reads [`HostReply`] objects from its stdout (one JSON
//! object per line, in request order).

use serde::{Deserialize, Serialize};

use crate::host::GlyphTable;

/// A request sent from the host to the server.
///
/// Tagged with `type` for easy JSON dispatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostRequest {
    /// Coverage table for one font file.
    GetMissingGlyphs {
        /// Path to the font file.
        path: String,
    },

    /// Liveness check.
    Ping {},
}

/// A reply sent from the server to the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostReply {
    /// Answer to `get_missing_glyphs`. Exactly one of the fields is non-null;
    /// hosts must check `error` before using `glyphs`.
    GlyphTable {
        /// `glyphs[cp]` is true iff the font covers codepoint `cp`;
        /// always 65536 entries when present.
        glyphs: Option<Vec<bool>>,
        /// Human-readable failure.
        error: Option<String>,
    },

    /// Answer to `ping`.
    Pong {},

    /// The request line could not be understood.
    Error {
        /// Description of the problem.
        message: String,
    },
}

impl From<GlyphTable> for HostReply {
    fn from(table: GlyphTable) -> Self {
        HostReply::GlyphTable {
            glyphs: table.glyphs.map(|g| g.as_slice().to_vec()),
            error: table.error,
        }
    }
}
