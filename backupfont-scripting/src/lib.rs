//! Scripting-host surface for per-font glyph coverage.
//!
//! A host (an editor's plugin runtime, a build script) asks which BMP
//! codepoints a single font can render. Failures come back as an error
//! message next to an empty result; nothing in this crate exits or panics on
//! bad input, since hosts are long-lived.

pub mod host;
pub mod protocol;
pub mod server;

pub use host::{GlyphTable, get_missing_glyphs};
pub use protocol::{HostReply, HostRequest};
pub use server::GlyphIndexServer;
