// Library exports for testing and potential library use
//
// The binaries are thin: `backupfont` parses arguments and calls `cli::run`,
// `glyphindex` wires stdin/stdout to the scripting crate's server. Everything
// with behaviour lives here or in the member crates.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod build;
pub mod cli;
pub mod debug;
pub mod inspect;

pub use build::{BuildError, BuildOptions, BuildSummary, build_fontmap, write_fontmap};
