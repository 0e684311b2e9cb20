//! `glyphindex` - serve per-font glyph coverage to a scripting host.
//!
//! Reads JSON requests from stdin one per line and answers each on stdout.
//! See `backupfont_scripting::protocol` for the message shapes. Logs go to
//! stderr.

use std::io;

use anyhow::Result;
use backupfont_config::Config;
use backupfont_scripting::GlyphIndexServer;

fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("glyphindex: ignoring config: {e}");
        Config::default()
    });
    backupfont::debug::init_log_bridge(None, config.log_level);

    log::info!("glyphindex {} ready", backupfont::VERSION);
    let mut server = GlyphIndexServer::new();
    server.serve(io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}
