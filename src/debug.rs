//! Log bridge for the backupfont binaries.
//!
//! Routes every `log::info!()` etc. to stderr, leaving stdout free for
//! command output and for the `glyphindex` JSON protocol.
//!
//! Level precedence: `--log-level` CLI flag, then `RUST_LOG`, then the config
//! file value.

use std::io::Write;
use std::sync::OnceLock;

use backupfont_config::LogLevel;
use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        let _ = writeln!(
            handle,
            "[{:<5}] [{}] {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;
static INSTALLED: OnceLock<()> = OnceLock::new();

/// Resolve the effective level from the three sources.
pub fn resolve_level(
    cli_level: Option<LogLevel>,
    rust_log: Option<&str>,
    config_level: LogLevel,
) -> LevelFilter {
    if let Some(level) = cli_level {
        return level.to_level_filter();
    }
    if let Some(level) = rust_log.and_then(|v| v.parse::<LogLevel>().ok()) {
        return level.to_level_filter();
    }
    config_level.to_level_filter()
}

/// Install the stderr logger. Later calls only adjust the level.
pub fn init_log_bridge(cli_level: Option<LogLevel>, config_level: LogLevel) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = resolve_level(cli_level, rust_log.as_deref(), config_level);

    INSTALLED.get_or_init(|| {
        if log::set_logger(&LOGGER).is_err() {
            eprintln!("backupfont: another logger is already installed");
        }
    });
    log::set_max_level(level);
}
