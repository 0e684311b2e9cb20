//! Command-line interface for backupfont.
//!
//! The positional form builds a fontmap, whatever the output file is named:
//!
//! ```text
//! backupfont [OPTIONS] OUTFILE FONT...
//! ```
//!
//! Reading existing fontmaps or single fonts is done with action flags
//! (`--inspect`, `--lookup`, `--missing`, `--find`), which take the place of
//! the positional arguments.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use backupfont_config::{Config, FontmapFormat, LogLevel, PriorityOrder};
use backupfont_fonts::{SystemFonts, single_font_coverage};
use clap::{Args, CommandFactory, Parser};

use crate::build::{BuildError, BuildOptions, build_fontmap};
use crate::inspect;

const LIMITATIONS: &str = "Limitations:\n- You can only specify up to 255 fonts at 1 time.";

/// backupfont - Get a list of fonts that supports the codepoints.
#[derive(Parser, Debug)]
#[command(name = "backupfont")]
#[command(author, version, about, long_about = None)]
#[command(after_help = LIMITATIONS)]
pub struct Cli {
    #[command(flatten)]
    pub build: BuildArgs,

    #[command(flatten)]
    pub read: ReadArgs,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Config file to use instead of ~/.config/backupfont/config.yaml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// With --missing, print only the number of missing codepoints
    #[arg(short, long, requires = "missing")]
    pub count: bool,
}

#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Fontmap file to write
    #[arg(value_name = "OUTFILE")]
    pub outfile: Option<PathBuf>,

    /// Font files, highest priority first
    #[arg(value_name = "FONT")]
    pub fonts: Vec<PathBuf>,

    /// How overlapping coverage is resolved (last-wins, first-wins)
    #[arg(long, value_name = "ORDER")]
    pub priority: Option<PriorityOrder>,

    /// Output layout (legacy, versioned)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<FontmapFormat>,
}

/// Read-side actions. At most one may be given, and none mixes with a build.
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct ReadArgs {
    /// Show the fonts in a fontmap and how many codepoints each owns
    #[arg(long, value_name = "MAPFILE", conflicts_with = "outfile")]
    pub inspect: Option<PathBuf>,

    /// Show which font in a fontmap covers a codepoint
    /// (U+XXXX, 0xXXXX, hex digits, or a literal character)
    #[arg(
        long,
        num_args = 2,
        value_names = ["MAPFILE", "CODEPOINT"],
        conflicts_with = "outfile"
    )]
    pub lookup: Option<Vec<String>>,

    /// List the BMP codepoints a font has no glyph for
    #[arg(long, value_name = "FONT", conflicts_with = "outfile")]
    pub missing: Option<PathBuf>,

    /// Print the file path of installed font families, e.g. "Noto Sans"
    #[arg(long, value_name = "FAMILY", num_args = 1.., conflicts_with = "outfile")]
    pub find: Option<Vec<String>>,
}

/// A read-side action selected by [`ReadArgs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadAction {
    Inspect(PathBuf),
    Lookup { mapfile: PathBuf, codepoint: String },
    Missing { font: PathBuf, count: bool },
    Find(Vec<String>),
}

impl ReadArgs {
    /// The requested action, if any. `count` only applies to `--missing`.
    pub fn action(self, count: bool) -> Option<ReadAction> {
        if let Some(mapfile) = self.inspect {
            return Some(ReadAction::Inspect(mapfile));
        }
        if let Some(mut values) = self.lookup {
            let codepoint = values.pop()?;
            let mapfile = PathBuf::from(values.pop()?);
            return Some(ReadAction::Lookup { mapfile, codepoint });
        }
        if let Some(font) = self.missing {
            return Some(ReadAction::Missing { font, count });
        }
        self.find.map(ReadAction::Find)
    }
}

/// Parse arguments, run the requested command, and return the exit code.
pub fn process_cli() -> i32 {
    run(Cli::parse())
}

/// Run an already parsed command line.
pub fn run(cli: Cli) -> i32 {
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("backupfont: error: {e}");
            return 1;
        }
    };
    crate::debug::init_log_bridge(cli.log_level, config.log_level);

    let Some(action) = cli.read.action(cli.count) else {
        return run_build(cli.build, &config);
    };

    let result = match action {
        ReadAction::Inspect(mapfile) => inspect::inspect(&mapfile, &mut io::stdout().lock()),
        ReadAction::Lookup { mapfile, codepoint } => inspect::parse_codepoint(&codepoint)
            .and_then(|cp| inspect::lookup(&mapfile, cp, &mut io::stdout().lock())),
        ReadAction::Missing { font, count } => single_font_coverage(&font)
            .with_context(|| format!("Failed to scan {}", font.display()))
            .and_then(|coverage| inspect::missing(&coverage, count, &mut io::stdout().lock())),
        ReadAction::Find(families) => {
            let fonts = SystemFonts::load();
            match inspect::find(&fonts, &families, &mut io::stdout().lock()) {
                Ok(0) => Ok(()),
                Ok(n) => {
                    eprintln!("backupfont: {n} font families not found");
                    return 1;
                }
                Err(e) => Err(e),
            }
        }
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("backupfont: error: {e:#}");
            1
        }
    }
}

/// Resolve build options from flags and config.
///
/// Returns `None` when no output file was given, which is reported like an
/// empty font list.
pub fn build_options(args: BuildArgs, config: &Config) -> Option<BuildOptions> {
    Some(BuildOptions {
        outfile: args.outfile?,
        fonts: args.fonts,
        priority: args.priority.unwrap_or(config.priority),
        format: args.format.unwrap_or(config.format),
    })
}

fn run_build(args: BuildArgs, config: &Config) -> i32 {
    let Some(options) = build_options(args, config) else {
        usage_error("Insufficient arguments.");
        return 1;
    };

    match build_fontmap(&options) {
        Ok(summary) => {
            if summary.skipped > 0 {
                log::warn!(
                    "{} of {} fonts could not be loaded",
                    summary.skipped,
                    summary.fonts
                );
            }
            0
        }
        Err(BuildError::Arguments(e)) => {
            usage_error(&e.to_string());
            1
        }
        Err(e) => {
            eprintln!("backupfont: error: {e}");
            1
        }
    }
}

/// Print an argument error followed by the usage text to stderr.
fn usage_error(message: &str) {
    let mut command = Cli::command();
    eprintln!("{message}\n\n{}", command.render_help());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positional_build_form() {
        let cli = Cli::try_parse_from(["backupfont", "out.bin", "a.ttf", "b.ttf"]).unwrap();
        assert_eq!(cli.build.outfile, Some(PathBuf::from("out.bin")));
        assert_eq!(
            cli.build.fonts,
            vec![PathBuf::from("a.ttf"), PathBuf::from("b.ttf")]
        );
    }

    #[test]
    fn outfile_may_share_a_read_action_name() {
        for name in ["find", "inspect", "lookup", "missing"] {
            let cli = Cli::try_parse_from(["backupfont", name, "a.ttf"]).unwrap();
            assert_eq!(cli.build.outfile, Some(PathBuf::from(name)));
            assert_eq!(cli.build.fonts, vec![PathBuf::from("a.ttf")]);
            assert_eq!(cli.read.action(cli.count), None);
        }
    }

    #[test]
    fn read_action_flags() {
        let cli = Cli::try_parse_from(["backupfont", "--lookup", "map.bin", "U+0041"]).unwrap();
        assert_eq!(cli.build.outfile, None);
        assert_eq!(
            cli.read.action(cli.count),
            Some(ReadAction::Lookup {
                mapfile: PathBuf::from("map.bin"),
                codepoint: "U+0041".to_string(),
            })
        );

        let cli = Cli::try_parse_from(["backupfont", "--missing", "a.ttf", "-c"]).unwrap();
        assert_eq!(
            cli.read.action(cli.count),
            Some(ReadAction::Missing {
                font: PathBuf::from("a.ttf"),
                count: true,
            })
        );

        let cli = Cli::try_parse_from(["backupfont", "--find", "Noto Sans", "DejaVu Sans"]).unwrap();
        assert_eq!(
            cli.read.action(cli.count),
            Some(ReadAction::Find(vec![
                "Noto Sans".to_string(),
                "DejaVu Sans".to_string()
            ]))
        );
    }

    #[test]
    fn read_actions_do_not_mix() {
        assert!(Cli::try_parse_from(["backupfont", "--inspect", "a.bin", "--missing", "a.ttf"]).is_err());
        assert!(Cli::try_parse_from(["backupfont", "--inspect", "a.bin", "out.bin", "a.ttf"]).is_err());
        assert!(Cli::try_parse_from(["backupfont", "--count", "out.bin", "a.ttf"]).is_err());
    }

    #[test]
    fn flags_override_config() {
        let config = Config {
            priority: PriorityOrder::FirstWins,
            format: FontmapFormat::Versioned,
            ..Config::default()
        };
        let cli = Cli::try_parse_from([
            "backupfont",
            "--priority",
            "last-wins",
            "out.bin",
            "a.ttf",
        ])
        .unwrap();
        let options = build_options(cli.build, &config).unwrap();
        assert_eq!(options.priority, PriorityOrder::LastWins);
        assert_eq!(options.format, FontmapFormat::Versioned);
    }

    #[test]
    fn missing_outfile_has_no_options() {
        let cli = Cli::try_parse_from(["backupfont"]).unwrap();
        assert!(build_options(cli.build, &Config::default()).is_none());
    }
}
