use anyhow::Result;
use backupfont::cli;

fn main() -> Result<()> {
    let code = cli::process_cli();
    if code != 0 {
        // Nothing holds resources that need destructors at this point.
        std::process::exit(code);
    }
    Ok(())
}
