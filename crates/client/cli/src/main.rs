//! `pcombo` host entry point.
//!
//! Reads one line at a time from stdin. `/pcombo ...` lines change the
//! feature configuration; `resolve`, `scenario` and `replay` run resolutions
//! against telemetry scenarios. Type `help` for the full list.
mod config;
mod logging;
mod session;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use combo_content::ConfigLoader;
use config::CliConfig;
use session::{Reply, Session};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Config: {}", config.config_path.display());
    tracing::info!("Scenarios: {}", config.scenario_dir.display());

    let combo_config = ConfigLoader::load_or_default(&config.config_path)?;
    let mut session = Session::new(combo_config, config.config_path, config.scenario_dir);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        match session.handle_line(&line) {
            Ok(Reply::Lines(lines)) => {
                for line in lines {
                    writeln!(stdout, "{line}")?;
                }
            }
            Ok(Reply::Quit) => break,
            Err(e) => writeln!(stdout, "error: {e:#}")?,
        }
        stdout.flush()?;
    }

    tracing::info!("Session ended");
    Ok(())
}
