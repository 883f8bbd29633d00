//! CLI runtime configuration.
use std::env;
use std::path::PathBuf;

use combo_content::dirs;

/// Settings for one `pcombo` session.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Where the combo configuration is loaded from and saved to.
    pub config_path: PathBuf,
    /// Directory for a daily rolling log file. Logs go to stderr only when unset.
    pub log_dir: Option<PathBuf>,
    /// Directory searched for replay scenarios.
    pub scenario_dir: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config_path: dirs::default_config_path(),
            log_dir: None,
            scenario_dir: dirs::default_scenario_dir(),
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PCOMBO_CONFIG_PATH` - Configuration file (default: platform config dir)
    /// - `PCOMBO_LOG_DIR` - Also write logs to a daily file in this directory
    /// - `PCOMBO_SCENARIO_DIR` - Replay scenarios (default: platform data dir)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(path) = read_env::<PathBuf>("PCOMBO_CONFIG_PATH") {
            config.config_path = path;
        }

        config.log_dir = read_env::<PathBuf>("PCOMBO_LOG_DIR");

        if let Some(dir) = read_env::<PathBuf>("PCOMBO_SCENARIO_DIR") {
            config.scenario_dir = dir;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let value = env::var(key).ok()?;
    if value.is_empty() {
        return None;
    }
    value.parse().ok()
}
