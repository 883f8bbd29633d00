//! Platform-specific directory utilities
//!
//! Follows platform conventions through `directories`, with a local fallback
//! when no home directory can be determined.

use std::path::PathBuf;

use directories::ProjectDirs;

const APPLICATION: &str = "pcombo";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APPLICATION)
}

/// Default location of the persisted configuration.
///
/// - macOS: `~/Library/Application Support/pcombo/pcombo.toml`
/// - Linux: `~/.config/pcombo/pcombo.toml` (or `$XDG_CONFIG_HOME/pcombo`)
/// - Windows: `%APPDATA%\pcombo\config\pcombo.toml`
/// - Fallback: `./pcombo.toml`
pub fn default_config_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().join("pcombo.toml"))
        .unwrap_or_else(|| PathBuf::from("pcombo.toml"))
}

/// Default directory for log files.
///
/// - Linux: `~/.cache/pcombo/logs` (or `$XDG_CACHE_HOME/pcombo/logs`)
/// - Fallback: `/tmp/pcombo/logs`
pub fn default_log_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("/tmp/pcombo/logs"))
}

/// Default directory searched for replay scenarios.
pub fn default_scenario_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("scenarios"))
        .unwrap_or_else(|| PathBuf::from("scenarios"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_namespaced() {
        assert!(default_config_path().ends_with("pcombo.toml"));
        assert!(default_log_dir().ends_with("logs"));
        assert!(default_scenario_dir().ends_with("scenarios"));
    }
}
