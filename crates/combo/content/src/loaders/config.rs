//! Combo configuration loader.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use combo_core::ComboConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for the persisted configuration in TOML.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a configuration exactly as stored, without upgrading it.
    pub fn load(path: &Path) -> LoadResult<ComboConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a configuration from TOML text.
    pub fn parse(content: &str) -> LoadResult<ComboConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }

    /// Write `config` to `path`, creating parent directories as needed.
    pub fn save(path: &Path, config: &ComboConfig) -> LoadResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {}", path.display()))?;

        tracing::info!(path = %path.display(), "saved combo configuration");
        Ok(())
    }

    /// Load the configuration for a host at startup.
    ///
    /// A missing file yields the defaults. An unreadable or malformed file is
    /// reported and also yields the defaults, leaving the file untouched. A
    /// configuration from an older version is upgraded and saved back.
    ///
    /// # Errors
    ///
    /// Fails only if an upgraded configuration cannot be written.
    pub fn load_or_default(path: &Path) -> LoadResult<ComboConfig> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "combo configuration is malformed, using defaults"
                    );
                    return Ok(ComboConfig::default());
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no combo configuration, using defaults");
                return Ok(ComboConfig::default());
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "combo configuration is unreadable, using defaults"
                );
                return Ok(ComboConfig::default());
            }
        };

        tracing::info!(
            path = %path.display(),
            version = config.version,
            enabled = config.enabled_presets.len(),
            "loaded combo configuration"
        );

        if config.upgrade() {
            Self::save(path, &config)?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combo_core::{CURRENT_CONFIG_VERSION, Preset};

    #[test]
    fn missing_fields_take_defaults() {
        let config = ConfigLoader::parse("").unwrap();

        assert_eq!(config.version, 0);
        assert!(config.enabled_presets.is_empty());
        assert_eq!(
            config.dancer_dance_compat_action_ids,
            ComboConfig::default().dancer_dance_compat_action_ids
        );
    }

    #[test]
    fn unknown_preset_names_are_skipped() {
        let config = ConfigLoader::parse(&format!(
            "version = {CURRENT_CONFIG_VERSION}\n\
             enabled_presets = [\"BardIronJawsFeature\", \"MachinistRemovedFeature\"]\n"
        ))
        .unwrap();

        assert_eq!(config.enabled_presets.len(), 1);
        assert!(config.is_enabled(Preset::BardIronJawsFeature));
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(ConfigLoader::parse("enable_secret_combos = \"yes\"").is_err());
    }
}
