//! Telemetry scenario loader.
//!
//! A scenario freezes one moment of combat so a resolution can be replayed
//! offline:
//!
//! ```toml
//! description = "Iron Jaws with Caustic Bite about to fall off"
//!
//! [telemetry]
//! job = "bard"
//! level = 80
//! self_buffs = [122]
//! target_effects = [
//!     { id = 1200, remaining = 3.0 },
//!     { id = 1201, remaining = 7.0 },
//! ]
//!
//! [telemetry.gauge.bard]
//! song = "wanderers_minuet"
//!
//! [[expect]]
//! action = 3560
//! resolves_to = 3560
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use combo_core::{ActionId, ComboError, TelemetrySnapshot};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Expected outcome of resolving one action against a scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Expectation {
    pub action: ActionId,
    pub resolves_to: ActionId,
}

/// A replayable telemetry snapshot.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub description: String,
    pub telemetry: TelemetrySnapshot,
    /// Assertions checked by `replay`.
    #[serde(default)]
    pub expect: Vec<Expectation>,
}

/// Loader for scenario files under a directory.
pub struct ScenarioLoader {
    dir: PathBuf,
}

impl ScenarioLoader {
    const EXTENSION: &'static str = "toml";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load and validate one scenario file.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        let scenario: Scenario = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario TOML: {}", e))?;

        if let Err(e) = scenario.telemetry.validate() {
            let severity = e.severity();
            if severity.is_internal() {
                tracing::warn!(
                    path = %path.display(),
                    code = e.error_code(),
                    severity = severity.as_str(),
                    "scenario telemetry is inconsistent"
                );
            }
            return Err(e).with_context(|| format!("Invalid telemetry in {}", path.display()));
        }

        Ok(scenario)
    }

    /// Resolve a scenario reference: an existing path, or a name looked up
    /// in the scenario directory with or without the `.toml` extension.
    pub fn path_for(&self, name: &str) -> PathBuf {
        let direct = Path::new(name);
        if direct.is_file() {
            return direct.to_path_buf();
        }

        let mut path = self.dir.join(name);
        if path.extension().is_none() {
            path.set_extension(Self::EXTENSION);
        }
        path
    }

    /// Load a scenario by name or path.
    pub fn load_named(&self, name: &str) -> LoadResult<Scenario> {
        Self::load(&self.path_for(name))
    }

    /// Names of the scenarios in the directory, sorted.
    pub fn list(&self) -> LoadResult<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read scenario directory {}", self.dir.display()))?
        {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(Self::EXTENSION)
                && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
            {
                names.push(stem.to_owned());
            }
        }

        names.sort();
        Ok(names)
    }
}
