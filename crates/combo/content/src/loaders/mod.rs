//! Content loaders for reading and writing combo data files.

pub mod config;
pub mod scenario;

pub use config::ConfigLoader;
pub use scenario::{Expectation, Scenario, ScenarioLoader};

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
