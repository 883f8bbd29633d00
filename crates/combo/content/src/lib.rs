//! File-backed content for the combo engine.
//!
//! - Persisted user configuration (TOML), with recovery and version upgrade
//! - Telemetry scenarios (TOML snapshots) for offline replay
//! - Platform directories for configuration, logs and scenarios
//!
//! The engine itself never touches the filesystem; hosts use these loaders to
//! fill a [`combo_core::ConfigStore`] and to build snapshot oracles.

pub mod dirs;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, Expectation, LoadResult, Scenario, ScenarioLoader};
