//! Deterministic action substitution engine.
//!
//! `combo-core` decides, for one player-triggered nominal action, which legal
//! action should actually be sent for execution. The decision reads live combat
//! telemetry through the [`CombatOracle`] facade and never writes to it.
//!
//! - [`Preset`]: the static catalogue of feature flags, one per rule unit
//! - [`ComboRule`]: the shared contract every rule unit implements
//! - [`ComboResolver`]: selects, orders and evaluates the enabled rules
//! - [`ConfigStore`]: snapshot-on-read configuration shared with the editor
//! - [`ComboCommand`]: the closed text-command vocabulary
//!
//! Resolution is single-pass: a rule's output is never fed back into another
//! rule, so every call completes in bounded time.
pub mod action;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod job;
pub mod jobs;
pub mod preset;
pub mod resolver;
pub mod rule;
pub mod telemetry;

pub use action::{ActionId, EffectId};
pub use command::{CommandError, CommandOutcome, ComboCommand, ListFilter};
pub use config::{CURRENT_CONFIG_VERSION, ComboConfig, ConfigStore};
pub use engine::ComboEngine;
pub use error::{ComboError, ErrorSeverity};
pub use job::Job;
pub use preset::{Preset, PresetInfo, grouped_presets};
pub use resolver::ComboResolver;
pub use rule::{ComboRule, RuleContext};
pub use telemetry::{
    BardGauge, CombatOracle, ComboState, DancerGauge, FormOverride, Gauge, JobGauge, Song,
    StatusEffect, TelemetryError, TelemetrySnapshot,
};
