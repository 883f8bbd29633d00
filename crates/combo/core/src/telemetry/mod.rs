//! Read-only combat telemetry.
//!
//! The host owns every value here. The engine polls it through
//! [`CombatOracle`] once per resolution and treats the answers as an immutable
//! snapshot for the duration of that call.
mod error;
mod gauge;
mod oracle;
mod snapshot;

pub use error::TelemetryError;
pub use gauge::{BardGauge, DancerGauge, Gauge, JobGauge, Song};
pub use oracle::{CombatOracle, ComboState, StatusEffect};
pub use snapshot::{FormOverride, TelemetrySnapshot};
