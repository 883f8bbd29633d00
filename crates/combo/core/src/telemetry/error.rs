//! Telemetry snapshot validation errors.

use crate::error::{ComboError, ErrorSeverity};
use crate::{EffectId, Job};

/// Problems found in a telemetry snapshot supplied by a host or a replay file.
///
/// Resolution never raises these; they are reported when a snapshot is
/// loaded so broken fixtures are caught before they are replayed.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TelemetryError {
    /// Level is outside `1..=max`.
    #[error("level {level} is outside 1..={max}")]
    LevelOutOfRange { level: u8, max: u8 },

    /// The gauge belongs to a different job than the player's.
    #[error("gauge for {gauge} supplied while playing {job}")]
    GaugeJobMismatch { job: Job, gauge: Job },

    /// The same target effect is listed twice.
    #[error("{0} listed more than once on the target")]
    DuplicateTargetEffect(EffectId),
}

impl ComboError for TelemetryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::LevelOutOfRange { .. } | Self::DuplicateTargetEffect(_) => {
                ErrorSeverity::Validation
            }
            Self::GaugeJobMismatch { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LevelOutOfRange { .. } => "TELEMETRY_LEVEL_OUT_OF_RANGE",
            Self::GaugeJobMismatch { .. } => "TELEMETRY_GAUGE_JOB_MISMATCH",
            Self::DuplicateTargetEffect(_) => "TELEMETRY_DUPLICATE_TARGET_EFFECT",
        }
    }
}
