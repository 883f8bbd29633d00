//! Common error infrastructure for combo-core.
//!
//! Domain-specific errors ([`crate::CommandError`], [`crate::TelemetryError`])
//! live next to the code that raises them. They share the [`ComboError`] trait
//! so hosts can decide how loudly to report them.
//!
//! Resolution itself never fails: an unknown action, a missing target or an
//! odd telemetry value all degrade to "no substitution".

/// Severity level of an error, used for categorization and reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Invalid user input. Report it and carry on.
    ///
    /// Examples: missing command argument, unknown feature name
    Validation,

    /// Host wiring problem that the engine could work around.
    ///
    /// Examples: gauge reported for a job the player is not on
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates a bug rather than bad input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all combo-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by who has to fix it, not by impact
pub trait ComboError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
