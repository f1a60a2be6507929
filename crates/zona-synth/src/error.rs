//! Error types for layout synthesis.

use thiserror::Error;

/// Errors that can occur during layout synthesis and code generation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// A single-qubit gate outside the supported rewrite table reached
    /// code generation. Fatal for the circuit; no partial output is
    /// useful.
    #[error("Unsupported single-qubit gate: {gate}")]
    UnsupportedGate {
        /// Name of the offending gate.
        gate: String,
    },

    /// A caller-supplied layer, placement, or routing breaks a documented
    /// precondition.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A configuration value was rejected at validation.
    #[error("Configuration value {name}={value} out of range: {reason}")]
    ConfigOutOfRange {
        /// Name of the configuration field.
        name: &'static str,
        /// The rejected value.
        value: i64,
        /// Why the value is rejected.
        reason: &'static str,
    },
}

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;
