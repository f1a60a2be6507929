//! Error types for the hardware description.

use thiserror::Error;

/// Errors raised while loading or validating an architecture.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArchError {
    /// An SLM declares zero rows or zero columns.
    #[error("SLM {slm} has a zero-sized trap grid")]
    EmptyGrid {
        /// Index of the offending SLM.
        slm: usize,
    },

    /// An SLM declares a non-positive site separation.
    #[error("SLM {slm} has a non-positive site separation")]
    NonPositiveSeparation {
        /// Index of the offending SLM.
        slm: usize,
    },

    /// A zone references an SLM the architecture does not define.
    #[error("Unknown SLM id {slm}")]
    UnknownSlm {
        /// The unresolved SLM id.
        slm: u32,
    },

    /// An entangling zone's rectangle does not enclose its member SLMs.
    #[error("Entangling zone {zone} does not enclose its member SLMs")]
    ZoneExtentMismatch {
        /// Index of the offending entangling zone.
        zone: usize,
    },

    /// The architecture defines no storage zone.
    #[error("Architecture defines no storage zone")]
    NoStorageZone,

    /// JSON (de)serialization failure.
    #[error("Architecture JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for architecture operations.
pub type ArchResult<T> = Result<T, ArchError>;
