//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while validating an atom program.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// An operation references an atom id the program does not define.
    #[error("Atom id {atom} out of range (program defines {num_atoms} atoms)")]
    AtomOutOfRange {
        /// The out-of-range atom id.
        atom: u32,
        /// Number of atoms the program defines.
        num_atoms: usize,
    },

    /// An operation references a zone id the program does not define.
    #[error("Zone id {zone} out of range (program defines {num_zones} zones)")]
    ZoneOutOfRange {
        /// The out-of-range zone id.
        zone: u32,
        /// Number of zones the program defines.
        num_zones: usize,
    },

    /// A move op lists a different number of atoms and target locations.
    #[error("Move op lists {atoms} atoms but {targets} target locations")]
    MalformedMove {
        /// Number of atoms in the op.
        atoms: usize,
        /// Number of target locations in the op.
        targets: usize,
    },

    /// An atom was loaded while already held by the AOD.
    #[error("Atom {atom} loaded twice without an intermediate store")]
    DoubleLoad {
        /// Name of the offending atom.
        atom: String,
    },

    /// An atom was moved or stored without being loaded first.
    #[error("Atom {atom} {op}ed while not loaded")]
    NotLoaded {
        /// Name of the offending atom.
        atom: String,
        /// The operation attempted ("move" or "store").
        op: &'static str,
    },

    /// An atom was still held by the AOD when the program ended.
    #[error("Atom {atom} still loaded at end of program")]
    DanglingLoad {
        /// Name of the offending atom.
        atom: String,
    },

    /// JSON (de)serialization failure.
    #[error("Program JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
