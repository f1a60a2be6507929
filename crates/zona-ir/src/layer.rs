//! Gate layers as delivered by the scheduler.
//!
//! A circuit reaches the layout synthesizer already split into alternating
//! single-qubit and two-qubit layers `S0 T0 S1 T1 ... T(L-1) SL`. The
//! scheduler guarantees that within a [`TwoQubitGateLayer`] all pairs are
//! qubit-disjoint, so the whole layer can be entangled by one global CZ
//! pulse once the pairs sit next to each other in a Rydberg zone.

use serde::{Deserialize, Serialize};

use crate::gate::Gate;
use crate::qubit::QubitId;

/// A single entry of a single-qubit gate layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LayerOp {
    /// A gate applied to every qubit at once (one global pulse).
    Global(Gate),
    /// A gate applied to one addressed qubit.
    Local {
        /// The gate to apply.
        gate: Gate,
        /// The addressed qubit.
        qubit: QubitId,
    },
}

impl LayerOp {
    /// Shorthand for a local gate entry.
    pub fn local(gate: Gate, qubit: impl Into<QubitId>) -> Self {
        LayerOp::Local {
            gate,
            qubit: qubit.into(),
        }
    }
}

/// An ordered list of global or local one-qubit operations.
pub type SingleQubitGateLayer = Vec<LayerOp>;

/// Unordered, disjoint qubit pairs entangled within the same layer.
pub type TwoQubitGateLayer = Vec<[QubitId; 2]>;
