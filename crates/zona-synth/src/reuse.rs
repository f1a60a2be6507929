//! Reuse analysis via bipartite vertex matching.
//!
//! An atom that participates in two-qubit gates in consecutive layers
//! can stay loaded across the layer boundary, saving one store/load
//! round trip. Which atoms to keep loaded is decided by pairing the gate
//! pairs of adjacent layers: gate pairs that share a qubit are candidate
//! partners, and a maximum bipartite matching picks a largest conflict-
//! free pairing. The shared qubits of every matched pairing form the
//! layer's reuse set.

use rustc_hash::FxHashSet;
use tracing::debug;
use zona_ir::{QubitId, TwoQubitGateLayer};

use crate::matching::maximum_bipartite_matching;
use crate::types::ReuseSet;

/// The default reuse analysis, reducing reuse selection to maximum
/// bipartite matching on adjacent two-qubit layers.
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexMatchingReuseAnalyzer;

impl VertexMatchingReuseAnalyzer {
    /// Create a new analyzer.
    pub fn new() -> Self {
        Self
    }

    /// Compute one reuse set per two-qubit layer.
    ///
    /// `result[k]` holds the qubits kept loaded across the boundary from
    /// layer `k` to layer `k + 1`; the final entry, having no following
    /// layer, is always empty.
    pub fn analyze(&self, two_qubit_gate_layers: &[TwoQubitGateLayer]) -> Vec<ReuseSet> {
        let mut reuse_sets: Vec<ReuseSet> = vec![FxHashSet::default(); two_qubit_gate_layers.len()];
        for (k, window) in two_qubit_gate_layers.windows(2).enumerate() {
            let (current, next) = (&window[0], &window[1]);
            let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); current.len()];
            for (left, pair) in current.iter().enumerate() {
                for (right, next_pair) in next.iter().enumerate() {
                    if shares_qubit(pair, next_pair) {
                        adjacency[left].push(right);
                    }
                }
            }
            let matching = maximum_bipartite_matching(&adjacency, false);
            for (right, matched) in matching.iter().enumerate() {
                if let Some(left) = matched {
                    for &qubit in &current[*left] {
                        if next[right].contains(&qubit) {
                            reuse_sets[k].insert(qubit);
                        }
                    }
                }
            }
            debug!(
                "layer {k}: {} of {} gate pairs matched for reuse",
                matching.iter().filter(|m| m.is_some()).count(),
                current.len()
            );
        }
        reuse_sets
    }
}

fn shares_qubit(a: &[QubitId; 2], b: &[QubitId; 2]) -> bool {
    a.contains(&b[0]) || a.contains(&b[1])
}
