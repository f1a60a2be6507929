//! Layout synthesis by separate placement and routing.
//!
//! The synthesizer is parameterised by a [`Placer`] and a [`Router`]
//! capability: the placer decides where every qubit sits before, during,
//! and after each two-qubit layer, the router decomposes the transitions
//! between those placements into legal parallel transfers. Both phases
//! are timed and the wall-clock statistics of the last run are kept for
//! reporting.

use serde::Serialize;
use std::time::Instant;
use tracing::info;
use zona_ir::TwoQubitGateLayer;

use crate::types::{Placement, ReuseSet, Routing};

/// Placement capability: produce the placement sequence for a circuit.
///
/// For a circuit with `L` two-qubit layers the placer returns `2L + 1`
/// placements: the initial placement, followed per layer by an
/// execution placement (gate pairs inside a Rydberg zone) and a target
/// placement (rest positions consistent with the layer's reuse set).
pub trait Placer {
    /// Place all qubits for the given layers and reuse sets.
    fn place(
        &self,
        n_qubits: usize,
        two_qubit_gate_layers: &[TwoQubitGateLayer],
        reuse_sets: &[ReuseSet],
    ) -> Vec<Placement>;
}

/// Routing capability: decompose every placement transition into move
/// groups. The result has one routing per consecutive placement pair.
pub trait Router {
    /// Route all transitions of the placement sequence.
    fn route(&self, placements: &[Placement]) -> Vec<Routing>;
}

/// The synthesized layout: the placement sequence plus the routing of
/// every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// The placement sequence (see [`Placer`] for its shape).
    pub placements: Vec<Placement>,
    /// One routing per consecutive placement pair.
    pub routings: Vec<Routing>,
}

/// Wall-clock statistics of one synthesis run, in microseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Time spent in the placement phase.
    pub placement_time: u64,
    /// Time spent in the routing phase.
    pub routing_time: u64,
    /// Total synthesis time.
    pub total_time: u64,
}

/// Layout synthesizer composing a placement and a routing strategy.
pub struct PlacementAndRoutingSynthesizer<P, R> {
    placer: P,
    router: R,
    statistics: Statistics,
}

impl<P: Placer, R: Router> PlacementAndRoutingSynthesizer<P, R> {
    /// Compose a synthesizer from its two strategies.
    pub fn new(placer: P, router: R) -> Self {
        Self {
            placer,
            router,
            statistics: Statistics::default(),
        }
    }

    /// Synthesize the layout for one circuit.
    pub fn synthesize(
        &mut self,
        n_qubits: usize,
        two_qubit_gate_layers: &[TwoQubitGateLayer],
        reuse_sets: &[ReuseSet],
    ) -> Layout {
        info!("*** placement and routing layout synthesizer ***");
        let total_start = Instant::now();

        let placement_start = Instant::now();
        let placements = self
            .placer
            .place(n_qubits, two_qubit_gate_layers, reuse_sets);
        self.statistics.placement_time = placement_start.elapsed().as_micros() as u64;
        info!("time for placement: {}us", self.statistics.placement_time);

        let routing_start = Instant::now();
        let routings = self.router.route(&placements);
        self.statistics.routing_time = routing_start.elapsed().as_micros() as u64;
        info!("time for routing: {}us", self.statistics.routing_time);

        self.statistics.total_time = total_start.elapsed().as_micros() as u64;
        Layout {
            placements,
            routings,
        }
    }

    /// Statistics of the most recent [`synthesize`](Self::synthesize)
    /// run.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }
}
