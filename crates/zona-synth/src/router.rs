//! Routing by independent-set decomposition of the conflict graph.
//!
//! Between two placements, every qubit whose trap changes must be
//! carried by the AOD grid. The grid moves rigidly: picked-up atoms must
//! preserve their relative x-order, y-order, and same-row/same-column
//! relations between start and target, otherwise rows or columns of the
//! grid would cross or collapse mid-flight. Moves that violate this are
//! *incompatible* and cannot share a transfer.
//!
//! The router builds the conflict graph over all movers and peels off
//! greedy independent sets, longest moves first, until every mover is
//! scheduled. Each independent set becomes one move group of the
//! emitted routing.

use petgraph::graph::{NodeIndex, UnGraph};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;
use zona_arch::Architecture;
use zona_ir::QubitId;

use crate::config::RouterConfig;
use crate::synthesizer::Router;
use crate::types::{Placement, Routing};

/// A movement vector `(start_x, start_y, target_x, target_y)` in
/// architecture coordinates.
type MovementVector = (i64, i64, i64, i64);

/// Whether two movements can share one parallel AOD transfer.
///
/// Both orders and both equalities must be preserved per axis: the
/// movements may neither swap their relative x or y order nor merge
/// into or split out of a common row or column.
pub fn is_compatible_movement(v: MovementVector, w: MovementVector) -> bool {
    let (vx0, vy0, vx1, vy1) = v;
    let (wx0, wy0, wx1, wy1) = w;
    (vx0 == wx0) == (vx1 == wx1)
        && (vx0 < wx0) == (vx1 < wx1)
        && (vy0 == wy0) == (vy1 == wy1)
        && (vy0 < wy0) == (vy1 < wy1)
}

/// The default router: conflict-graph independent-set decomposition.
pub struct IndependentSetRouter<'a> {
    architecture: &'a Architecture,
    config: RouterConfig,
}

impl<'a> IndependentSetRouter<'a> {
    /// Create a router for the given architecture.
    pub fn new(architecture: &'a Architecture, config: RouterConfig) -> Self {
        Self {
            architecture,
            config,
        }
    }

    /// The router configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    fn movement_vector(&self, placement: &Placement, target: &Placement, qubit: QubitId) -> MovementVector {
        let (x0, y0) = self.architecture.exact_slm_location(placement[qubit.index()]);
        let (x1, y1) = self.architecture.exact_slm_location(target[qubit.index()]);
        (x0, y0, x1, y1)
    }

    fn route_transition(&self, start: &Placement, target: &Placement) -> Routing {
        debug_assert_eq!(start.len(), target.len());
        // movers, longest distance first; ties by qubit id
        let mut ordered: Vec<(f64, QubitId)> = start
            .iter()
            .zip(target)
            .enumerate()
            .filter(|(_, (from, to))| from != to)
            .map(|(q, (&from, &to))| (self.architecture.distance(from, to), QubitId::from(q)))
            .collect();
        ordered.sort_unstable_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
        let mut atoms_to_move: Vec<QubitId> = ordered.into_iter().map(|(_, q)| q).collect();

        // conflict graph: an edge per incompatible pair of movements
        let mut conflicts = UnGraph::<QubitId, ()>::default();
        let nodes: FxHashMap<QubitId, NodeIndex> = atoms_to_move
            .iter()
            .map(|&q| (q, conflicts.add_node(q)))
            .collect();
        for (i, &atom) in atoms_to_move.iter().enumerate() {
            let movement = self.movement_vector(start, target, atom);
            for &neighbor in &atoms_to_move[i + 1..] {
                let neighbor_movement = self.movement_vector(start, target, neighbor);
                if !is_compatible_movement(movement, neighbor_movement) {
                    conflicts.add_edge(nodes[&atom], nodes[&neighbor], ());
                }
            }
        }
        debug!(
            "transition with {} movers, {} conflicts",
            atoms_to_move.len(),
            conflicts.edge_count()
        );

        // peel off greedy independent sets until all movers are scheduled
        let mut routing: Routing = Vec::new();
        while !atoms_to_move.is_empty() {
            let mut independent_set = Vec::new();
            let mut remaining = Vec::new();
            let mut conflicted: FxHashSet<QubitId> = FxHashSet::default();
            for &atom in &atoms_to_move {
                if conflicted.contains(&atom) {
                    remaining.push(atom);
                    continue;
                }
                independent_set.push(atom);
                for neighbor in conflicts.neighbors(nodes[&atom]) {
                    conflicted.insert(conflicts[neighbor]);
                }
            }
            routing.push(independent_set);
            atoms_to_move = remaining;
        }
        routing
    }
}

impl Router for IndependentSetRouter<'_> {
    fn route(&self, placements: &[Placement]) -> Vec<Routing> {
        placements
            .windows(2)
            .map(|window| self.route_transition(&window[0], &window[1]))
            .collect()
    }
}
