//! Shared type aliases of the synthesis pipeline.

use rustc_hash::FxHashSet;
use zona_arch::Site;
use zona_ir::QubitId;

/// Where every logical qubit sits: `placement[q]` is the trap holding
/// qubit `q`. All placements of one circuit share length and qubit
/// ordering.
pub type Placement = Vec<Site>;

/// Qubits moved together in one parallel AOD transfer
/// (pick-up, move, put-down).
pub type MoveGroup = Vec<QubitId>;

/// The decomposition of one placement-to-placement transition into
/// sequentially executed move groups.
pub type Routing = Vec<MoveGroup>;

/// Qubits that stay loaded across one two-qubit layer boundary.
pub type ReuseSet = FxHashSet<QubitId>;
