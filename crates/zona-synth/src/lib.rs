//! Zona Layout Synthesis
//!
//! This crate is the core of the zoned neutral-atom compiler: given a
//! circuit split into alternating single- and two-qubit gate layers, it
//! decides which atoms stay loaded between layers, how atoms travel
//! between placements under the rigid-grid movement constraints, and
//! what operation stream the machine executes.
//!
//! # Pipeline
//!
//! ```text
//! layers ──────────────► ReuseAnalyzer ──► reuse sets
//! layers, reuse sets ──► Placer ─────────► placements
//! placements ──────────► Router ─────────► routings
//! S-layers, placements, routings ──► CodeGenerator ──► Program
//! ```
//!
//! The placer is a capability supplied by the embedding application (see
//! [`Placer`]); everything else ships here:
//!
//! - [`VertexMatchingReuseAnalyzer`]: reuse selection via maximum
//!   bipartite matching ([`matching`])
//! - [`IndependentSetRouter`]: conflict-graph independent-set
//!   decomposition of every placement transition
//! - [`CodeGenerator`]: gate rewriting plus ghost-spot-free row-by-row
//!   rearrangement
//! - [`PlacementAndRoutingSynthesizer`]: composes a placer and a router
//!   and collects phase statistics
//! - [`IndexedHeap`] / [`BoundedHeap`]: priority heaps with O(log n)
//!   update and erase, for placement and ordering searches
//!
//! # Example
//!
//! ```rust
//! use zona_synth::VertexMatchingReuseAnalyzer;
//! use zona_ir::QubitId;
//!
//! // reuse analysis on two crossing layers
//! let layers = vec![
//!     vec![[QubitId(0), QubitId(1)], [QubitId(2), QubitId(3)]],
//!     vec![[QubitId(0), QubitId(2)], [QubitId(1), QubitId(3)]],
//! ];
//! let reuse = VertexMatchingReuseAnalyzer::new().analyze(&layers);
//! assert_eq!(reuse[0].len(), 2);
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod heap;
pub mod matching;
pub mod reuse;
pub mod router;
pub mod synthesizer;
pub mod types;

pub use codegen::CodeGenerator;
pub use config::{CodeGeneratorConfig, ReuseAnalyzerConfig, RouterConfig, SynthesizerConfig};
pub use error::{SynthError, SynthResult};
pub use heap::{BoundedHeap, IndexedHeap};
pub use matching::maximum_bipartite_matching;
pub use reuse::VertexMatchingReuseAnalyzer;
pub use router::{IndependentSetRouter, is_compatible_movement};
pub use synthesizer::{Layout, Placer, PlacementAndRoutingSynthesizer, Router, Statistics};
pub use types::{MoveGroup, Placement, ReuseSet, Routing};
