//! Zona Intermediate Representation
//!
//! This crate provides the data structures shared between the front end of
//! the zoned neutral-atom compiler (gate layers produced by a scheduler)
//! and its back end (the emitted atom program).
//!
//! # Overview
//!
//! A circuit arrives already split into alternating layers:
//!
//! ```text
//! S0  T0  S1  T1  ...  T(L-1)  SL
//! ```
//!
//! where each `S` is a [`SingleQubitGateLayer`] (an ordered list of global
//! or local one-qubit operations) and each `T` is a [`TwoQubitGateLayer`]
//! (disjoint qubit pairs entangled in the same Rydberg pulse).
//!
//! The compiler's output is a [`Program`]: named zones, named atoms with
//! initial coordinates, and an ordered stream of atom operations ([`Op`])
//! that load, move, and store atoms and fire global or local gates.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] for addressing logical qubits
//! - **Gates**: [`Gate`] for the supported one-qubit gate set
//! - **Layers**: [`LayerOp`], [`SingleQubitGateLayer`], [`TwoQubitGateLayer`]
//! - **Output**: [`Program`] with [`Op`], [`AtomId`], [`ZoneId`]
//!
//! # Example: Building a Program
//!
//! ```rust
//! use zona_ir::{Location, Op, Program, ZoneExtent};
//!
//! let mut program = Program::new();
//! let zone = program.add_zone("global", ZoneExtent::new(0.0, 0.0, 100.0, 50.0));
//! let a0 = program.add_atom("atom0", Location::new(10.0, 20.0));
//!
//! program.push(Op::Load { atoms: vec![a0] });
//! program.push(Op::Move {
//!     atoms: vec![a0],
//!     targets: vec![Location::new(40.0, 20.0)],
//! });
//! program.push(Op::Store { atoms: vec![a0] });
//! program.push(Op::GlobalRy { zone, theta: std::f64::consts::PI });
//!
//! assert!(program.validate().is_ok());
//! ```

pub mod error;
pub mod gate;
pub mod layer;
pub mod program;
pub mod qubit;

pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use layer::{LayerOp, SingleQubitGateLayer, TwoQubitGateLayer};
pub use program::{Atom, AtomId, Location, Op, Program, Zone, ZoneExtent, ZoneId};
pub use qubit::QubitId;
