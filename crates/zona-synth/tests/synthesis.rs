//! End-to-end tests for the synthesis pipeline.
//!
//! The scenarios use a two-zone fixture machine: a 10x10 storage grid at
//! the origin and one entangling zone 200 units above it, both with a
//! site separation of 10.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use rustc_hash::FxHashSet;
use zona_arch::{Architecture, EntanglingZone, Site, Slm, SlmId};
use zona_ir::{Gate, LayerOp, Op, Program, QubitId, SingleQubitGateLayer, TwoQubitGateLayer};
use zona_synth::{
    CodeGenerator, CodeGeneratorConfig, IndependentSetRouter, Placement,
    PlacementAndRoutingSynthesizer, Placer, ReuseSet, Router, RouterConfig, SynthError,
    VertexMatchingReuseAnalyzer,
};

const STORAGE: SlmId = SlmId(0);
const GATE: SlmId = SlmId(1);

fn fixture_arch() -> Architecture {
    Architecture::new(
        "fixture",
        vec![
            Slm::new(10, 10, (0, 0), (10, 10)),
            Slm::new(4, 10, (0, 200), (10, 10)),
        ],
        vec![STORAGE],
        vec![EntanglingZone::new((0, 200, 100, 240), vec![GATE])],
    )
    .unwrap()
}

/// Parks qubit `q` in storage column `q` and executes pair `i` of each
/// layer in entangling columns `2i` and `2i + 1`.
struct ColumnPlacer;

impl Placer for ColumnPlacer {
    fn place(
        &self,
        n_qubits: usize,
        two_qubit_gate_layers: &[TwoQubitGateLayer],
        _reuse_sets: &[ReuseSet],
    ) -> Vec<Placement> {
        let rest: Placement = (0..n_qubits).map(|q| Site::new(STORAGE, 0, q)).collect();
        let mut placements = vec![rest.clone()];
        for layer in two_qubit_gate_layers {
            let mut execution = rest.clone();
            for (i, pair) in layer.iter().enumerate() {
                execution[pair[0].index()] = Site::new(GATE, 0, 2 * i);
                execution[pair[1].index()] = Site::new(GATE, 0, 2 * i + 1);
            }
            placements.push(execution);
            placements.push(rest.clone());
        }
        placements
    }
}

fn op_kind(op: &Op) -> &'static str {
    match op {
        Op::Load { .. } => "load",
        Op::Move { .. } => "move",
        Op::Store { .. } => "store",
        Op::GlobalCz { .. } => "cz",
        Op::GlobalRy { .. } => "ry",
        Op::LocalRz { .. } => "rz",
        Op::LocalU { .. } => "u",
    }
}

/// Every store must put down exactly the atoms loaded since the last
/// store.
fn assert_load_store_integrity(program: &Program) {
    let mut loaded: FxHashSet<u32> = FxHashSet::default();
    for op in program.ops() {
        match op {
            Op::Load { atoms } => loaded.extend(atoms.iter().map(|a| a.0)),
            Op::Store { atoms } => {
                let stored: FxHashSet<u32> = atoms.iter().map(|a| a.0).collect();
                assert_eq!(stored, loaded, "store does not match the loads before it");
                loaded.clear();
            }
            _ => {}
        }
    }
    assert!(loaded.is_empty(), "atoms left loaded at end of program");
}

#[test]
fn trivial_two_qubit_circuit() {
    let arch = fixture_arch();
    let single_layers: Vec<SingleQubitGateLayer> = vec![
        vec![
            LayerOp::local(Gate::H, 0_u32),
            LayerOp::local(Gate::H, 1_u32),
        ],
        vec![],
    ];
    let two_layers: Vec<TwoQubitGateLayer> = vec![vec![[QubitId(0), QubitId(1)]]];

    let reuse = VertexMatchingReuseAnalyzer::new().analyze(&two_layers);
    let router = IndependentSetRouter::new(&arch, RouterConfig::default());
    let mut synthesizer = PlacementAndRoutingSynthesizer::new(ColumnPlacer, router);
    let layout = synthesizer.synthesize(2, &two_layers, &reuse);
    assert_eq!(layout.placements.len(), 3);
    assert_eq!(layout.routings.len(), 2);

    let generator = CodeGenerator::new(&arch, CodeGeneratorConfig::default()).unwrap();
    let program = generator
        .generate(&single_layers, &layout.placements, &layout.routings)
        .unwrap();
    program.validate().unwrap();
    assert_load_store_integrity(&program);

    let kinds: Vec<&str> = program.ops().iter().map(op_kind).collect();
    assert_eq!(
        kinds,
        vec!["u", "u", "load", "move", "store", "cz", "load", "move", "store"]
    );
    // the two Hadamards rewrite to U(pi/2, 0, pi)
    for op in &program.ops()[..2] {
        let Op::LocalU {
            theta, phi, lambda, ..
        } = op
        else {
            panic!("expected a local U gate, got {op:?}");
        };
        assert_eq!((*theta, *phi, *lambda), (FRAC_PI_2, 0.0, PI));
    }
    // the CZ pulse covers the one entangling zone
    let Op::GlobalCz { zones } = &program.ops()[5] else {
        panic!("expected the global CZ");
    };
    assert_eq!(zones.len(), 1);
}

#[test]
fn reuse_detection_on_crossing_layers() {
    let two_layers: Vec<TwoQubitGateLayer> = vec![
        vec![[QubitId(0), QubitId(1)], [QubitId(2), QubitId(3)]],
        vec![[QubitId(0), QubitId(2)], [QubitId(1), QubitId(3)]],
    ];
    let reuse = VertexMatchingReuseAnalyzer::new().analyze(&two_layers);
    assert_eq!(reuse.len(), 2);
    // a maximum matching of size 2 exists; one qubit per matched pair
    // stays loaded, and the two reused qubits come from distinct pairs
    let reused: Vec<u32> = {
        let mut v: Vec<u32> = reuse[0].iter().map(|q| q.0).collect();
        v.sort_unstable();
        v
    };
    assert!(reused == vec![0, 3] || reused == vec![1, 2]);
    assert!(reuse[1].is_empty());
}

#[test]
fn row_by_row_pickup_offsets_the_loaded_row() {
    let arch = fixture_arch();
    // movers in two storage rows: q0 alone at y = 0, q1 and q2 at y = 10
    let start: Placement = vec![
        Site::new(STORAGE, 0, 0),
        Site::new(STORAGE, 1, 5),
        Site::new(STORAGE, 1, 6),
    ];
    let target: Placement = vec![
        Site::new(GATE, 0, 0),
        Site::new(GATE, 1, 5),
        Site::new(GATE, 1, 6),
    ];
    let router = IndependentSetRouter::new(&arch, RouterConfig::default());
    let routings = router.route(&[start.clone(), target.clone()]);
    // all three movements are compatible: one transfer
    assert_eq!(routings[0].len(), 1);

    let generator = CodeGenerator::new(&arch, CodeGeneratorConfig::default()).unwrap();
    let single_layers: Vec<SingleQubitGateLayer> = vec![vec![], vec![]];
    let placements = vec![start.clone(), target.clone(), start.clone()];
    let routings = router.route(&placements);
    let program = generator
        .generate(&single_layers, &placements, &routings)
        .unwrap();
    program.validate().unwrap();
    assert_load_store_integrity(&program);

    let kinds: Vec<&str> = program.ops().iter().map(op_kind).collect();
    assert_eq!(
        kinds,
        vec![
            "load", "move", "load", "move", "store", // into the gate zone
            "cz", "load", "move", "load", "move", "store", // and back
        ]
    );
    // first load picks up the lone atom of the bottom row
    let Op::Load { atoms } = &program.ops()[0] else {
        panic!("expected a load");
    };
    assert_eq!(atoms.len(), 1);
    // the offset move shifts it diagonally: no atom of row y = 10 sits
    // in its column, so it parks at (1, 1)
    let Op::Move { atoms, targets } = &program.ops()[1] else {
        panic!("expected the offset move");
    };
    assert_eq!(atoms.len(), 1);
    assert_eq!((targets[0].x, targets[0].y), (1.0, 1.0));
    // the second load picks up the remaining row
    let Op::Load { atoms } = &program.ops()[2] else {
        panic!("expected a load");
    };
    assert_eq!(atoms.len(), 2);
    // the final move carries all three to their targets, longest move
    // first (all tie here, so qubit order)
    let Op::Move { atoms, targets } = &program.ops()[3] else {
        panic!("expected the final move");
    };
    assert_eq!(atoms.len(), 3);
    assert_eq!((targets[0].x, targets[0].y), (0.0, 200.0));
    assert_eq!((targets[1].x, targets[1].y), (50.0, 210.0));
    assert_eq!((targets[2].x, targets[2].y), (60.0, 210.0));
}

#[test]
fn vertical_offset_when_column_continues() {
    let arch = fixture_arch();
    // q0 at (0, 0) and q1 directly above at (0, 10): the column picks up
    // a new atom, so the offset stays vertical
    let start: Placement = vec![Site::new(STORAGE, 0, 0), Site::new(STORAGE, 1, 0)];
    let target: Placement = vec![Site::new(GATE, 0, 0), Site::new(GATE, 1, 0)];
    let router = IndependentSetRouter::new(&arch, RouterConfig::default());
    let placements = vec![start.clone(), target, start];
    let routings = router.route(&placements);

    let generator = CodeGenerator::new(&arch, CodeGeneratorConfig::default()).unwrap();
    let single_layers: Vec<SingleQubitGateLayer> = vec![vec![], vec![]];
    let program = generator
        .generate(&single_layers, &placements, &routings)
        .unwrap();
    let Op::Move { targets, .. } = &program.ops()[1] else {
        panic!("expected the offset move");
    };
    assert_eq!((targets[0].x, targets[0].y), (0.0, 1.0));
}

#[test]
fn one_qubit_circuit_treats_global_as_local() {
    let arch = fixture_arch();
    let generator = CodeGenerator::new(&arch, CodeGeneratorConfig::default()).unwrap();
    let single_layers: Vec<SingleQubitGateLayer> = vec![vec![LayerOp::Global(Gate::H)]];
    let placements: Vec<Placement> = vec![vec![Site::new(STORAGE, 0, 0)]];
    let program = generator.generate(&single_layers, &placements, &[]).unwrap();
    assert_eq!(program.ops().len(), 1);
    let Op::LocalU {
        theta, phi, lambda, ..
    } = &program.ops()[0]
    else {
        panic!("a global gate on a one-qubit circuit must become local");
    };
    assert_eq!((*theta, *phi, *lambda), (FRAC_PI_2, 0.0, PI));
}

#[test]
fn global_ry_layers_pulse_the_global_zone() {
    let arch = fixture_arch();
    let generator = CodeGenerator::new(&arch, CodeGeneratorConfig::default()).unwrap();
    let single_layers: Vec<SingleQubitGateLayer> = vec![vec![
        LayerOp::Global(Gate::Ry(0.25)),
        LayerOp::Global(Gate::Y),
    ]];
    let placements: Vec<Placement> =
        vec![vec![Site::new(STORAGE, 0, 0), Site::new(STORAGE, 0, 1)]];
    let program = generator.generate(&single_layers, &placements, &[]).unwrap();
    let Op::GlobalRy { theta, .. } = &program.ops()[0] else {
        panic!("expected a global RY");
    };
    assert_eq!(*theta, 0.25);
    let Op::GlobalRy { theta, .. } = &program.ops()[1] else {
        panic!("expected a global RY");
    };
    assert_eq!(*theta, PI);
}

#[test]
fn unsupported_global_gate_is_an_invariant_violation() {
    let arch = fixture_arch();
    let generator = CodeGenerator::new(&arch, CodeGeneratorConfig::default()).unwrap();
    let single_layers: Vec<SingleQubitGateLayer> = vec![vec![LayerOp::Global(Gate::H)]];
    let placements: Vec<Placement> =
        vec![vec![Site::new(STORAGE, 0, 0), Site::new(STORAGE, 0, 1)]];
    let result = generator.generate(&single_layers, &placements, &[]);
    assert!(matches!(result, Err(SynthError::InvariantViolation(_))));
}

/// Emit one local gate on a two-qubit fixture circuit and return the op.
fn emit_local(gate: Gate) -> Result<Op, SynthError> {
    let arch = fixture_arch();
    let generator = CodeGenerator::new(&arch, CodeGeneratorConfig::default())?;
    let single_layers: Vec<SingleQubitGateLayer> = vec![vec![LayerOp::local(gate, 0_u32)]];
    let placements: Vec<Placement> =
        vec![vec![Site::new(STORAGE, 0, 0), Site::new(STORAGE, 0, 1)]];
    let program = generator.generate(&single_layers, &placements, &[])?;
    Ok(program.ops()[0].clone())
}

fn assert_rz(gate: Gate, expected: f64) {
    let Op::LocalRz { theta, .. } = emit_local(gate).unwrap() else {
        panic!("{} must rewrite to a local RZ", gate.name());
    };
    assert_eq!(theta, expected);
}

fn assert_u(gate: Gate, expected: (f64, f64, f64)) {
    let Op::LocalU {
        theta, phi, lambda, ..
    } = emit_local(gate).unwrap()
    else {
        panic!("{} must rewrite to a local U", gate.name());
    };
    assert_eq!((theta, phi, lambda), expected);
}

#[test]
fn rewrite_table_rz_family() {
    assert_rz(Gate::Rz(0.7), 0.7);
    assert_rz(Gate::P(-0.2), -0.2);
    assert_rz(Gate::Z, PI);
    assert_rz(Gate::S, FRAC_PI_2);
    assert_rz(Gate::Sdg, -FRAC_PI_2);
    assert_rz(Gate::T, FRAC_PI_4);
    assert_rz(Gate::Tdg, -FRAC_PI_4);
}

#[test]
fn rewrite_table_u_family() {
    assert_u(Gate::U(0.1, 0.2, 0.3), (0.1, 0.2, 0.3));
    assert_u(Gate::U2(0.4, 0.5), (FRAC_PI_2, 0.4, 0.5));
    assert_u(Gate::Rx(0.6), (0.6, -FRAC_PI_2, FRAC_PI_2));
    assert_u(Gate::Ry(0.8), (0.8, 0.0, 0.0));
    assert_u(Gate::H, (FRAC_PI_2, 0.0, PI));
    assert_u(Gate::X, (PI, 0.0, PI));
    assert_u(Gate::Y, (PI, FRAC_PI_2, FRAC_PI_2));
    assert_u(Gate::V, (-FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2));
    assert_u(Gate::Vdg, (-FRAC_PI_2, FRAC_PI_2, -FRAC_PI_2));
    assert_u(Gate::SX, (FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2));
    assert_u(Gate::SXdg, (-FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2));
}

#[test]
fn identity_gate_is_unsupported() {
    let result = emit_local(Gate::I);
    assert!(matches!(
        result,
        Err(SynthError::UnsupportedGate { gate }) if gate == "id"
    ));
}

#[test]
fn hadamard_fallthrough_still_emits_u() {
    // with warnings enabled the gate is reported, but the emission is
    // identical
    let arch = fixture_arch();
    let config = CodeGeneratorConfig {
        warn_unsupported_gates: true,
        ..Default::default()
    };
    let generator = CodeGenerator::new(&arch, config).unwrap();
    let single_layers: Vec<SingleQubitGateLayer> = vec![vec![
        LayerOp::local(Gate::H, 0_u32),
    ]];
    let placements: Vec<Placement> = vec![(0..3).map(|q| Site::new(STORAGE, 0, q)).collect()];
    let program = generator.generate(&single_layers, &placements, &[]).unwrap();
    let Op::LocalU {
        theta, phi, lambda, ..
    } = &program.ops()[0]
    else {
        panic!("expected a local U gate");
    };
    assert_eq!((*theta, *phi, *lambda), (FRAC_PI_2, 0.0, PI));
}

#[test]
fn mismatched_shapes_are_rejected() {
    let arch = fixture_arch();
    let generator = CodeGenerator::new(&arch, CodeGeneratorConfig::default()).unwrap();
    let placement: Placement = vec![Site::new(STORAGE, 0, 0)];

    // two single-qubit layers require three placements
    let two_layers: Vec<SingleQubitGateLayer> = vec![vec![], vec![]];
    let result = generator.generate(&two_layers, &[placement.clone()], &[]);
    assert!(matches!(result, Err(SynthError::InvariantViolation(_))));

    // layers but no placements at all
    let result = generator.generate(&[vec![]], &[], &[]);
    assert!(matches!(result, Err(SynthError::InvariantViolation(_))));

    // placements of diverging lengths
    let result = generator.generate(
        &[vec![], vec![]],
        &[
            placement.clone(),
            vec![Site::new(STORAGE, 0, 0), Site::new(STORAGE, 0, 1)],
            placement,
        ],
        &[vec![], vec![]],
    );
    assert!(matches!(result, Err(SynthError::InvariantViolation(_))));
}

#[test]
fn empty_circuit_produces_only_declarations() {
    let arch = fixture_arch();
    let generator = CodeGenerator::new(&arch, CodeGeneratorConfig::default()).unwrap();
    let program = generator.generate(&[], &[], &[]).unwrap();
    assert!(program.ops().is_empty());
    assert_eq!(program.num_atoms(), 0);
    // the entangling zone and the storage-wide global zone are declared
    assert_eq!(program.zones().len(), 2);
    assert_eq!(program.zones()[0].name, "zone_cz0");
    assert_eq!(program.zones()[1].name, "global");
}

#[test]
fn statistics_cover_both_phases() {
    let arch = fixture_arch();
    let two_layers: Vec<TwoQubitGateLayer> = vec![vec![[QubitId(0), QubitId(1)]]];
    let reuse = VertexMatchingReuseAnalyzer::new().analyze(&two_layers);
    let router = IndependentSetRouter::new(&arch, RouterConfig::default());
    let mut synthesizer = PlacementAndRoutingSynthesizer::new(ColumnPlacer, router);
    let _layout = synthesizer.synthesize(2, &two_layers, &reuse);
    let stats = synthesizer.statistics();
    assert!(stats.total_time >= stats.routing_time);
    let json = serde_json::to_string(stats).unwrap();
    assert!(json.contains("placement_time"));
}
