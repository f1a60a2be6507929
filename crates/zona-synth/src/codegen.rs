//! Code generation: from placements and routings to an atom program.
//!
//! The generator walks the layer structure front to back. Single-qubit
//! layers rewrite onto the native gate set (global RY pulses, local RZ,
//! and local U3 as a fallback). Each two-qubit layer becomes a
//! rearrangement into the Rydberg zones, one global CZ pulse, and a
//! rearrangement back out.
//!
//! Within a rearrangement, each move group is picked up row by row in
//! ascending y. Before a new row is loaded, the atoms already on the
//! AOD are shifted by `parking_offset` (vertically, or diagonally if
//! their column picks up no new atom) so that no row/column crossing of
//! the grid lands on an occupied trap. Such a *ghost spot* would get
//! re-excited during the transfer.

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use tracing::warn;
use zona_arch::Architecture;
use zona_ir::{
    AtomId, Gate, LayerOp, Location, Op, Program, QubitId, SingleQubitGateLayer, ZoneExtent,
    ZoneId,
};

use crate::config::CodeGeneratorConfig;
use crate::error::{SynthError, SynthResult};
use crate::types::{Placement, Routing};

/// Translates a synthesized layout into the emitted atom program.
pub struct CodeGenerator<'a> {
    architecture: &'a Architecture,
    config: CodeGeneratorConfig,
}

impl<'a> CodeGenerator<'a> {
    /// Create a code generator, validating the configuration against the
    /// architecture.
    pub fn new(architecture: &'a Architecture, config: CodeGeneratorConfig) -> SynthResult<Self> {
        config.validate(architecture)?;
        Ok(Self {
            architecture,
            config,
        })
    }

    /// Emit the program for one circuit.
    ///
    /// `placements` and `routings` come from layout synthesis; the layer
    /// count must satisfy `2 * |S| == |placements| + 1` and
    /// `|placements| == |routings| + 1` (a circuit with `L` two-qubit
    /// layers has `L + 1` single-qubit layers and `2L + 1` placements).
    pub fn generate(
        &self,
        single_qubit_gate_layers: &[SingleQubitGateLayer],
        placements: &[Placement],
        routings: &[Routing],
    ) -> SynthResult<Program> {
        let mut program = Program::new();
        let mut rydberg_zones = Vec::with_capacity(self.architecture.entangling_zones().len());
        for (i, zone) in self.architecture.entangling_zones().iter().enumerate() {
            let (min_x, min_y, max_x, max_y) = zone.extent;
            rydberg_zones.push(program.add_zone(
                format!("zone_cz{i}"),
                ZoneExtent::new(min_x as f64, min_y as f64, max_x as f64, max_y as f64),
            ));
        }
        let (min_x, min_y, max_x, max_y) = self.architecture.storage_bounding_box();
        let global_zone = program.add_zone(
            "global",
            ZoneExtent::new(min_x as f64, min_y as f64, max_x as f64, max_y as f64),
        );

        let Some(initial_placement) = placements.first() else {
            if single_qubit_gate_layers.is_empty() {
                return Ok(program);
            }
            return Err(SynthError::InvariantViolation(
                "no placement supplied for a non-empty circuit".into(),
            ));
        };
        if placements
            .iter()
            .any(|p| p.len() != initial_placement.len())
        {
            return Err(SynthError::InvariantViolation(
                "placements disagree on the number of qubits".into(),
            ));
        }
        let mut atoms = Vec::with_capacity(initial_placement.len());
        for (i, &site) in initial_placement.iter().enumerate() {
            if !self.architecture.contains_site(site) {
                return Err(SynthError::InvariantViolation(format!(
                    "initial placement of qubit q{i} names unknown site {site}"
                )));
            }
            let (x, y) = self.architecture.exact_slm_location(site);
            atoms.push(program.add_atom(format!("atom{i}"), Location::new(x as f64, y as f64)));
        }

        if single_qubit_gate_layers.is_empty() {
            return Ok(program);
        }
        if 2 * single_qubit_gate_layers.len() != placements.len() + 1 {
            return Err(SynthError::InvariantViolation(format!(
                "{} single-qubit layers require {} placements, got {}",
                single_qubit_gate_layers.len(),
                2 * single_qubit_gate_layers.len() - 1,
                placements.len()
            )));
        }
        if placements.len() != routings.len() + 1 {
            return Err(SynthError::InvariantViolation(format!(
                "{} placements require {} routings, got {}",
                placements.len(),
                placements.len() - 1,
                routings.len()
            )));
        }

        self.append_single_qubit_gates(
            &single_qubit_gate_layers[0],
            &atoms,
            global_zone,
            &mut program,
        )?;
        for layer in 0..single_qubit_gate_layers.len() - 1 {
            self.append_two_qubit_gates(
                &placements[2 * layer],
                &routings[2 * layer],
                &placements[2 * layer + 1],
                &routings[2 * layer + 1],
                &placements[2 * (layer + 1)],
                &atoms,
                &rydberg_zones,
                &mut program,
            )?;
            self.append_single_qubit_gates(
                &single_qubit_gate_layers[layer + 1],
                &atoms,
                global_zone,
                &mut program,
            )?;
        }
        Ok(program)
    }

    fn append_single_qubit_gates(
        &self,
        layer: &SingleQubitGateLayer,
        atoms: &[AtomId],
        global_zone: ZoneId,
        program: &mut Program,
    ) -> SynthResult<()> {
        for op in layer {
            match *op {
                LayerOp::Global(gate) => match gate {
                    Gate::Ry(theta) => program.push(Op::GlobalRy {
                        zone: global_zone,
                        theta,
                    }),
                    Gate::Y => program.push(Op::GlobalRy {
                        zone: global_zone,
                        theta: PI,
                    }),
                    // on a one-qubit circuit global and local gates coincide
                    _ if atoms.len() == 1 => {
                        self.append_local_gate(gate, QubitId(0), atoms, program)?;
                    }
                    _ => {
                        // the scheduler must filter global gates the
                        // hardware cannot pulse
                        return Err(SynthError::InvariantViolation(format!(
                            "global {} gate reached code generation",
                            gate.name()
                        )));
                    }
                },
                LayerOp::Local { gate, qubit } => {
                    self.append_local_gate(gate, qubit, atoms, program)?;
                }
            }
        }
        Ok(())
    }

    fn append_local_gate(
        &self,
        gate: Gate,
        qubit: QubitId,
        atoms: &[AtomId],
        program: &mut Program,
    ) -> SynthResult<()> {
        let atom = *atoms.get(qubit.index()).ok_or_else(|| {
            SynthError::InvariantViolation(format!("local gate on unknown qubit {qubit}"))
        })?;
        // all variants of rotational z-gates are natively supported
        let rz_angle = match gate {
            Gate::Rz(theta) | Gate::P(theta) => Some(theta),
            Gate::Z => Some(PI),
            Gate::S => Some(FRAC_PI_2),
            Gate::Sdg => Some(-FRAC_PI_2),
            Gate::T => Some(FRAC_PI_4),
            Gate::Tdg => Some(-FRAC_PI_4),
            _ => None,
        };
        if let Some(theta) = rz_angle {
            program.push(Op::LocalRz { atom, theta });
            return Ok(());
        }
        if self.config.warn_unsupported_gates {
            warn!(
                "gate not part of the basis gates will be inserted as a U3 gate: {}",
                gate.name()
            );
        }
        let (theta, phi, lambda) = match gate {
            Gate::U(theta, phi, lambda) => (theta, phi, lambda),
            Gate::U2(phi, lambda) => (FRAC_PI_2, phi, lambda),
            Gate::Rx(theta) => (theta, -FRAC_PI_2, FRAC_PI_2),
            Gate::Ry(theta) => (theta, 0.0, 0.0),
            Gate::H => (FRAC_PI_2, 0.0, PI),
            Gate::X => (PI, 0.0, PI),
            Gate::Y => (PI, FRAC_PI_2, FRAC_PI_2),
            Gate::V => (-FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2),
            Gate::Vdg => (-FRAC_PI_2, FRAC_PI_2, -FRAC_PI_2),
            Gate::SX => (FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2),
            Gate::SXdg => (-FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2),
            _ => {
                return Err(SynthError::UnsupportedGate {
                    gate: gate.name().to_owned(),
                });
            }
        };
        program.push(Op::LocalU {
            atom,
            theta,
            phi,
            lambda,
        });
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn append_two_qubit_gates(
        &self,
        current_placement: &Placement,
        execution_routing: &Routing,
        execution_placement: &Placement,
        target_routing: &Routing,
        target_placement: &Placement,
        atoms: &[AtomId],
        rydberg_zones: &[ZoneId],
        program: &mut Program,
    ) -> SynthResult<()> {
        self.append_rearrangement(
            current_placement,
            execution_routing,
            execution_placement,
            atoms,
            program,
        )?;
        program.push(Op::GlobalCz {
            zones: rydberg_zones.to_vec(),
        });
        self.append_rearrangement(
            execution_placement,
            target_routing,
            target_placement,
            atoms,
            program,
        )
    }

    fn append_rearrangement(
        &self,
        start_placement: &Placement,
        routing: &Routing,
        target_placement: &Placement,
        atoms: &[AtomId],
        program: &mut Program,
    ) -> SynthResult<()> {
        for qubits in routing {
            let mut rows_with_qubits: BTreeMap<i64, BTreeMap<i64, QubitId>> = BTreeMap::new();
            let mut atoms_to_move = Vec::with_capacity(qubits.len());
            let mut target_locations = Vec::with_capacity(qubits.len());
            for &qubit in qubits {
                let start = *start_placement.get(qubit.index()).ok_or_else(|| {
                    SynthError::InvariantViolation(format!(
                        "routing moves unknown qubit {qubit}"
                    ))
                })?;
                let (x, y) = self.architecture.exact_slm_location(start);
                rows_with_qubits.entry(y).or_default().insert(x, qubit);
                atoms_to_move.push(atoms[qubit.index()]);
                let target = target_placement[qubit.index()];
                let (target_x, target_y) = self.architecture.exact_slm_location(target);
                target_locations.push(Location::new(target_x as f64, target_y as f64));
            }

            let mut rows = rows_with_qubits.iter();
            let Some((&first_y, first_row)) = rows.next() else {
                continue;
            };
            let mut loaded: Vec<(QubitId, (i64, i64))> = Vec::with_capacity(qubits.len());
            let first_atoms = first_row
                .iter()
                .map(|(&x, &qubit)| {
                    loaded.push((qubit, (x, first_y)));
                    atoms[qubit.index()]
                })
                .collect();
            program.push(Op::Load { atoms: first_atoms });

            // more than one occupied row: pick up row by row, parking the
            // grid off the trap raster in between
            for (&row_y, row) in rows {
                let offset = self.config.parking_offset;
                let mut atoms_to_offset = Vec::with_capacity(loaded.len());
                let mut offset_targets = Vec::with_capacity(loaded.len());
                for &(qubit, (x, y)) in &loaded {
                    atoms_to_offset.push(atoms[qubit.index()]);
                    let target = if row.contains_key(&x) {
                        // the column picks up a new atom; a vertical
                        // offset keeps the crossing aligned with it
                        Location::new(x as f64, (y + offset) as f64)
                    } else {
                        // no pickup in this column; move diagonally off
                        // the raster
                        Location::new((x + offset) as f64, (y + offset) as f64)
                    };
                    offset_targets.push(target);
                }
                program.push(Op::Move {
                    atoms: atoms_to_offset,
                    targets: offset_targets,
                });
                let new_atoms = row
                    .iter()
                    .map(|(&x, &qubit)| {
                        loaded.push((qubit, (x, row_y)));
                        atoms[qubit.index()]
                    })
                    .collect();
                program.push(Op::Load { atoms: new_atoms });
            }

            program.push(Op::Move {
                atoms: atoms_to_move.clone(),
                targets: target_locations,
            });
            program.push(Op::Store {
                atoms: atoms_to_move,
            });
        }
        Ok(())
    }
}
