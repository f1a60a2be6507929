//! The emitted atom program.
//!
//! A [`Program`] is the compiler's output: the declaration of zones and
//! atoms followed by an ordered operation stream. The stream is the
//! canonical schedule; consumers execute it front to back.
//!
//! Atoms are always held by exactly one of an SLM trap (stored) or the
//! moving AOD grid (loaded). [`Program::validate`] checks that every op
//! respects this discipline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// Handle to an atom declared in a [`Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AtomId(pub u32);

impl AtomId {
    /// The id as a vector index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a zone declared in a [`Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneId(pub u32);

impl ZoneId {
    /// The id as a vector index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A point in the architecture plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Horizontal coordinate in architecture units.
    pub x: f64,
    /// Vertical coordinate in architecture units.
    pub y: f64,
}

impl Location {
    /// Create a new location.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangular zone extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneExtent {
    /// Left edge.
    pub min_x: f64,
    /// Bottom edge.
    pub min_y: f64,
    /// Right edge.
    pub max_x: f64,
    /// Top edge.
    pub max_y: f64,
}

impl ZoneExtent {
    /// Create a new extent.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

/// A named zone with its rectangular extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// The zone name, e.g. `zone_cz0` or `global`.
    pub name: String,
    /// The rectangle the zone covers.
    pub extent: ZoneExtent,
}

/// A named atom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// The atom name, e.g. `atom3`.
    pub name: String,
}

/// One operation of the emitted stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Op {
    /// Pick the listed atoms up from their traps into the AOD.
    Load {
        /// Atoms to pick up.
        atoms: Vec<AtomId>,
    },
    /// Move the loaded atoms to the paired target locations.
    Move {
        /// Atoms to move; all must currently be loaded.
        atoms: Vec<AtomId>,
        /// Target location per atom, same length and order as `atoms`.
        targets: Vec<Location>,
    },
    /// Put the listed atoms down into the traps under them.
    Store {
        /// Atoms to put down.
        atoms: Vec<AtomId>,
    },
    /// A global CZ pulse over the listed entangling zones.
    GlobalCz {
        /// Zones the pulse covers.
        zones: Vec<ZoneId>,
    },
    /// A global RY rotation over one zone.
    GlobalRy {
        /// The zone the pulse covers.
        zone: ZoneId,
        /// Rotation angle in radians.
        theta: f64,
    },
    /// A local RZ rotation on one atom.
    LocalRz {
        /// The addressed atom.
        atom: AtomId,
        /// Rotation angle in radians.
        theta: f64,
    },
    /// A local U(θ, φ, λ) gate on one atom.
    LocalU {
        /// The addressed atom.
        atom: AtomId,
        /// θ in radians.
        theta: f64,
        /// φ in radians.
        phi: f64,
        /// λ in radians.
        lambda: f64,
    },
}

/// The compiler output: zones, atoms, initial locations, and the
/// operation stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    zones: Vec<Zone>,
    atoms: Vec<Atom>,
    initial_locations: Vec<Location>,
    ops: Vec<Op>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a zone and return its handle.
    pub fn add_zone(&mut self, name: impl Into<String>, extent: ZoneExtent) -> ZoneId {
        let id = ZoneId(u32::try_from(self.zones.len()).expect("zone count exceeds u32::MAX"));
        self.zones.push(Zone {
            name: name.into(),
            extent,
        });
        id
    }

    /// Declare an atom with its initial location and return its handle.
    pub fn add_atom(&mut self, name: impl Into<String>, initial: Location) -> AtomId {
        let id = AtomId(u32::try_from(self.atoms.len()).expect("atom count exceeds u32::MAX"));
        self.atoms.push(Atom { name: name.into() });
        self.initial_locations.push(initial);
        id
    }

    /// Append an operation to the stream.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// The declared zones.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// The declared atoms.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// The initial location per atom, indexed by [`AtomId`].
    pub fn initial_locations(&self) -> &[Location] {
        &self.initial_locations
    }

    /// The operation stream.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Number of declared atoms.
    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    fn atom_name(&self, atom: AtomId) -> &str {
        &self.atoms[atom.index()].name
    }

    fn check_atom(&self, atom: AtomId) -> IrResult<()> {
        if atom.index() >= self.atoms.len() {
            return Err(IrError::AtomOutOfRange {
                atom: atom.0,
                num_atoms: self.atoms.len(),
            });
        }
        Ok(())
    }

    fn check_zone(&self, zone: ZoneId) -> IrResult<()> {
        if zone.index() >= self.zones.len() {
            return Err(IrError::ZoneOutOfRange {
                zone: zone.0,
                num_zones: self.zones.len(),
            });
        }
        Ok(())
    }

    /// Parse a program from its JSON representation and validate it.
    pub fn from_json(json: &str) -> IrResult<Self> {
        let program: Self = serde_json::from_str(json)?;
        program.validate()?;
        Ok(program)
    }

    /// Serialize the program to JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the load/move/store discipline of the whole stream.
    ///
    /// Verifies that every referenced atom and zone exists, that move ops
    /// pair atoms and targets one-to-one, that atoms are loaded before
    /// being moved or stored and never loaded twice, and that no atom is
    /// left on the AOD when the program ends.
    pub fn validate(&self) -> IrResult<()> {
        let mut loaded = vec![false; self.atoms.len()];
        for op in &self.ops {
            match op {
                Op::Load { atoms } => {
                    for &atom in atoms {
                        self.check_atom(atom)?;
                        if loaded[atom.index()] {
                            return Err(IrError::DoubleLoad {
                                atom: self.atom_name(atom).to_owned(),
                            });
                        }
                        loaded[atom.index()] = true;
                    }
                }
                Op::Move { atoms, targets } => {
                    if atoms.len() != targets.len() {
                        return Err(IrError::MalformedMove {
                            atoms: atoms.len(),
                            targets: targets.len(),
                        });
                    }
                    for &atom in atoms {
                        self.check_atom(atom)?;
                        if !loaded[atom.index()] {
                            return Err(IrError::NotLoaded {
                                atom: self.atom_name(atom).to_owned(),
                                op: "mov",
                            });
                        }
                    }
                }
                Op::Store { atoms } => {
                    for &atom in atoms {
                        self.check_atom(atom)?;
                        if !loaded[atom.index()] {
                            return Err(IrError::NotLoaded {
                                atom: self.atom_name(atom).to_owned(),
                                op: "stor",
                            });
                        }
                        loaded[atom.index()] = false;
                    }
                }
                Op::GlobalCz { zones } => {
                    for &zone in zones {
                        self.check_zone(zone)?;
                    }
                }
                Op::GlobalRy { zone, .. } => self.check_zone(*zone)?,
                Op::LocalRz { atom, .. } | Op::LocalU { atom, .. } => self.check_atom(*atom)?,
            }
        }
        for (i, &still_loaded) in loaded.iter().enumerate() {
            if still_loaded {
                return Err(IrError::DanglingLoad {
                    atom: self.atoms[i].name.clone(),
                });
            }
        }
        Ok(())
    }

    fn fmt_atom_list(&self, f: &mut fmt::Formatter<'_>, atoms: &[AtomId]) -> fmt::Result {
        write!(f, "[")?;
        for (i, &atom) in atoms.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.atom_name(atom))?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for zone in &self.zones {
            writeln!(
                f,
                "zone {} [{}, {}, {}, {}]",
                zone.name, zone.extent.min_x, zone.extent.min_y, zone.extent.max_x,
                zone.extent.max_y
            )?;
        }
        for (atom, loc) in self.atoms.iter().zip(&self.initial_locations) {
            writeln!(f, "atom {} {loc}", atom.name)?;
        }
        for op in &self.ops {
            match op {
                Op::Load { atoms } => {
                    write!(f, "load ")?;
                    self.fmt_atom_list(f, atoms)?;
                    writeln!(f)?;
                }
                Op::Move { atoms, targets } => {
                    write!(f, "move [")?;
                    for (i, (&atom, target)) in atoms.iter().zip(targets).enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{} -> {target}", self.atom_name(atom))?;
                    }
                    writeln!(f, "]")?;
                }
                Op::Store { atoms } => {
                    write!(f, "store ")?;
                    self.fmt_atom_list(f, atoms)?;
                    writeln!(f)?;
                }
                Op::GlobalCz { zones } => {
                    write!(f, "cz [")?;
                    for (i, &zone) in zones.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", self.zones[zone.index()].name)?;
                    }
                    writeln!(f, "]")?;
                }
                Op::GlobalRy { zone, theta } => {
                    writeln!(f, "ry {} {theta}", self.zones[zone.index()].name)?;
                }
                Op::LocalRz { atom, theta } => {
                    writeln!(f, "rz {} {theta}", self.atom_name(*atom))?;
                }
                Op::LocalU {
                    atom,
                    theta,
                    phi,
                    lambda,
                } => {
                    writeln!(f, "u {} {theta} {phi} {lambda}", self.atom_name(*atom))?;
                }
            }
        }
        Ok(())
    }
}
