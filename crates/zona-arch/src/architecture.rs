//! The process-wide machine description.

use serde::{Deserialize, Serialize};

use crate::error::{ArchError, ArchResult};
use crate::slm::{Site, Slm, SlmId};

/// A Rydberg region: a rectangle in which a global CZ pulse entangles
/// neighbouring atom pairs, covering one or more SLMs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntanglingZone {
    /// Covered rectangle `(min_x, min_y, max_x, max_y)`.
    pub extent: (i64, i64, i64, i64),
    /// The SLMs whose traps lie inside the rectangle.
    pub slms: Vec<SlmId>,
}

impl EntanglingZone {
    /// Create a new entangling zone.
    pub fn new(extent: (i64, i64, i64, i64), slms: Vec<SlmId>) -> Self {
        Self { extent, slms }
    }
}

/// The immutable description of one zoned neutral-atom machine.
///
/// Built once per compilation job, validated, and shared by reference
/// with every compiler component. Round-trips through JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Architecture {
    /// Human-readable machine name.
    pub name: String,
    slms: Vec<Slm>,
    storage_zones: Vec<SlmId>,
    entangling_zones: Vec<EntanglingZone>,
}

impl Architecture {
    /// Assemble and validate an architecture.
    pub fn new(
        name: impl Into<String>,
        slms: Vec<Slm>,
        storage_zones: Vec<SlmId>,
        entangling_zones: Vec<EntanglingZone>,
    ) -> ArchResult<Self> {
        let arch = Self {
            name: name.into(),
            slms,
            storage_zones,
            entangling_zones,
        };
        arch.validate()?;
        Ok(arch)
    }

    /// Parse an architecture from its JSON description and validate it.
    pub fn from_json(json: &str) -> ArchResult<Self> {
        let arch: Self = serde_json::from_str(json)?;
        arch.validate()?;
        Ok(arch)
    }

    /// Serialize the architecture back to JSON.
    pub fn to_json(&self) -> ArchResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check geometric consistency.
    ///
    /// Rejects zero-sized grids, non-positive separations, unresolved SLM
    /// ids, entangling rectangles that do not enclose their member SLMs,
    /// and the absence of any storage zone.
    pub fn validate(&self) -> ArchResult<()> {
        for (i, slm) in self.slms.iter().enumerate() {
            if slm.n_rows == 0 || slm.n_cols == 0 {
                return Err(ArchError::EmptyGrid { slm: i });
            }
            if slm.site_separation.0 <= 0 || slm.site_separation.1 <= 0 {
                return Err(ArchError::NonPositiveSeparation { slm: i });
            }
        }
        if self.storage_zones.is_empty() {
            return Err(ArchError::NoStorageZone);
        }
        for &id in &self.storage_zones {
            if id.index() >= self.slms.len() {
                return Err(ArchError::UnknownSlm { slm: id.0 });
            }
        }
        for (i, zone) in self.entangling_zones.iter().enumerate() {
            let (zmin_x, zmin_y, zmax_x, zmax_y) = zone.extent;
            for &id in &zone.slms {
                let slm = self
                    .slms
                    .get(id.index())
                    .ok_or(ArchError::UnknownSlm { slm: id.0 })?;
                let (min_x, min_y, max_x, max_y) = slm.extent();
                if min_x < zmin_x || min_y < zmin_y || max_x > zmax_x || max_y > zmax_y {
                    return Err(ArchError::ZoneExtentMismatch { zone: i });
                }
            }
        }
        Ok(())
    }

    /// All SLMs, indexed by [`SlmId`].
    pub fn slms(&self) -> &[Slm] {
        &self.slms
    }

    /// The SLM behind an id.
    #[inline]
    pub fn slm(&self, id: SlmId) -> &Slm {
        &self.slms[id.index()]
    }

    /// The SLMs used to park atoms between operations.
    pub fn storage_zones(&self) -> impl Iterator<Item = &Slm> {
        self.storage_zones.iter().map(|&id| self.slm(id))
    }

    /// The Rydberg regions.
    pub fn entangling_zones(&self) -> &[EntanglingZone] {
        &self.entangling_zones
    }

    /// Whether a site names an existing trap of this architecture.
    pub fn contains_site(&self, site: Site) -> bool {
        self.slms
            .get(site.slm.index())
            .is_some_and(|slm| site.row < slm.n_rows && site.col < slm.n_cols)
    }

    /// Exact coordinates of the trap a site names.
    ///
    /// The site must reference a trap of this architecture; placements
    /// are checked against [`Self::contains_site`] at the pipeline
    /// boundary.
    #[inline]
    pub fn exact_slm_location(&self, site: Site) -> (i64, i64) {
        self.slm(site.slm).site_location(site.row, site.col)
    }

    /// Euclidean distance between two trap centers.
    ///
    /// Used only for ordering movers, so any metric monotone in the
    /// Euclidean distance would do.
    pub fn distance(&self, a: Site, b: Site) -> f64 {
        let (ax, ay) = self.exact_slm_location(a);
        let (bx, by) = self.exact_slm_location(b);
        let dx = (ax - bx) as f64;
        let dy = (ay - by) as f64;
        dx.hypot(dy)
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)` over all storage zones.
    pub fn storage_bounding_box(&self) -> (i64, i64, i64, i64) {
        let mut min_x = i64::MAX;
        let mut min_y = i64::MAX;
        let mut max_x = i64::MIN;
        let mut max_y = i64::MIN;
        for slm in self.storage_zones() {
            let (x0, y0, x1, y1) = slm.extent();
            min_x = min_x.min(x0);
            min_y = min_y.min(y0);
            max_x = max_x.max(x1);
            max_y = max_y.max(y1);
        }
        (min_x, min_y, max_x, max_y)
    }
}
