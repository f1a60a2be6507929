//! Zona Hardware Description
//!
//! This crate models the zoned neutral-atom machine the compiler targets:
//! rectangular SLM trap grids grouped into storage zones (where atoms park
//! between operations) and entangling zones (where a global Rydberg pulse
//! applies CZ to adjacent atom pairs).
//!
//! The [`Architecture`] is loaded once per compilation job, validated, and
//! then shared read-only by every compiler component. All coordinates are
//! integral architecture units; trap positions are derived from each SLM's
//! origin and site separation.
//!
//! # Example
//!
//! ```rust
//! use zona_arch::{Architecture, Site, Slm, SlmId};
//!
//! let storage = Slm::new(10, 10, (0, 0), (5, 5));
//! let gate = Slm::new(4, 10, (0, 70), (5, 5));
//! let arch = Architecture::new(
//!     "demo",
//!     vec![storage, gate],
//!     vec![SlmId(0)],
//!     vec![zona_arch::EntanglingZone::new((0, 70, 50, 90), vec![SlmId(1)])],
//! )
//! .unwrap();
//!
//! let site = Site::new(SlmId(0), 2, 3);
//! assert_eq!(arch.exact_slm_location(site), (15, 10));
//! ```

pub mod architecture;
pub mod error;
pub mod slm;

pub use architecture::{Architecture, EntanglingZone};
pub use error::{ArchError, ArchResult};
pub use slm::{Site, Slm, SlmId};
