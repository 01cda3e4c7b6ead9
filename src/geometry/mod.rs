//! Copy-number indexing and placement of detector elements.
//!
//! - [`address`]: split a flat crystal copy number into ring / block /
//!   in-block coordinates.
//! - [`placement`]: turn an address into a position and a rotation about the
//!   detector axis, correcting for flat blocks on a cylinder.
//! - [`table`]: precompute every placement once per detector and serve them
//!   through [`PlacementProvider`].

pub mod address;
pub mod placement;
pub mod table;

/// Copy number of a replicated element.
///
/// Placement lookups and crystal ids reported by the transport engine share
/// this one space; negative values never name an element.
pub type CopyNumber = i32;

pub use address::CrystalAddress;
pub use placement::{block_placement, crystal_placement, panel_placement, Placement};
pub use table::{ElementAddress, PlacementEntry, PlacementProvider, PlacementTable};
