//! Detector construction from a named build request.
//!
//! Overview
//! - A [`DetectorRequest`] names the scanner family ([`DetectorKind`]), the
//!   replicated element ([`DetectorMode`](crate::layout::DetectorMode)), the
//!   requested axial length and the crystal [`Material`].
//! - [`build_detector`] rounds the length up to whole rings, sizes the
//!   envelope and the replicated solid, and precomputes the placement of every
//!   copy into a [`PlacementTable`](crate::geometry::PlacementTable).
//! - [`properties`] turns the crystal box, material and ring count into a
//!   [`MassBudget`] with the intrinsic isotope content.
//!
//! Unrecognised kind, mode or material names surface as
//! [`Error`](crate::Error) values from the `FromStr` impls; binaries treat them
//! as fatal.

mod build;
pub mod material;
pub mod params;
pub mod properties;

pub use build::{build_detector, DetectorBuild, Envelope, HalfExtents};
pub use material::{Component, Material, Proportion};
pub use params::{DetectorKind, DetectorRequest};
pub use properties::{IsotopeContent, MassBudget};
