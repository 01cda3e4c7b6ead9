#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod io;
pub mod layout;
pub mod replay;
pub mod scoring;
pub mod sizer;
pub mod source;
pub mod units;

// --- High-level re-exports -------------------------------------------------

// Detector construction.
pub use crate::detector::{build_detector, DetectorBuild, DetectorKind, DetectorRequest};
pub use crate::error::{Error, Result};
pub use crate::layout::{DetectorMode, LayoutConstants};
pub use crate::sizer::DetectorSizer;

// Placement service.
pub use crate::geometry::{PlacementProvider, PlacementTable};

// Scoring.
pub use crate::scoring::{ActivityEstimator, HitAggregator, HitRecord, HitSink};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use pet_ring::prelude::*;
///
/// # fn main() -> pet_ring::Result<()> {
/// let request = DetectorRequest::new(DetectorKind::Explorer, DetectorMode::Crystal);
/// let build = build_detector(&request)?;
/// let placement = build.placements.compute_transformation(2607);
/// println!("rings={} rho={:.2}", build.n_rings(), placement.rho());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::scoring::{Deposit, StepPoint};
    pub use crate::{
        build_detector, ActivityEstimator, DetectorKind, DetectorMode, DetectorRequest,
        HitAggregator, HitRecord, HitSink, PlacementProvider,
    };
}
