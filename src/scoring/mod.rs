//! Per-event hit aggregation and run-wide activity scoring.
//!
//! - [`HitAggregator`] sums energy-weighted time and position per crystal for
//!   the current event and emits sparse [`HitRecord`]s when the event ends.
//! - [`ActivityEstimator`] keeps the cross-event integrated energy per crystal
//!   and turns it into an activity fraction.
//! - [`StepPoint`] adapts a raw transport step (touchable ids, global time,
//!   cartesian position) to a [`Deposit`].
//! - [`RecordWriter`] writes records as text lines.

pub mod accumulator;
pub mod activity;
pub mod aggregator;
pub mod record;
pub mod step;

pub use accumulator::{CrystalAccumulator, Deposit};
pub use activity::{ActivityEstimator, MIN_ACTIVITY_FRACTION, RESERVED_CRYSTAL_ID};
pub use aggregator::{HitAggregator, HitSink};
pub use record::{HitRecord, RecordWriter};
pub use step::{process_step, StepPoint};
