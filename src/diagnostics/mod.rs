//! Serializable reports produced by detector builds and hit replays.
//!
//! [`BuildReport`] summarises what [`build_detector`](crate::detector::build_detector)
//! produced; [`ReplaySummary`] counts what a replay consumed and emitted. Both
//! carry a [`TimingBreakdown`] of their stages.

pub mod report;
pub mod timing;

pub use report::{ActivityEntry, BuildReport, ReplaySummary};
pub use timing::{StageTiming, TimingBreakdown};
