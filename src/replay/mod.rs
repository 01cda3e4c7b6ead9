//! Replay of recorded energy deposits through the scoring engine.
//!
//! This stands in for the transport engine: every [`EventDeposits`] is fed to
//! a [`HitSink`](crate::scoring::HitSink) as start, one call per step, end.
//! Events can be spread across Rayon workers (feature `parallel`), each with
//! its own aggregator and one shared activity estimator.

mod driver;
pub mod parse;

use crate::scoring::StepPoint;
use serde::Serialize;

pub use driver::{replay_event, replay_events, ParallelReplayOptions};
pub use parse::{parse_deposit_line, read_deposits, DepositLine, ParsedDeposits};

/// All steps of one simulated event.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDeposits {
    pub event_id: u64,
    /// Time of the primary decay; hit times are measured from it.
    pub decay_time: f64,
    pub steps: Vec<StepPoint>,
}

impl EventDeposits {
    pub fn new(event_id: u64) -> Self {
        Self {
            event_id,
            decay_time: 0.0,
            steps: Vec::new(),
        }
    }
}
