use super::accumulator::{CrystalAccumulator, Deposit};
use super::activity::ActivityEstimator;
use super::record::HitRecord;
use crate::geometry::CopyNumber;
use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Receives energy deposits from the transport engine.
///
/// The engine calls `on_event_start` once per event, `record_hit` once per
/// deposit and `on_event_end` once the event is complete.
pub trait HitSink {
    fn on_event_start(&mut self);

    fn record_hit(&mut self, crystal_id: CopyNumber, deposit: &Deposit);

    /// Emit one record per crystal that received energy in this event.
    fn on_event_end(&mut self, event_id: u64) -> Vec<HitRecord>;
}

/// Per-worker event accumulator.
///
/// Event sums are private to the aggregator; every positive deposit is also
/// forwarded to the shared [`ActivityEstimator`].
pub struct HitAggregator {
    activity: Arc<ActivityEstimator>,
    crystals: BTreeMap<CopyNumber, CrystalAccumulator>,
}

impl HitAggregator {
    pub fn new(activity: Arc<ActivityEstimator>) -> Self {
        Self {
            activity,
            crystals: BTreeMap::new(),
        }
    }

    /// Number of crystals hit so far in the current event.
    pub fn crystals_hit(&self) -> usize {
        self.crystals.len()
    }
}

impl HitSink for HitAggregator {
    fn on_event_start(&mut self) {
        self.crystals.clear();
    }

    fn record_hit(&mut self, crystal_id: CopyNumber, deposit: &Deposit) {
        if !deposit.energy.is_finite() || deposit.energy <= 0.0 {
            return;
        }
        self.crystals.entry(crystal_id).or_default().push(deposit);
        self.activity.record_energy(crystal_id, deposit.energy);
    }

    fn on_event_end(&mut self, event_id: u64) -> Vec<HitRecord> {
        let crystals = std::mem::take(&mut self.crystals);
        let records: Vec<HitRecord> = crystals
            .iter()
            .filter_map(|(&id, acc)| acc.to_record(event_id, id))
            .collect();
        debug!(
            "HitAggregator event={} crystals={} records={}",
            event_id,
            crystals.len(),
            records.len()
        );
        records
    }
}
