use super::EventDeposits;
use crate::scoring::{process_step, ActivityEstimator, HitAggregator, HitRecord, HitSink};
use serde::Deserialize;
use std::sync::Arc;

/// Controls whether events are replayed sequentially or with Rayon.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct ParallelReplayOptions {
    enabled: bool,
    min_events_for_parallel: usize,
}

impl ParallelReplayOptions {
    pub fn new(enabled: bool, min_events_for_parallel: usize) -> Self {
        Self {
            enabled,
            min_events_for_parallel: min_events_for_parallel.max(1),
        }
    }

    /// Replay sequentially regardless of event count.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            min_events_for_parallel: usize::MAX,
        }
    }

    /// Returns true when `event_count` events should be replayed in parallel.
    pub fn should_parallelize(&self, event_count: usize) -> bool {
        cfg!(feature = "parallel") && self.enabled && event_count >= self.min_events_for_parallel
    }
}

impl Default for ParallelReplayOptions {
    fn default() -> Self {
        Self {
            enabled: cfg!(feature = "parallel"),
            min_events_for_parallel: 64,
        }
    }
}

/// Run one event through a sink and return its records.
///
/// Records only exist once the whole event has been processed.
pub fn replay_event<S: HitSink + ?Sized>(
    sink: &mut S,
    event: &EventDeposits,
) -> Vec<HitRecord> {
    sink.on_event_start();
    for step in &event.steps {
        process_step(sink, step, event.decay_time);
    }
    sink.on_event_end(event.event_id)
}

/// Replay `events` into per-event record lists, in input order.
///
/// Each worker owns its own [`HitAggregator`]; all of them feed `activity`.
pub fn replay_events(
    events: &[EventDeposits],
    activity: &Arc<ActivityEstimator>,
    options: &ParallelReplayOptions,
) -> Vec<Vec<HitRecord>> {
    if options.should_parallelize(events.len()) {
        replay_parallel(events, activity)
    } else {
        replay_sequential(events, activity)
    }
}

fn replay_sequential(
    events: &[EventDeposits],
    activity: &Arc<ActivityEstimator>,
) -> Vec<Vec<HitRecord>> {
    let mut aggregator = HitAggregator::new(Arc::clone(activity));
    events
        .iter()
        .map(|event| replay_event(&mut aggregator, event))
        .collect()
}

#[cfg(feature = "parallel")]
fn replay_parallel(
    events: &[EventDeposits],
    activity: &Arc<ActivityEstimator>,
) -> Vec<Vec<HitRecord>> {
    use rayon::prelude::*;

    events
        .par_iter()
        .map_init(
            || HitAggregator::new(Arc::clone(activity)),
            |aggregator, event| replay_event(aggregator, event),
        )
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn replay_parallel(
    events: &[EventDeposits],
    activity: &Arc<ActivityEstimator>,
) -> Vec<Vec<HitRecord>> {
    replay_sequential(events, activity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CopyNumber;
    use crate::scoring::StepPoint;
    use nalgebra::Point3;

    fn event(event_id: u64, crystal: CopyNumber, energy: f64) -> EventDeposits {
        let mut ev = EventDeposits::new(event_id);
        ev.decay_time = 1.0;
        ev.steps.push(StepPoint::new(
            crystal,
            energy,
            3.0,
            Point3::new(410.0, 0.0, 5.0),
        ));
        ev
    }

    #[test]
    fn sequential_and_parallel_agree() {
        let events: Vec<EventDeposits> = (0..200)
            .map(|i| event(i, 1 + (i % 7) as CopyNumber, 0.1 + i as f64 * 1e-3))
            .collect();

        let seq_activity = ActivityEstimator::shared();
        let seq = replay_events(&events, &seq_activity, &ParallelReplayOptions::disabled());

        let par_activity = ActivityEstimator::shared();
        let par = replay_events(
            &events,
            &par_activity,
            &ParallelReplayOptions::new(true, 1),
        );

        assert_eq!(seq, par);
        assert_eq!(seq.len(), 200);
        assert_eq!(seq[13][0].event_id, 13);
        assert!((seq[13][0].avg_time - 2.0).abs() < 1e-12);
        for id in 1..=7 {
            let a = seq_activity.integrated_energy(id).unwrap();
            let b = par_activity.integrated_energy(id).unwrap();
            assert!((a - b).abs() < 1e-9);
        }
        assert!(
            (seq_activity.max_integrated_energy() - par_activity.max_integrated_energy()).abs()
                < 1e-9
        );
    }

    #[test]
    fn disabled_options_never_parallelize() {
        assert!(!ParallelReplayOptions::disabled().should_parallelize(usize::MAX));
        let opts = ParallelReplayOptions::new(true, 0);
        assert_eq!(opts.should_parallelize(1), cfg!(feature = "parallel"));
    }
}
