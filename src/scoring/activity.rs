//! Run-wide intrinsic-activity estimate per crystal.
//!
//! Every positive deposit adds to its crystal's integrated energy, which is
//! never reset between events. The largest integrated energy seen on a nonzero
//! crystal id is kept as a running maximum, and the activity fraction of a
//! crystal is `1 + 0.1 · ln(E / E_max)`: 1 for the hottest crystal, falling
//! slowly for colder ones. Crystals more than ten e-folds below the maximum
//! sit at [`MIN_ACTIVITY_FRACTION`], so every hit crystal stays distinguishable
//! from one that was never hit.
//!
//! One estimator is shared by every worker (`Arc<ActivityEstimator>`). The
//! per-crystal map sits behind a read-write lock and the maximum is raised with
//! an atomic compare-and-update, so it never decreases.

use crate::geometry::CopyNumber;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Crystal id that never takes part in the running maximum.
pub const RESERVED_CRYSTAL_ID: CopyNumber = 0;

/// Smallest fraction reported for a crystal that has been hit.
pub const MIN_ACTIVITY_FRACTION: f64 = f64::MIN_POSITIVE;

const LOG_SCALE: f64 = 0.1;

#[derive(Debug, Default)]
pub struct ActivityEstimator {
    integrated: RwLock<HashMap<CopyNumber, f64>>,
    /// `f64` bit pattern of the running maximum; starts at 0.0.
    max_bits: AtomicU64,
}

impl ActivityEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Add `energy` to the crystal's integrated total and return the new total.
    ///
    /// Non-positive and non-finite energies are ignored and return the
    /// current total.
    pub fn record_energy(&self, crystal_id: CopyNumber, energy: f64) -> f64 {
        if !energy.is_finite() || energy <= 0.0 {
            return self.integrated_energy(crystal_id).unwrap_or(0.0);
        }
        let updated = {
            let mut map = self.integrated.write();
            let total = map.entry(crystal_id).or_insert(0.0);
            *total += energy;
            *total
        };
        if crystal_id != RESERVED_CRYSTAL_ID {
            self.raise_max(updated);
        }
        updated
    }

    fn raise_max(&self, candidate: f64) {
        let _ = self
            .max_bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                (candidate > f64::from_bits(bits)).then(|| candidate.to_bits())
            });
    }

    pub fn integrated_energy(&self, crystal_id: CopyNumber) -> Option<f64> {
        self.integrated.read().get(&crystal_id).copied()
    }

    pub fn max_integrated_energy(&self) -> f64 {
        f64::from_bits(self.max_bits.load(Ordering::Acquire))
    }

    /// Activity fraction in `(0, 1]`; 0 for crystals that were never hit.
    ///
    /// Crystal 0 may be queried even though it never sets the maximum; its
    /// fraction is capped at 1.
    pub fn activity_fraction(&self, crystal_id: CopyNumber) -> f64 {
        let Some(energy) = self.integrated_energy(crystal_id) else {
            return 0.0;
        };
        let max = self.max_integrated_energy();
        if max <= 0.0 {
            return if energy > 0.0 { 1.0 } else { 0.0 };
        }
        (1.0 + LOG_SCALE * (energy / max).ln()).clamp(MIN_ACTIVITY_FRACTION, 1.0)
    }

    /// Number of crystals with any integrated energy.
    pub fn crystals_hit(&self) -> usize {
        self.integrated.read().len()
    }

    /// Integrated energy of every crystal hit so far, by ascending id.
    pub fn snapshot(&self) -> Vec<(CopyNumber, f64)> {
        let mut entries: Vec<(CopyNumber, f64)> = self
            .integrated
            .read()
            .iter()
            .map(|(&id, &energy)| (id, energy))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn hottest_crystal_has_unit_fraction() {
        let est = ActivityEstimator::new();
        est.record_energy(3, 2.0);
        est.record_energy(7, 0.5);
        est.record_energy(3, 1.0);

        assert_eq!(est.max_integrated_energy(), 3.0);
        assert!((est.activity_fraction(3) - 1.0).abs() < 1e-12);
        let expected = 1.0 + 0.1 * (0.5f64 / 3.0).ln();
        assert!((est.activity_fraction(7) - expected).abs() < 1e-12);
        assert_eq!(est.activity_fraction(99), 0.0);
    }

    #[test]
    fn fraction_rises_with_integrated_energy() {
        let est = ActivityEstimator::new();
        est.record_energy(1, 100.0);
        let mut previous = 0.0;
        for _ in 0..50 {
            est.record_energy(2, 1.5);
            let fraction = est.activity_fraction(2);
            assert!(fraction >= previous);
            previous = fraction;
        }
    }

    #[test]
    fn crystal_zero_is_excluded_from_the_maximum() {
        let est = ActivityEstimator::new();
        est.record_energy(0, 50.0);
        assert_eq!(est.max_integrated_energy(), 0.0);
        assert_eq!(est.activity_fraction(0), 1.0);

        est.record_energy(5, 10.0);
        assert_eq!(est.max_integrated_energy(), 10.0);
        assert_eq!(est.integrated_energy(0), Some(50.0));
        assert_eq!(est.activity_fraction(0), 1.0);
    }

    #[test]
    fn non_positive_energy_is_ignored() {
        let est = ActivityEstimator::new();
        assert_eq!(est.record_energy(4, 0.0), 0.0);
        assert_eq!(est.record_energy(4, -1.0), 0.0);
        assert_eq!(est.integrated_energy(4), None);
        assert_eq!(est.crystals_hit(), 0);
    }

    #[test]
    fn non_finite_energy_is_ignored() {
        let est = ActivityEstimator::new();
        est.record_energy(2, 1.0);
        for energy in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert_eq!(est.record_energy(2, energy), 1.0);
            assert_eq!(est.record_energy(3, energy), 0.0);
        }
        assert_eq!(est.max_integrated_energy(), 1.0);
        assert_eq!(est.integrated_energy(3), None);
        assert_eq!(est.activity_fraction(2), 1.0);
    }

    #[test]
    fn very_cold_crystal_stays_above_unknown() {
        let est = ActivityEstimator::new();
        est.record_energy(1, 1.0e6);
        est.record_energy(2, 1.0e-3);
        let cold = est.activity_fraction(2);
        assert!(cold > 0.0 && cold <= 1.0, "{cold}");
        assert_ne!(cold, est.activity_fraction(99));
        assert_eq!(cold, MIN_ACTIVITY_FRACTION);
        assert_eq!(est.activity_fraction(1), 1.0);
    }

    #[test]
    fn concurrent_updates_are_serialised() {
        let est = ActivityEstimator::shared();
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let est = Arc::clone(&est);
                thread::spawn(move || {
                    for i in 0..1000 {
                        est.record_energy(1 + (i % 4), 0.25);
                        est.record_energy(100 + worker, 0.001);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        for id in 1..=4 {
            assert!((est.integrated_energy(id).unwrap() - 500.0).abs() < 1e-9);
        }
        assert!((est.max_integrated_energy() - 500.0).abs() < 1e-9);
        assert_eq!(est.crystals_hit(), 12);
    }
}
