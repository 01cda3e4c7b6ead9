use super::timing::TimingBreakdown;
use crate::detector::{DetectorKind, Envelope, HalfExtents, MassBudget, Material};
use crate::geometry::CopyNumber;
use crate::layout::DetectorMode;
use crate::scoring::ActivityEstimator;
use crate::units::KEV;
use serde::Serialize;

/// Summary of one detector build.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    pub name: String,
    pub kind: DetectorKind,
    pub mode: DetectorMode,
    pub material: Material,
    pub requested_length_mm: f64,
    pub realised_length_mm: f64,
    pub n_rings: usize,
    pub standard_rings: usize,
    pub copies: usize,
    pub envelope: Envelope,
    pub element_half_extents: HalfExtents,
    pub mass: MassBudget,
    pub timings: TimingBreakdown,
}

/// Integrated energy and activity fraction of one crystal.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub crystal_id: CopyNumber,
    pub integrated_energy_kev: f64,
    pub fraction: f64,
}

impl ActivityEntry {
    /// One entry per crystal hit so far, by ascending crystal id.
    pub fn collect(activity: &ActivityEstimator) -> Vec<Self> {
        activity
            .snapshot()
            .into_iter()
            .map(|(crystal_id, energy)| Self {
                crystal_id,
                integrated_energy_kev: energy / KEV,
                fraction: activity.activity_fraction(crystal_id),
            })
            .collect()
    }
}

/// Counters for one replay of recorded energy deposits.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySummary {
    pub events: usize,
    pub steps: usize,
    pub skipped_lines: usize,
    pub records: usize,
    pub crystals_hit: usize,
    pub max_integrated_energy_kev: f64,
    pub parallel: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub activity: Vec<ActivityEntry>,
    pub timings: TimingBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_entries_are_sorted_and_scaled() {
        let activity = ActivityEstimator::new();
        activity.record_energy(9, 0.2);
        activity.record_energy(4, 0.5);
        let entries = ActivityEntry::collect(&activity);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].crystal_id, 4);
        assert!((entries[0].integrated_energy_kev - 500.0).abs() < 1e-9);
        assert_eq!(entries[0].fraction, 1.0);
        assert!(entries[1].fraction < 1.0 && entries[1].fraction > 0.0);
    }

    #[test]
    fn empty_activity_is_omitted_from_json() {
        let json = serde_json::to_value(ReplaySummary::default()).unwrap();
        assert!(json.get("activity").is_none());
        assert_eq!(json["skippedLines"], 0);
    }
}
