use super::address::CrystalAddress;
use super::placement::{block_placement, crystal_placement, panel_placement, Placement};
use super::CopyNumber;
use crate::layout::{DetectorMode, LayoutConstants};
use log::{debug, warn};
use serde::Serialize;
use std::time::Instant;

/// Supplies the placement of each manufactured copy to the geometry service.
pub trait PlacementProvider {
    /// Number of copies the provider can place.
    fn copy_count(&self) -> usize;

    /// Placement for `copy_no`. Unknown copy numbers yield the identity
    /// placement and a warning.
    fn compute_transformation(&self, copy_no: CopyNumber) -> Placement;
}

/// Address of a replicated element, by detector mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ElementAddress {
    Crystal(CrystalAddress),
    Block { ring: usize, block: usize },
    Panel { block: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementEntry {
    pub address: ElementAddress,
    pub placement: Placement,
}

/// Precomputed placements for every copy number, stored in index order.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementTable {
    pub mode: DetectorMode,
    pub n_rings: usize,
    pub entries: Vec<PlacementEntry>,
}

impl PlacementTable {
    /// Largest table that will be built. Every index stays a valid [`CopyNumber`].
    pub const MAX_COPIES: usize = 1 << 23;

    /// Build the table for every copy of `mode` across `n_rings` rings.
    ///
    /// Returns `None` when the copy count overflows or exceeds [`Self::MAX_COPIES`].
    pub fn build(layout: &LayoutConstants, mode: DetectorMode, n_rings: usize) -> Option<Self> {
        let n_copies = mode
            .copy_count(layout, n_rings)
            .filter(|&n| n <= Self::MAX_COPIES)?;
        Some(Self::with_copies(layout, mode, n_rings, n_copies))
    }

    /// Build the table for the first `n_copies` copy numbers.
    fn with_copies(
        layout: &LayoutConstants,
        mode: DetectorMode,
        n_rings: usize,
        n_copies: usize,
    ) -> Self {
        let start = Instant::now();
        let mut entries = Vec::with_capacity(n_copies);
        for copy_no in 0..n_copies {
            entries.push(Self::entry_for(layout, mode, n_rings, copy_no));
        }
        debug!(
            "PlacementTable::build mode={} copies={} elapsed_ms={:.3}",
            mode,
            n_copies,
            start.elapsed().as_secs_f64() * 1000.0
        );
        Self {
            mode,
            n_rings,
            entries,
        }
    }

    fn entry_for(
        layout: &LayoutConstants,
        mode: DetectorMode,
        n_rings: usize,
        copy_no: usize,
    ) -> PlacementEntry {
        match mode {
            DetectorMode::Crystal => {
                let addr = CrystalAddress::from_copy_number(copy_no, layout);
                PlacementEntry {
                    address: ElementAddress::Crystal(addr),
                    placement: crystal_placement(&addr, layout, n_rings),
                }
            }
            DetectorMode::Block => {
                let ring = copy_no / layout.blocks_per_ring;
                let block = copy_no % layout.blocks_per_ring;
                PlacementEntry {
                    address: ElementAddress::Block { ring, block },
                    placement: block_placement(ring, block, layout, n_rings),
                }
            }
            DetectorMode::Panel => {
                let block = copy_no % layout.blocks_per_ring;
                PlacementEntry {
                    address: ElementAddress::Panel { block },
                    placement: panel_placement(block, layout),
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, copy_no: CopyNumber) -> Option<&PlacementEntry> {
        usize::try_from(copy_no)
            .ok()
            .and_then(|idx| self.entries.get(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacementEntry> {
        self.entries.iter()
    }
}

impl PlacementProvider for PlacementTable {
    fn copy_count(&self) -> usize {
        self.entries.len()
    }

    fn compute_transformation(&self, copy_no: CopyNumber) -> Placement {
        match self.get(copy_no) {
            Some(entry) => entry.placement,
            None => {
                warn!(
                    "Unknown copyNo for {} placement table: {} (valid range 0..{})",
                    self.mode,
                    copy_no,
                    self.entries.len()
                );
                Placement::identity()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crystal_table_matches_direct_computation() {
        let layout = LayoutConstants::siemens_quadra();
        let table = PlacementTable::build(&layout, DetectorMode::Crystal, 2).unwrap();
        assert_eq!(table.len(), 15_200);
        let addr = CrystalAddress::from_copy_number(9_001, &layout);
        assert_eq!(
            table.compute_transformation(9_001),
            crystal_placement(&addr, &layout, 2)
        );
        assert_eq!(
            table.get(9_001).map(|e| e.address),
            Some(ElementAddress::Crystal(addr))
        );
    }

    #[test]
    fn out_of_range_copy_degrades_to_identity() {
        let _ = env_logger::builder().is_test(true).try_init();
        let layout = LayoutConstants::explorer();
        let table = PlacementTable::build(&layout, DetectorMode::Block, 8).unwrap();
        let before = table.compute_transformation(191);

        assert!(table.compute_transformation(192).is_identity());
        assert!(table.compute_transformation(-1).is_identity());
        assert!(table.compute_transformation(CopyNumber::MAX).is_identity());

        assert_eq!(table.compute_transformation(191), before);
        assert!(!before.is_identity());
    }

    #[test]
    fn explicit_copy_count_truncates_table() {
        let layout = LayoutConstants::siemens_quadra();
        let table = PlacementTable::with_copies(&layout, DetectorMode::Crystal, 32, 100);
        assert_eq!(table.copy_count(), 100);
        assert!(table.compute_transformation(100).is_identity());
    }

    #[test]
    fn oversized_tables_are_refused() {
        let layout = LayoutConstants::siemens_quadra();
        assert!(PlacementTable::build(&layout, DetectorMode::Crystal, usize::MAX).is_none());
        let rings = PlacementTable::MAX_COPIES / layout.crystals_per_ring() + 1;
        assert!(PlacementTable::build(&layout, DetectorMode::Crystal, rings).is_none());
        assert!(PlacementTable::MAX_COPIES <= CopyNumber::MAX as usize);
        // Panels do not grow with the ring count.
        assert!(PlacementTable::build(&layout, DetectorMode::Panel, usize::MAX).is_some());
    }

    #[test]
    fn panel_table_has_one_entry_per_block() {
        let layout = LayoutConstants::explorer();
        let table = PlacementTable::build(&layout, DetectorMode::Panel, 8).unwrap();
        assert_eq!(table.len(), 24);
        assert!(table
            .iter()
            .all(|e| matches!(e.address, ElementAddress::Panel { .. })));
    }
}
