use crate::layout::LayoutConstants;
use serde::Serialize;

/// Hierarchical position of one crystal, derived from its copy number.
///
/// Copy numbers run ring by ring; inside a ring block by block; inside a
/// block transaxial column by column with the axial index varying fastest.
/// Existing geometry files depend on this ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrystalAddress {
    pub ring: usize,
    pub in_ring: usize,
    pub block: usize,
    pub in_block: usize,
    pub block_trans: usize,
    pub block_axial: usize,
}

impl CrystalAddress {
    pub fn from_copy_number(copy_no: usize, layout: &LayoutConstants) -> Self {
        let crystals_per_ring = layout.crystals_per_ring();
        let crystals_per_block = layout.crystals_per_block();

        let ring = copy_no / crystals_per_ring;
        let in_ring = copy_no % crystals_per_ring;
        let block = in_ring / crystals_per_block;
        let in_block = in_ring % crystals_per_block;
        let block_trans = in_block / layout.crystals_per_block_axial;
        let block_axial = in_block % layout.crystals_per_block_axial;

        Self {
            ring,
            in_ring,
            block,
            in_block,
            block_trans,
            block_axial,
        }
    }

    /// Inverse of [`CrystalAddress::from_copy_number`].
    pub fn copy_number(&self, layout: &LayoutConstants) -> usize {
        self.ring * layout.crystals_per_ring()
            + self.block * layout.crystals_per_block()
            + self.block_trans * layout.crystals_per_block_axial
            + self.block_axial
    }
}
