//! Fixed layout constants describing a ring detector.
//!
//! A detector is a stack of identical rings along the z axis. Each ring holds
//! `blocks_per_ring` flat blocks facing the axis, and each block is a grid of
//! `crystals_per_block_axial × crystals_per_block_trans` crystals. All lengths
//! are in internal units (see [`crate::units`]); `*_half` fields are
//! centre-to-edge extents.

use crate::error::Error;
use crate::units::{CM, MM};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geometric constants of one detector family.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConstants {
    pub crystals_per_block_axial: usize,
    pub crystals_per_block_trans: usize,
    pub blocks_per_ring: usize,
    /// Centre-to-centre crystal spacing, identical axially and transaxially.
    pub crystal_pitch: f64,
    /// Radial half-depth of a crystal (and of blocks and panels).
    pub crystal_half_depth: f64,
    /// Distance from the axis to the centre of a block face.
    pub ring_radius: f64,
    /// Axial half-length of one block.
    pub block_axial_half: f64,
    /// Transaxial half-width of one block.
    pub block_trans_half: f64,
    /// Axial gap between neighbouring rings.
    pub block_gap: f64,
    pub envelope_inner_radius: f64,
    pub envelope_outer_radius: f64,
    /// Full axial length used when no positive length is requested.
    pub default_length: f64,
    /// Ring count of the as-built scanner.
    pub standard_rings: usize,
}

impl LayoutConstants {
    /// Siemens Biograph Vision Quadra: 32 rings of 38 blocks, 10×20 crystals.
    pub fn siemens_quadra() -> Self {
        let crystal_pitch = 3.2 * MM;
        let crystals_per_block_axial = 10;
        let crystals_per_block_trans = 20;
        Self {
            crystals_per_block_axial,
            crystals_per_block_trans,
            blocks_per_ring: 38,
            crystal_pitch,
            crystal_half_depth: 10.0 * MM,
            ring_radius: 41.0 * CM,
            block_axial_half: crystal_pitch * crystals_per_block_axial as f64 / 2.0,
            block_trans_half: crystal_pitch * crystals_per_block_trans as f64 / 2.0,
            block_gap: 0.0,
            envelope_inner_radius: 38.0 * CM,
            envelope_outer_radius: 50.0 * CM,
            default_length: 1024.0 * MM,
            standard_rings: 32,
        }
    }

    /// uEXPLORER: 8 rings of 24 modules, 84×35 crystals each.
    pub fn explorer() -> Self {
        let crystal_pitch = 2.76 * MM;
        let crystals_per_block_axial = 84;
        let crystals_per_block_trans = 35;
        Self {
            crystals_per_block_axial,
            crystals_per_block_trans,
            blocks_per_ring: 24,
            crystal_pitch,
            crystal_half_depth: 9.05 * MM,
            ring_radius: 402.05 * MM,
            // 84 × 2.76 mm / 2, written out so eight rings span exactly 1872.92 mm.
            block_axial_half: 115.92 * MM,
            block_trans_half: crystal_pitch * crystals_per_block_trans as f64 / 2.0,
            block_gap: 2.6 * MM,
            envelope_inner_radius: 38.0 * CM,
            envelope_outer_radius: 50.0 * CM,
            default_length: 1872.92 * MM,
            standard_rings: 8,
        }
    }

    pub fn crystals_per_block(&self) -> usize {
        self.crystals_per_block_axial * self.crystals_per_block_trans
    }

    pub fn crystals_per_ring(&self) -> usize {
        self.crystals_per_block() * self.blocks_per_ring
    }

    /// Axial centre-to-centre distance between neighbouring rings.
    pub fn ring_pitch(&self) -> f64 {
        2.0 * self.block_axial_half + self.block_gap
    }

    /// Angular step between neighbouring blocks, in radians.
    pub fn block_delta_phi(&self) -> f64 {
        std::f64::consts::TAU / self.blocks_per_ring as f64
    }
}

/// Which element is replicated when the detector is manufactured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectorMode {
    Crystal,
    Block,
    Panel,
}

impl DetectorMode {
    /// Number of manufactured copies for `n_rings` rings; `None` on overflow.
    pub fn copy_count(self, layout: &LayoutConstants, n_rings: usize) -> Option<usize> {
        match self {
            DetectorMode::Crystal => layout.crystals_per_ring().checked_mul(n_rings),
            DetectorMode::Block => layout.blocks_per_ring.checked_mul(n_rings),
            DetectorMode::Panel => Some(layout.blocks_per_ring),
        }
    }
}

impl FromStr for DetectorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Crystal" => Ok(DetectorMode::Crystal),
            "Block" => Ok(DetectorMode::Block),
            "Panel" => Ok(DetectorMode::Panel),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for DetectorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DetectorMode::Crystal => "Crystal",
            DetectorMode::Block => "Block",
            DetectorMode::Panel => "Panel",
        };
        f.write_str(name)
    }
}
