//! Conversion between a requested axial length and a whole number of rings.
//!
//! Rings are `2 · block_axial_half` long and separated by `block_gap`, so `n`
//! rings span `2 · half · n + gap · (n − 1)`. A requested length is rounded up
//! to the shortest ring count that covers it.

use crate::layout::LayoutConstants;
use serde::Serialize;

/// Largest ring count the sizer will produce.
pub const MAX_RINGS: usize = 1 << 24;

/// Ring count and the axial extents it realises.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RingLayout {
    pub block_axial_half: f64,
    pub block_gap: f64,
    pub n_rings: usize,
}

impl RingLayout {
    /// Full axial length covered by the rings.
    pub fn length(&self) -> f64 {
        DetectorSizer::new(self.block_axial_half, self.block_gap)
            .length_for_n_rings(self.n_rings)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorSizer {
    block_axial_half: f64,
    block_gap: f64,
}

impl DetectorSizer {
    pub fn new(block_axial_half: f64, block_gap: f64) -> Self {
        Self {
            block_axial_half,
            block_gap,
        }
    }

    pub fn for_layout(layout: &LayoutConstants) -> Self {
        Self::new(layout.block_axial_half, layout.block_gap)
    }

    /// Minimal ring count whose realised length is at least `length`.
    ///
    /// Lengths of at most one ring (including non-positive ones) give one
    /// ring; lengths needing more than [`MAX_RINGS`] saturate there. Use
    /// [`DetectorSizer::try_n_rings_in_length`] to detect saturation.
    pub fn n_rings_in_length(&self, length: f64) -> usize {
        self.try_n_rings_in_length(length).unwrap_or(MAX_RINGS)
    }

    /// Like [`DetectorSizer::n_rings_in_length`], but `None` for NaN lengths
    /// and lengths needing more than [`MAX_RINGS`] rings.
    pub fn try_n_rings_in_length(&self, length: f64) -> Option<usize> {
        if length.is_nan() {
            return None;
        }
        let pitch = 2.0 * self.block_axial_half + self.block_gap;
        let estimate = ((length + self.block_gap) / pitch).ceil();
        if estimate > MAX_RINGS as f64 {
            return None;
        }
        if estimate.is_nan() || estimate < 1.0 {
            return Some(1);
        }
        let mut n = estimate as usize;
        // The quotient may be one ulp off an integer in either direction.
        while n > 1 && self.length_for_n_rings(n - 1) >= length {
            n -= 1;
        }
        while self.length_for_n_rings(n) < length {
            n = n.checked_add(1).filter(|&n| n <= MAX_RINGS)?;
        }
        Some(n)
    }

    pub fn length_for_n_rings(&self, n_rings: usize) -> f64 {
        let n = n_rings as f64;
        self.block_axial_half * 2.0 * n + self.block_gap * (n - 1.0)
    }

    /// Layout of exactly `n_rings` rings.
    pub fn layout_for_n_rings(&self, n_rings: usize) -> RingLayout {
        RingLayout {
            block_axial_half: self.block_axial_half,
            block_gap: self.block_gap,
            n_rings,
        }
    }

    /// `length` rounded up to the nearest realisable detector length.
    pub fn discrete_length(&self, length: f64) -> f64 {
        self.length_for_n_rings(self.n_rings_in_length(length))
    }
}
