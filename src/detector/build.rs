use super::material::Material;
use super::params::{DetectorKind, DetectorRequest};
use super::properties::MassBudget;
use crate::diagnostics::{BuildReport, TimingBreakdown};
use crate::error::{Error, Result};
use crate::geometry::PlacementTable;
use crate::layout::{DetectorMode, LayoutConstants};
use crate::sizer::{DetectorSizer, RingLayout};
use crate::units::MM;
use log::info;
use serde::Serialize;

/// Hollow cylinder enclosing every replicated element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub half_length: f64,
}

/// Half extents of the replicated box: radial depth, transaxial, axial.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HalfExtents {
    pub radial: f64,
    pub trans: f64,
    pub axial: f64,
}

/// Everything the volume-construction service needs to manufacture a detector.
#[derive(Clone, Debug)]
pub struct DetectorBuild {
    pub name: String,
    pub kind: DetectorKind,
    pub mode: DetectorMode,
    pub material: Material,
    pub layout: LayoutConstants,
    pub ring_layout: RingLayout,
    pub envelope: Envelope,
    pub element_half_extents: HalfExtents,
    pub placements: PlacementTable,
    pub report: BuildReport,
}

impl DetectorBuild {
    pub fn n_rings(&self) -> usize {
        self.ring_layout.n_rings
    }

    pub fn copy_count(&self) -> usize {
        self.placements.len()
    }

    /// Realised axial length of the detector.
    pub fn length(&self) -> f64 {
        self.ring_layout.length()
    }

    pub fn is_standard(&self) -> bool {
        self.n_rings() == self.layout.standard_rings
    }
}

/// Quantise the requested length, size the solids and precompute placements.
///
/// Lengths whose ring or copy count cannot be represented are rejected with
/// [`Error::InvalidLength`].
pub fn build_detector(request: &DetectorRequest) -> Result<DetectorBuild> {
    if !request.length_mm.is_finite() {
        return Err(Error::InvalidLength(request.length_mm));
    }
    let mut timings = TimingBreakdown::start();
    let layout = request.kind.layout();

    let length = if request.length_mm <= 0.0 {
        layout.default_length
    } else {
        request.length_mm * MM
    };

    let ring_layout = timings
        .time("sizing", || {
            let sizer = DetectorSizer::for_layout(&layout);
            sizer
                .try_n_rings_in_length(length)
                .map(|n_rings| sizer.layout_for_n_rings(n_rings))
        })
        .ok_or(Error::InvalidLength(request.length_mm))?;
    let n_rings = ring_layout.n_rings;

    if n_rings == layout.standard_rings {
        info!("{} detector with nRings: {}", request.kind, n_rings);
    } else {
        info!("{} detector variant with nRings: {}", request.kind, n_rings);
    }

    let envelope = Envelope {
        inner_radius: layout.envelope_inner_radius,
        outer_radius: layout.envelope_outer_radius,
        half_length: layout.block_axial_half * (n_rings as f64 + 1.0),
    };
    let element_half_extents = element_half_extents(&layout, request.mode, &ring_layout);

    let placements = timings
        .time("placements", || {
            PlacementTable::build(&layout, request.mode, n_rings)
        })
        .ok_or(Error::InvalidLength(request.length_mm))?;
    let mass = timings.time("mass", || MassBudget::new(&layout, request.material, length));
    let timings = timings.finish();

    info!(
        "Built {} ({} mode, {}): {} copies over {:.2} mm, {:.1} kg",
        request.name,
        request.mode,
        request.material,
        placements.len(),
        ring_layout.length() / MM,
        mass.detector_mass_kg
    );

    let report = BuildReport {
        name: request.name.clone(),
        kind: request.kind,
        mode: request.mode,
        material: request.material,
        requested_length_mm: request.length_mm,
        realised_length_mm: ring_layout.length() / MM,
        n_rings,
        standard_rings: layout.standard_rings,
        copies: placements.len(),
        envelope,
        element_half_extents,
        mass,
        timings,
    };

    Ok(DetectorBuild {
        name: request.name.clone(),
        kind: request.kind,
        mode: request.mode,
        material: request.material,
        layout,
        ring_layout,
        envelope,
        element_half_extents,
        placements,
        report,
    })
}

fn element_half_extents(
    layout: &LayoutConstants,
    mode: DetectorMode,
    ring_layout: &RingLayout,
) -> HalfExtents {
    match mode {
        DetectorMode::Crystal => HalfExtents {
            radial: layout.crystal_half_depth,
            trans: layout.crystal_pitch / 2.0,
            axial: layout.crystal_pitch / 2.0,
        },
        DetectorMode::Block => HalfExtents {
            radial: layout.crystal_half_depth,
            trans: layout.block_trans_half,
            axial: layout.block_axial_half,
        },
        DetectorMode::Panel => HalfExtents {
            radial: layout.crystal_half_depth,
            trans: layout.block_trans_half,
            axial: ring_layout.length() / 2.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PlacementProvider;

    #[test]
    fn default_explorer_is_standard() {
        let request = DetectorRequest::new(DetectorKind::Explorer, DetectorMode::Block);
        let build = build_detector(&request).unwrap();
        assert!(build.is_standard());
        assert_eq!(build.copy_count(), 24 * 8);
        assert!((build.length() - 1872.92).abs() < 1e-6);
        assert!((build.envelope.half_length - 115.92 * 9.0).abs() < 1e-6);
    }

    #[test]
    fn short_siemens_is_a_variant() {
        let request = DetectorRequest::new(DetectorKind::SiemensQuadra, DetectorMode::Crystal)
            .with_length_mm(100.0);
        let build = build_detector(&request).unwrap();
        assert!(!build.is_standard());
        assert_eq!(build.n_rings(), 4);
        assert_eq!(build.placements.copy_count(), 7600 * 4);
        assert_eq!(build.element_half_extents.trans, 1.6);
    }

    #[test]
    fn panel_extends_over_full_length() {
        let request = DetectorRequest::new(DetectorKind::Explorer, DetectorMode::Panel);
        let build = build_detector(&request).unwrap();
        assert_eq!(build.copy_count(), 24);
        assert!((build.element_half_extents.axial - 936.46).abs() < 1e-6);
    }

    #[test]
    fn non_finite_length_is_rejected() {
        let request = DetectorRequest::new(DetectorKind::Explorer, DetectorMode::Panel)
            .with_length_mm(f64::NAN);
        assert!(matches!(
            build_detector(&request),
            Err(Error::InvalidLength(_))
        ));
    }

    #[test]
    fn unrepresentable_lengths_are_rejected() {
        for length in [1.0e30, f64::MAX] {
            let request = DetectorRequest::new(DetectorKind::Explorer, DetectorMode::Panel)
                .with_length_mm(length);
            assert!(matches!(
                build_detector(&request),
                Err(Error::InvalidLength(l)) if l == length
            ));
        }
    }

    #[test]
    fn too_many_crystal_copies_are_rejected() {
        let layout = LayoutConstants::siemens_quadra();
        let rings = PlacementTable::MAX_COPIES / layout.crystals_per_ring() + 1;
        let too_long = DetectorSizer::for_layout(&layout).length_for_n_rings(rings) / MM;
        let request = DetectorRequest::new(DetectorKind::SiemensQuadra, DetectorMode::Crystal)
            .with_length_mm(too_long);
        assert!(matches!(
            build_detector(&request),
            Err(Error::InvalidLength(_))
        ));

        // The same length still builds in block mode.
        let request = DetectorRequest::new(DetectorKind::SiemensQuadra, DetectorMode::Block)
            .with_length_mm(too_long);
        assert_eq!(build_detector(&request).unwrap().n_rings(), rings);
    }

    #[test]
    fn report_carries_mass_and_stage_timings() {
        let request = DetectorRequest::new(DetectorKind::SiemensQuadra, DetectorMode::Block)
            .with_material(Material::NaI);
        let build = build_detector(&request).unwrap();
        let mass = build.report.mass;
        let expected_kg = 0.2048 * 3.67 * 7600.0 * 32.0 / 1000.0;
        assert!((mass.detector_mass_kg - expected_kg).abs() < 1e-6);
        assert_eq!(mass.isotope.map(|i| i.isotope), Some("Tl205"));
        assert_eq!(mass.intrinsic_activity_bq, 0.0);
        for stage in ["sizing", "placements", "mass"] {
            assert!(build.report.timings.stage_ms(stage).is_some(), "{stage}");
        }
    }
}
