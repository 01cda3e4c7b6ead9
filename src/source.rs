//! Primary-source selection for a run.
//!
//! A source name picks one of three primary generators:
//! - `Linear<isotope>`: a line source along the axis, spanning the phantom.
//! - `Siemens` / `Explorer`: decays inside the crystal material itself,
//!   spanning the axial length the detector actually realises.

use crate::detector::DetectorKind;
use crate::error::{Error, Result};
use crate::sizer::DetectorSizer;
use crate::units::MM;
use serde::Serialize;

const LINEAR_PREFIX: &str = "Linear";
const DEFAULT_PHANTOM_HALF_LENGTH: f64 = 350.0 * MM;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SourceSpec {
    #[serde(rename_all = "camelCase")]
    Linear {
        z_min: f64,
        z_max: f64,
        isotope: String,
    },
    #[serde(rename_all = "camelCase")]
    CrystalIntrinsic {
        z_min: f64,
        z_max: f64,
        material: String,
        r_min: f64,
        r_max: f64,
    },
}

impl SourceSpec {
    pub fn axial_extent(&self) -> (f64, f64) {
        match self {
            SourceSpec::Linear { z_min, z_max, .. }
            | SourceSpec::CrystalIntrinsic { z_min, z_max, .. } => (*z_min, *z_max),
        }
    }
}

/// Resolve a source name.
///
/// `detector_length_mm` and `phantom_length_mm` are full lengths; a negative
/// value selects the default, and a phantom of exactly zero length is an error.
pub fn resolve_source(
    name: &str,
    detector_length_mm: f64,
    phantom_length_mm: f64,
) -> Result<SourceSpec> {
    if let Some(isotope) = name.strip_prefix(LINEAR_PREFIX) {
        let half = if phantom_length_mm > 0.0 {
            phantom_length_mm * MM / 2.0
        } else if phantom_length_mm == 0.0 {
            return Err(Error::ZeroLengthPhantom);
        } else {
            DEFAULT_PHANTOM_HALF_LENGTH
        };
        return Ok(SourceSpec::Linear {
            z_min: -half,
            z_max: half,
            isotope: isotope.to_string(),
        });
    }

    let (kind, material, r_min, r_max) = match name {
        "Siemens" => (DetectorKind::SiemensQuadra, "NaITl", 400.0 * MM, 420.0 * MM),
        "Explorer" => (DetectorKind::Explorer, "LYSO", 393.0 * MM, 411.1 * MM),
        other => return Err(Error::UnknownSource(other.to_string())),
    };
    let layout = kind.layout();
    let full_length = if detector_length_mm > 0.0 {
        DetectorSizer::for_layout(&layout).discrete_length(detector_length_mm * MM)
    } else {
        layout.default_length
    };
    let half = full_length / 2.0;
    Ok(SourceSpec::CrystalIntrinsic {
        z_min: -half,
        z_max: half,
        material: material.to_string(),
        r_min,
        r_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_source_uses_phantom_half_length() {
        let source = resolve_source("LinearF18", -1.0, 200.0).unwrap();
        assert_eq!(
            source,
            SourceSpec::Linear {
                z_min: -100.0,
                z_max: 100.0,
                isotope: "F18".to_string()
            }
        );
        let default = resolve_source("LinearNa22", -1.0, -1.0).unwrap();
        assert_eq!(default.axial_extent(), (-350.0, 350.0));
    }

    #[test]
    fn zero_length_phantom_is_fatal() {
        assert!(matches!(
            resolve_source("LinearF18", 0.0, 0.0),
            Err(Error::ZeroLengthPhantom)
        ));
    }

    #[test]
    fn intrinsic_source_spans_discrete_detector_length() {
        let source = resolve_source("Siemens", 100.0, 0.0).unwrap();
        assert_eq!(source.axial_extent(), (-64.0, 64.0));
        let default = resolve_source("Siemens", 0.0, 0.0).unwrap();
        assert_eq!(default.axial_extent(), (-512.0, 512.0));

        let explorer = resolve_source("Explorer", -1.0, 0.0).unwrap();
        let (z_min, z_max) = explorer.axial_extent();
        assert!((z_max - 936.46).abs() < 1e-9);
        assert_eq!(z_min, -z_max);
    }

    #[test]
    fn unknown_source_is_rejected() {
        assert!(matches!(
            resolve_source("Cylinder", 0.0, 10.0),
            Err(Error::UnknownSource(name)) if name == "Cylinder"
        ));
    }
}
