//! Mass and intrinsic-radioactivity bookkeeping for a crystal detector.
//!
//! Masses are derived from the crystal box and the material density. The
//! radioisotope content of a mass of crystal follows from its formula units
//! (or lutetium mass fraction) and the natural isotopic abundance.

use super::material::{Material, Proportion};
use crate::layout::LayoutConstants;
use crate::sizer::DetectorSizer;
use crate::units::{CM3, G, S, YEAR};
use serde::Serialize;
use std::f64::consts::LN_2;

const AVOGADRO: f64 = 6.022e23;

/// Thallium atoms per NaI formula unit in NaI(Tl).
const NAI_THALLIUM_DOPING: f64 = 0.05;
const TL205_ABUNDANCE: f64 = 0.70;

const LU176_ABUNDANCE: f64 = 0.026;
const LU176_HALF_LIFE: f64 = 3.76e10 * YEAR;

/// Atomic masses in g/mol, rounded the way detector sizing sheets use them.
fn atomic_mass(element: &str) -> Option<f64> {
    match element {
        "Lu" => Some(175.0),
        "Si" => Some(28.1),
        "O" => Some(16.0),
        "Na" => Some(23.0),
        "I" => Some(127.0),
        "Tl" => Some(205.0),
        "Y" => Some(89.0),
        _ => None,
    }
}

/// Volume of one crystal box.
pub fn crystal_volume(layout: &LayoutConstants) -> f64 {
    layout.crystal_pitch * layout.crystal_pitch * 2.0 * layout.crystal_half_depth
}

pub fn crystal_mass(layout: &LayoutConstants, material: Material) -> f64 {
    crystal_volume(layout) * material.density()
}

/// Crystal mass of a detector whose length is `length` rounded up to whole rings.
pub fn detector_mass_for_length(
    layout: &LayoutConstants,
    material: Material,
    length: f64,
) -> f64 {
    let n_rings = DetectorSizer::for_layout(layout).n_rings_in_length(length);
    crystal_mass(layout, material) * layout.crystals_per_ring() as f64 * n_rings as f64
}

/// Molar mass of one formula unit, including dopants.
///
/// `None` for materials specified by mass fraction.
pub fn formula_mass(material: Material) -> Option<f64> {
    let mut total = 0.0;
    for component in material.composition() {
        let Proportion::Atoms(n) = component.proportion else {
            return None;
        };
        total += f64::from(n) * atomic_mass(component.element)?;
    }
    if material == Material::NaI {
        total += NAI_THALLIUM_DOPING * atomic_mass("Tl")?;
    }
    Some(total * G)
}

/// Number of formula units in `mass` of crystal.
pub fn formula_units_in_mass(material: Material, mass: f64) -> Option<f64> {
    Some(AVOGADRO * mass / formula_mass(material)?)
}

/// Fraction of the crystal mass that is lutetium.
fn lutetium_mass_fraction(material: Material) -> Option<f64> {
    let lu = material.composition().iter().find(|c| c.element == "Lu")?;
    match lu.proportion {
        Proportion::MassFraction(f) => Some(f),
        Proportion::Atoms(n) => {
            Some(f64::from(n) * atomic_mass("Lu")? * G / formula_mass(material)?)
        }
    }
}

/// Atoms of the material's notable isotope inside a mass of crystal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IsotopeContent {
    pub isotope: &'static str,
    pub atoms: f64,
    /// `None` for stable isotopes.
    pub half_life: Option<f64>,
}

impl IsotopeContent {
    /// Decays per second.
    pub fn activity_bq(&self) -> f64 {
        match self.half_life {
            Some(t_half) => self.atoms * LN_2 / (t_half / S),
            None => 0.0,
        }
    }
}

/// Isotope content of `mass` of crystal: Tl-205 for NaI(Tl), Lu-176 for the
/// lutetium oxyorthosilicates.
pub fn isotope_content(material: Material, mass: f64) -> Option<IsotopeContent> {
    match material {
        Material::NaI => Some(IsotopeContent {
            isotope: "Tl205",
            atoms: formula_units_in_mass(material, mass)?
                * NAI_THALLIUM_DOPING
                * TL205_ABUNDANCE,
            half_life: None,
        }),
        Material::Lso | Material::Lyso => {
            let lu_mass = mass * lutetium_mass_fraction(material)?;
            let lu_moles = lu_mass / (atomic_mass("Lu")? * G);
            Some(IsotopeContent {
                isotope: "Lu176",
                atoms: AVOGADRO * lu_moles * LU176_ABUNDANCE,
                half_life: Some(LU176_HALF_LIFE),
            })
        }
    }
}

/// Mass summary of one built detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MassBudget {
    pub crystal_volume_cm3: f64,
    pub crystal_mass_g: f64,
    pub detector_mass_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isotope: Option<IsotopeContent>,
    pub intrinsic_activity_bq: f64,
}

impl MassBudget {
    pub fn new(layout: &LayoutConstants, material: Material, length: f64) -> Self {
        let detector_mass = detector_mass_for_length(layout, material, length);
        let isotope = isotope_content(material, detector_mass);
        Self {
            crystal_volume_cm3: crystal_volume(layout) / CM3,
            crystal_mass_g: crystal_mass(layout, material) / G,
            detector_mass_kg: detector_mass / (1000.0 * G),
            isotope,
            intrinsic_activity_bq: isotope.map_or(0.0, |i| i.activity_bq()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::MM;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn siemens_crystal_volume_and_mass() {
        let layout = LayoutConstants::siemens_quadra();
        assert!(close(crystal_volume(&layout) / CM3, 0.32 * 0.32 * 2.0));
        assert!(close(crystal_mass(&layout, Material::NaI), 0.2048 * 3.67));
    }

    #[test]
    fn detector_mass_follows_whole_rings() {
        let layout = LayoutConstants::siemens_quadra();
        let per_ring = crystal_mass(&layout, Material::NaI) * 7600.0;
        assert!(close(
            detector_mass_for_length(&layout, Material::NaI, 1024.0 * MM),
            per_ring * 32.0
        ));
        assert!(close(
            detector_mass_for_length(&layout, Material::NaI, 33.0 * MM),
            per_ring * 2.0
        ));
    }

    #[test]
    fn nai_formula_units_and_thallium() {
        assert!(close(formula_mass(Material::NaI).unwrap(), 160.25));
        assert_eq!(formula_mass(Material::Lyso), None);
        let units = formula_units_in_mass(Material::NaI, 160.25).unwrap();
        assert!(close(units, AVOGADRO));
        let tl = isotope_content(Material::NaI, 160.25).unwrap();
        assert_eq!(tl.isotope, "Tl205");
        assert!(close(tl.atoms, AVOGADRO * 0.05 * 0.7));
        assert_eq!(tl.activity_bq(), 0.0);
    }

    #[test]
    fn lso_lutetium_matches_formula_units() {
        let mass = 10.0 * G;
        let lu = isotope_content(Material::Lso, mass).unwrap();
        let units = formula_units_in_mass(Material::Lso, mass).unwrap();
        assert!(close(lu.atoms, units * 2.0 * 0.026));
        // LSO carries about 40 Bq per gram.
        let per_gram = lu.activity_bq() / 10.0;
        assert!(per_gram > 35.0 && per_gram < 45.0, "{per_gram}");
        let lyso = isotope_content(Material::Lyso, mass).unwrap();
        assert!(lyso.atoms > 0.0 && lyso.atoms < lu.atoms);
    }
}
