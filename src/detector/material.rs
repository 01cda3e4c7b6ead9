//! Scintillator materials selectable for the crystals.

use crate::error::Error;
use crate::units::G_PER_CM3;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How a material's composition is specified.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Proportion {
    /// Number of atoms per formula unit.
    Atoms(u32),
    /// Fraction of the total mass, in `[0, 1]`.
    MassFraction(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub element: &'static str,
    pub proportion: Proportion,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Material {
    #[serde(rename = "LSO")]
    Lso,
    #[serde(rename = "NaI")]
    NaI,
    #[default]
    #[serde(rename = "LYSO")]
    Lyso,
}

impl Material {
    /// Mass density, internal units (`G_PER_CM3`).
    pub fn density(self) -> f64 {
        match self {
            Material::Lso => 7.4 * G_PER_CM3,
            Material::NaI => 3.67 * G_PER_CM3,
            Material::Lyso => 7.1 * G_PER_CM3,
        }
    }

    pub fn composition(self) -> &'static [Component] {
        const LSO: [Component; 3] = [
            Component {
                element: "Lu",
                proportion: Proportion::Atoms(2),
            },
            Component {
                element: "Si",
                proportion: Proportion::Atoms(1),
            },
            Component {
                element: "O",
                proportion: Proportion::Atoms(5),
            },
        ];
        const NAI: [Component; 2] = [
            Component {
                element: "Na",
                proportion: Proportion::Atoms(1),
            },
            Component {
                element: "I",
                proportion: Proportion::Atoms(1),
            },
        ];
        // uEXPLORER crystal composition.
        const LYSO: [Component; 4] = [
            Component {
                element: "Lu",
                proportion: Proportion::MassFraction(0.71447),
            },
            Component {
                element: "Y",
                proportion: Proportion::MassFraction(0.04034),
            },
            Component {
                element: "Si",
                proportion: Proportion::MassFraction(0.06371),
            },
            Component {
                element: "O",
                proportion: Proportion::MassFraction(0.18148),
            },
        ];
        match self {
            Material::Lso => &LSO,
            Material::NaI => &NAI,
            Material::Lyso => &LYSO,
        }
    }
}

impl FromStr for Material {
    type Err = Error;

    /// Accepts `LSO`, `NaI`, `LYSO`, and the empty string for the default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LSO" => Ok(Material::Lso),
            "NaI" => Ok(Material::NaI),
            "LYSO" | "" => Ok(Material::Lyso),
            other => Err(Error::UnknownMaterial(other.to_string())),
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Material::Lso => "LSO",
            Material::NaI => "NaI",
            Material::Lyso => "LYSO",
        };
        f.write_str(name)
    }
}
