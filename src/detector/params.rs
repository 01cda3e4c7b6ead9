//! Parameters describing which detector to build.

use super::material::Material;
use crate::error::{Error, Result};
use crate::layout::{DetectorMode, LayoutConstants};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Scanner family; selects the layout constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DetectorKind {
    SiemensQuadra,
    Explorer,
}

impl DetectorKind {
    pub fn layout(self) -> LayoutConstants {
        match self {
            DetectorKind::SiemensQuadra => LayoutConstants::siemens_quadra(),
            DetectorKind::Explorer => LayoutConstants::explorer(),
        }
    }
}

impl FromStr for DetectorKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Siemens" | "SiemensQuadra" => Ok(DetectorKind::SiemensQuadra),
            "Explorer" => Ok(DetectorKind::Explorer),
            other => Err(Error::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DetectorKind::SiemensQuadra => "SiemensQuadra",
            DetectorKind::Explorer => "Explorer",
        };
        f.write_str(name)
    }
}

/// A fully parsed detector build request.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectorRequest {
    /// Name given to the replicated element volume.
    pub name: String,
    pub kind: DetectorKind,
    pub mode: DetectorMode,
    /// Requested axial length in mm; non-positive selects the kind's default.
    pub length_mm: f64,
    pub material: Material,
}

impl DetectorRequest {
    pub fn new(kind: DetectorKind, mode: DetectorMode) -> Self {
        Self {
            name: "Detector".to_string(),
            kind,
            mode,
            length_mm: 0.0,
            material: Material::default(),
        }
    }

    /// Parse a request from the names used in run configurations.
    pub fn parse(kind: &str, mode: &str, length_mm: f64, material: &str) -> Result<Self> {
        Ok(Self {
            name: "Detector".to_string(),
            kind: kind.parse()?,
            mode: mode.parse()?,
            length_mm,
            material: material.parse()?,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_length_mm(mut self, length_mm: f64) -> Self {
        self.length_mm = length_mm;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }
}
