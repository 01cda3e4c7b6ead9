use crate::detector::DetectorRequest;
use crate::error::Result;
use crate::replay::ParallelReplayOptions;
use crate::source::{resolve_source, SourceSpec};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level run configuration read from JSON.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub detector: DetectorConfig,
    pub source: Option<SourceConfig>,
    pub output: OutputConfig,
    pub parallel: ParallelReplayOptions,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub name: String,
    /// `Explorer` or `Siemens`.
    pub kind: String,
    /// `Crystal`, `Block` or `Panel`.
    pub mode: String,
    /// Requested full axial length; non-positive selects the default.
    pub length_mm: f64,
    /// `LSO`, `NaI`, `LYSO`; empty selects LYSO.
    pub material: String,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            name: "Detector".to_string(),
            kind: "Explorer".to_string(),
            mode: "Crystal".to_string(),
            length_mm: 0.0,
            material: String::new(),
        }
    }
}

impl DetectorConfig {
    pub fn to_request(&self) -> Result<DetectorRequest> {
        Ok(
            DetectorRequest::parse(&self.kind, &self.mode, self.length_mm, &self.material)?
                .with_name(self.name.clone()),
        )
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub name: String,
    /// Full phantom length for line sources; negative selects the default.
    pub phantom_length_mm: f64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            name: "Explorer".to_string(),
            phantom_length_mm: -1.0,
        }
    }
}

impl SourceConfig {
    pub fn resolve(&self, detector_length_mm: f64) -> Result<SourceSpec> {
        resolve_source(&self.name, detector_length_mm, self.phantom_length_mm)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Record lines destination; stdout when absent.
    pub records: Option<PathBuf>,
    pub placements_json: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
    /// Write every record line twice.
    pub duplicate_lines: bool,
}

pub fn load_config(path: &Path) -> Result<RunConfig> {
    let contents = fs::read_to_string(path)?;
    let config: RunConfig = serde_json::from_str(&contents)?;
    Ok(config)
}
