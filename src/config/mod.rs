//! JSON run configuration shared by the command-line tools.

pub mod run;

pub use run::{load_config, DetectorConfig, OutputConfig, RunConfig, SourceConfig};
