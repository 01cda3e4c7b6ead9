//! Build the detector described by a run configuration.
//!
//! Steps:
//! 1. Parse the detector request from the config.
//! 2. Quantise the length, size the envelope and precompute placements.
//! 3. Resolve the configured primary source against the realised length.
//! 4. Print a summary and optionally dump placements and the build report.

use pet_ring::config::{load_config, RunConfig};
use pet_ring::detector::{build_detector, DetectorBuild};
use pet_ring::io::write_json_file;
use pet_ring::source::SourceSpec;
use pet_ring::units::MM;
use serde::Serialize;
use std::env;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BuildOutput<'a> {
    #[serde(flatten)]
    report: &'a pet_ring::diagnostics::BuildReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<SourceSpec>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config = load_config_from_args()?;
    let request = config.detector.to_request().map_err(|e| e.to_string())?;
    let build = build_detector(&request).map_err(|e| e.to_string())?;

    let source = match &config.source {
        Some(source) => Some(
            source
                .resolve(build.length() / MM)
                .map_err(|e| e.to_string())?,
        ),
        None => None,
    };

    print_summary(&build, source.as_ref());

    if let Some(path) = &config.output.placements_json {
        write_json_file(path, &build.placements).map_err(|e| e.to_string())?;
        println!("Placements written to {}", path.display());
    }
    if let Some(path) = &config.output.summary_json {
        let output = BuildOutput {
            report: &build.report,
            source,
        };
        write_json_file(path, &output).map_err(|e| e.to_string())?;
        println!("Build report written to {}", path.display());
    }
    Ok(())
}

fn print_summary(build: &DetectorBuild, source: Option<&SourceSpec>) {
    let variant = if build.is_standard() { "" } else { " (variant)" };
    println!(
        "{} [{} / {} / {}]",
        build.name, build.kind, build.mode, build.material
    );
    println!(
        "  rings={}{} copies={} length_mm={:.2}",
        build.n_rings(),
        variant,
        build.copy_count(),
        build.length() / MM
    );
    println!(
        "  envelope r=[{:.1}, {:.1}] half_length={:.2}",
        build.envelope.inner_radius / MM,
        build.envelope.outer_radius / MM,
        build.envelope.half_length / MM
    );
    if let Some(source) = source {
        let (z_min, z_max) = source.axial_extent();
        println!("  source z=[{:.2}, {:.2}]", z_min / MM, z_max / MM);
    }
    let mass = &build.report.mass;
    println!(
        "  crystal {:.4} cm3 / {:.3} g, detector {:.1} kg",
        mass.crystal_volume_cm3, mass.crystal_mass_g, mass.detector_mass_kg
    );
    if let Some(isotope) = &mass.isotope {
        println!(
            "  {} atoms={:.3e} activity={:.3e} Bq",
            isotope.isotope, isotope.atoms, mass.intrinsic_activity_bq
        );
    }
    if let Some(ms) = build.report.timings.stage_ms("placements") {
        println!("  placements built in {ms:.3} ms");
    }
    println!("  total {:.3} ms", build.report.timings.total_ms);
}

fn usage() -> String {
    "Usage: ring_build <config.json>".to_string()
}

fn load_config_from_args() -> Result<RunConfig, String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    load_config(Path::new(&config_path)).map_err(|e| format!("{config_path}: {e}"))
}
