//! Replay recorded energy deposits through the scoring engine.
//!
//! Every event is aggregated per crystal, written as record lines once it is
//! complete, and its energy folded into the run-wide activity estimate.

use pet_ring::config::{load_config, RunConfig};
use pet_ring::detector::build_detector;
use pet_ring::diagnostics::{ActivityEntry, ReplaySummary, TimingBreakdown};
use pet_ring::io::{open_output, write_json_file};
use pet_ring::replay::{read_deposits, replay_events};
use pet_ring::scoring::{ActivityEstimator, RecordWriter};
use pet_ring::units::{KEV, MM};
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let (config, deposits_path) = load_args()?;
    let mut timings = TimingBreakdown::start();

    // The detector is built so that configuration errors surface before any
    // deposit is read.
    let request = config.detector.to_request().map_err(|e| e.to_string())?;
    let build = build_detector(&request).map_err(|e| e.to_string())?;
    if let Some(source) = &config.source {
        source
            .resolve(build.length() / MM)
            .map_err(|e| e.to_string())?;
    }

    let parsed = timings.time("load", || {
        let file = File::open(&deposits_path)
            .map_err(|e| format!("Failed to open {}: {e}", deposits_path.display()))?;
        read_deposits(BufReader::new(file)).map_err(|e| e.to_string())
    })?;

    let activity = ActivityEstimator::shared();
    let per_event = timings.time("replay", || {
        replay_events(&parsed.events, &activity, &config.parallel)
    });

    timings.time("write", || -> Result<(), String> {
        let sink = open_output(config.output.records.as_deref()).map_err(|e| e.to_string())?;
        let mut writer =
            RecordWriter::new(sink).with_duplicate_lines(config.output.duplicate_lines);
        for records in &per_event {
            writer.write_event(records).map_err(|e| e.to_string())?;
        }
        writer.flush().map_err(|e| e.to_string())
    })?;

    let summary = ReplaySummary {
        events: parsed.events.len(),
        steps: parsed.step_count(),
        skipped_lines: parsed.skipped_lines,
        records: per_event.iter().map(Vec::len).sum(),
        crystals_hit: activity.crystals_hit(),
        max_integrated_energy_kev: activity.max_integrated_energy() / KEV,
        parallel: config.parallel.should_parallelize(parsed.events.len()),
        activity: ActivityEntry::collect(&activity),
        timings: timings.finish(),
    };

    eprintln!(
        "Replayed {} events ({} steps, {} skipped lines) into {} records over {} crystals",
        summary.events, summary.steps, summary.skipped_lines, summary.records, summary.crystals_hit
    );
    if let Some(path) = &config.output.summary_json {
        write_json_file(path, &summary).map_err(|e| e.to_string())?;
        eprintln!("Replay summary written to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: hit_replay <config.json> <deposits.txt>".to_string()
}

fn load_args() -> Result<(RunConfig, PathBuf), String> {
    let mut args = env::args().skip(1);
    let config_path = args.next().ok_or_else(usage)?;
    let deposits_path = args.next().ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path)).map_err(|e| format!("{config_path}: {e}"))?;
    Ok((config, PathBuf::from(deposits_path)))
}
