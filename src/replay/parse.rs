//! Text format for recorded energy deposits.
//!
//! One deposit per line, whitespace separated:
//!
//! ```text
//! eventId crystalId energyKeV globalTimeNs x_mm y_mm z_mm
//! ```
//!
//! A line `# decay <eventId> <timeNs>` sets the decay time of an event; other
//! lines starting with `#` and blank lines are ignored. Deposits of one event
//! need not be contiguous; events keep the order of their first appearance.

use super::EventDeposits;
use crate::error::{Error, Result};
use crate::geometry::CopyNumber;
use crate::scoring::StepPoint;
use crate::units::{KEV, MM, NS};
use log::warn;
use nalgebra::Point3;
use std::collections::HashMap;
use std::io::BufRead;

/// One parsed line.
#[derive(Clone, Debug, PartialEq)]
pub enum DepositLine {
    Decay { event_id: u64, time: f64 },
    Step { event_id: u64, step: StepPoint },
}

/// Events read from a deposit file plus the number of rejected lines.
#[derive(Clone, Debug, Default)]
pub struct ParsedDeposits {
    pub events: Vec<EventDeposits>,
    pub skipped_lines: usize,
}

impl ParsedDeposits {
    pub fn step_count(&self) -> usize {
        self.events.iter().map(|e| e.steps.len()).sum()
    }
}

fn field<T: std::str::FromStr>(
    fields: &[&str],
    idx: usize,
    name: &str,
    line_no: usize,
) -> Result<T> {
    let raw = fields.get(idx).ok_or_else(|| Error::Parse {
        line: line_no,
        reason: format!("missing {name}"),
    })?;
    raw.parse().map_err(|_| Error::Parse {
        line: line_no,
        reason: format!("invalid {name} '{raw}'"),
    })
}

/// Parse one line; `Ok(None)` for blank lines and comments.
pub fn parse_deposit_line(line: &str, line_no: usize) -> Result<Option<DepositLine>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Some(comment) = trimmed.strip_prefix('#') {
        let fields: Vec<&str> = comment.split_whitespace().collect();
        if fields.first() != Some(&"decay") {
            return Ok(None);
        }
        let event_id = field::<u64>(&fields, 1, "event id", line_no)?;
        let time_ns = field::<f64>(&fields, 2, "decay time", line_no)?;
        return Ok(Some(DepositLine::Decay {
            event_id,
            time: time_ns * NS,
        }));
    }

    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    if fields.len() != 7 {
        return Err(Error::Parse {
            line: line_no,
            reason: format!("expected 7 fields, found {}", fields.len()),
        });
    }
    let event_id = field::<u64>(&fields, 0, "event id", line_no)?;
    let crystal_id = field::<CopyNumber>(&fields, 1, "crystal id", line_no)?;
    let energy_kev = field::<f64>(&fields, 2, "energy", line_no)?;
    let time_ns = field::<f64>(&fields, 3, "time", line_no)?;
    let x = field::<f64>(&fields, 4, "x", line_no)?;
    let y = field::<f64>(&fields, 5, "y", line_no)?;
    let z = field::<f64>(&fields, 6, "z", line_no)?;

    Ok(Some(DepositLine::Step {
        event_id,
        step: StepPoint::new(
            crystal_id,
            energy_kev * KEV,
            time_ns * NS,
            Point3::new(x * MM, y * MM, z * MM),
        ),
    }))
}

/// Read a deposit file, skipping malformed lines with a warning.
pub fn read_deposits<R: BufRead>(reader: R) -> Result<ParsedDeposits> {
    let mut parsed = ParsedDeposits::default();
    let mut index: HashMap<u64, usize> = HashMap::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let entry = match parse_deposit_line(&line, line_no) {
            Ok(Some(entry)) => entry,
            Ok(None) => continue,
            Err(err) => {
                warn!("Skipping deposit line: {err}");
                parsed.skipped_lines += 1;
                continue;
            }
        };
        let event_id = match &entry {
            DepositLine::Decay { event_id, .. } | DepositLine::Step { event_id, .. } => *event_id,
        };
        let slot = *index.entry(event_id).or_insert_with(|| {
            parsed.events.push(EventDeposits::new(event_id));
            parsed.events.len() - 1
        });
        let event = &mut parsed.events[slot];
        match entry {
            DepositLine::Decay { time, .. } => event.decay_time = time,
            DepositLine::Step { step, .. } => event.steps.push(step),
        }
    }
    Ok(parsed)
}
