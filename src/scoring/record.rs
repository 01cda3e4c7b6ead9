use crate::geometry::CopyNumber;
use crate::units::{KEV, MM, NS};
use serde::Serialize;
use std::io::{self, Write};

/// Per-event, per-crystal summary emitted at the end of an event.
///
/// Values are in internal units; [`HitRecord::to_line`] converts them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HitRecord {
    pub event_id: u64,
    pub crystal_id: CopyNumber,
    pub energy: f64,
    pub avg_time: f64,
    pub avg_rho: f64,
    pub avg_phi: f64,
    pub avg_z: f64,
}

impl HitRecord {
    /// `eventId crystalId energyKeV avgTimeNs avgR_mm avgPhi_rad avgZ_mm`
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {} {} {} {} {}",
            self.event_id,
            self.crystal_id,
            self.energy / KEV,
            self.avg_time / NS,
            self.avg_rho / MM,
            self.avg_phi,
            self.avg_z / MM
        )
    }
}

/// Line-oriented record sink.
///
/// With `duplicate_lines` every record is written twice, reproducing the
/// output of older runs that downstream scripts may still expect.
pub struct RecordWriter<W: Write> {
    inner: W,
    duplicate_lines: bool,
    lines_written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            duplicate_lines: false,
            lines_written: 0,
        }
    }

    pub fn with_duplicate_lines(mut self, duplicate_lines: bool) -> Self {
        self.duplicate_lines = duplicate_lines;
        self
    }

    pub fn write_record(&mut self, record: &HitRecord) -> io::Result<()> {
        let line = record.to_line();
        let copies = if self.duplicate_lines { 2 } else { 1 };
        for _ in 0..copies {
            writeln!(self.inner, "{line}")?;
            self.lines_written += 1;
        }
        Ok(())
    }

    /// Write all records of one event. The event is formatted in full before
    /// anything reaches the sink.
    pub fn write_event(&mut self, records: &[HitRecord]) -> io::Result<()> {
        let copies = if self.duplicate_lines { 2 } else { 1 };
        let mut buf = String::new();
        for record in records {
            let line = record.to_line();
            for _ in 0..copies {
                buf.push_str(&line);
                buf.push('\n');
            }
        }
        self.inner.write_all(buf.as_bytes())?;
        self.lines_written += records.len() * copies;
        Ok(())
    }

    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
