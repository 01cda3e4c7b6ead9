use serde::Serialize;
use std::time::Instant;

/// Wall-clock time spent in one named stage.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: &'static str,
    pub elapsed_ms: f64,
}

/// Stage timings of a build or replay, plus the total since [`start`](Self::start).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
    #[serde(skip)]
    started: Instant,
}

impl Default for TimingBreakdown {
    fn default() -> Self {
        Self::start()
    }
}

fn millis_since(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

impl TimingBreakdown {
    pub fn start() -> Self {
        Self {
            total_ms: 0.0,
            stages: Vec::new(),
            started: Instant::now(),
        }
    }

    /// Run `stage` and record how long it took under `label`.
    pub fn time<T>(&mut self, label: &'static str, stage: impl FnOnce() -> T) -> T {
        let begin = Instant::now();
        let out = stage();
        self.stages.push(StageTiming {
            label,
            elapsed_ms: millis_since(begin),
        });
        out
    }

    /// Freeze the total.
    pub fn finish(mut self) -> Self {
        self.total_ms = millis_since(self.started);
        self
    }

    /// Summed time of every stage recorded under `label`.
    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .filter(|s| s.label == label)
            .map(|s| s.elapsed_ms)
            .reduce(|a, b| a + b)
    }
}
