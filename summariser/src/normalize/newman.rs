use super::{Normalize, NormalizeError};
use dashboard_summary_model::RunSummary;
use serde::Deserialize;
use serde_json::Value;

/// The parts of a Newman JSON report that the dashboard reads.
#[derive(Debug, Deserialize)]
struct NewmanReport {
    run: Option<NewmanRun>,
}

#[derive(Debug, Deserialize)]
struct NewmanRun {
    stats: Option<RunStats>,
    timings: Option<RunTimings>,
}

/// Counter pairs stay raw until one is chosen, the other is never read.
#[derive(Debug, Deserialize)]
struct RunStats {
    assertions: Option<Value>,
    items: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct Counter {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    failed: u64,
}

/// Epoch milliseconds, kept loose because only numeric values are used.
#[derive(Debug, Deserialize)]
struct RunTimings {
    started: Option<Value>,
    completed: Option<Value>,
}

impl RunStats {
    /// Assertion counts when the producer reported them, request item counts otherwise.
    fn counter(self) -> Result<Counter, NormalizeError> {
        match self.assertions.or(self.items) {
            Some(counter) => Ok(serde_json::from_value(counter)?),
            None => Ok(Counter::default()),
        }
    }
}

impl RunTimings {
    fn duration_ms(&self) -> i64 {
        match (timestamp(&self.started), timestamp(&self.completed)) {
            (Some(started), Some(completed)) => completed.saturating_sub(started),
            _ => 0,
        }
    }
}

fn timestamp(value: &Option<Value>) -> Option<i64> {
    let value = value.as_ref()?;
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|ms| ms.round() as i64))
}

impl Normalize for RunSummary {
    const SOURCE: &'static str = "Newman";

    fn missing() -> Self {
        RunSummary::empty()
    }

    fn invalid(message: String) -> Self {
        RunSummary::failure(message)
    }

    fn extract(value: Value) -> Result<Self, NormalizeError> {
        let report: NewmanReport = serde_json::from_value(value)?;
        let run = report.run.ok_or(NormalizeError::Missing("run"))?;
        let stats = run.stats.ok_or(NormalizeError::Missing("run.stats"))?;
        let timings = run.timings.ok_or(NormalizeError::Missing("run.timings"))?;

        let counter = stats.counter()?;
        Ok(RunSummary::new(
            counter.total,
            counter.failed,
            timings.duration_ms(),
        ))
    }
}
