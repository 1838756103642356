use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Common view over the per-source summaries
///
/// Both report sources reduce to the same handful of numbers, which is all the merger and the
/// dashboard need to know about them.
pub trait Summary {
    /// Whether the source could not be loaded or understood
    fn is_error(&self) -> bool;

    /// Diagnostic text for display, only meaningful when [Summary::is_error] is true
    fn error_message(&self) -> Option<&str>;

    /// Number of counted tests, assertions or scenarios
    fn total(&self) -> u64;

    fn passed(&self) -> u64;

    fn failed(&self) -> u64;

    /// Wall-clock duration in milliseconds
    ///
    /// Signed because the request run takes the difference of two producer timestamps and does
    /// not correct inconsistent ones.
    fn duration_ms(&self) -> i64;
}

/// Summary of a request/assertion run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of assertions, or request items when the producer did not report assertions
    pub total: u64,
    /// Always `total - failed`, clamped at zero
    pub passed: u64,
    pub failed: u64,
    /// Time between the run's `started` and `completed` timestamps
    pub duration_ms: i64,
    /// Set when the report was present but could not be used
    ///
    /// All numeric fields are zero when this is set.
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl RunSummary {
    /// Create a summary from the raw counters reported by the runner
    pub fn new(total: u64, failed: u64, duration_ms: i64) -> Self {
        Self {
            total,
            passed: total.saturating_sub(failed),
            failed,
            duration_ms,
            error: false,
            error_message: None,
        }
    }

    /// A zero-valued summary for a run that produced no report
    pub fn empty() -> Self {
        Self::default()
    }

    /// A summary for a report that could not be used
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: true,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }
}

impl Summary for RunSummary {
    fn is_error(&self) -> bool {
        self.error
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    fn total(&self) -> u64 {
        self.total
    }

    fn passed(&self) -> u64 {
        self.passed
    }

    fn failed(&self) -> u64 {
        self.failed
    }

    fn duration_ms(&self) -> i64 {
        self.duration_ms
    }
}

/// Summary of a feature/scenario/step run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScenarioSummary {
    /// Every element declared as a scenario, including ones without steps
    pub total_scenarios: u64,
    /// Scenarios with at least one step and no failed step
    pub passed_scenarios: u64,
    /// Scenarios with at least one failed step
    pub failed_scenarios: u64,
    /// Sum of all step durations, rounded to whole milliseconds
    pub duration_ms: i64,
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ScenarioSummary {
    /// A zero-valued summary for a run that produced no report
    pub fn empty() -> Self {
        Self::default()
    }

    /// A summary for a report that could not be used
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: true,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }
}

impl Summary for ScenarioSummary {
    fn is_error(&self) -> bool {
        self.error
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    fn total(&self) -> u64 {
        self.total_scenarios
    }

    fn passed(&self) -> u64 {
        self.passed_scenarios
    }

    fn failed(&self) -> u64 {
        self.failed_scenarios
    }

    fn duration_ms(&self) -> i64 {
        self.duration_ms
    }
}

/// The combined view over all report sources
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverallSummary {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    /// Set when any source is in error
    ///
    /// The counters then only cover the healthy sources and must not be displayed, a partial total
    /// would hide the failures of the broken source.
    pub unavailable: bool,
}

impl OverallSummary {
    /// Merge the request run and scenario run summaries
    pub fn merge(request_run: &RunSummary, scenario_run: &ScenarioSummary) -> Self {
        let summaries: [&dyn Summary; 2] = [request_run, scenario_run];
        Self::from_summaries(&summaries)
    }

    /// Sum the counters of any number of sources
    ///
    /// Sources in error do not contribute to the counters but mark the result as unavailable.
    pub fn from_summaries(summaries: &[&dyn Summary]) -> Self {
        summaries
            .iter()
            .fold(Self::default(), |mut overall, summary| {
                if summary.is_error() {
                    overall.unavailable = true;
                } else {
                    overall.total += summary.total();
                    overall.passed += summary.passed();
                    overall.failed += summary.failed();
                }
                overall
            })
    }
}

/// Everything the dashboard is rendered from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryOutput {
    pub request_run: RunSummary,
    pub scenario_run: ScenarioSummary,
    pub overall: OverallSummary,
}

impl SummaryOutput {
    /// Bundle the two source summaries together with their merged view
    pub fn new(request_run: RunSummary, scenario_run: ScenarioSummary) -> Self {
        let overall = OverallSummary::merge(&request_run, &scenario_run);
        Self {
            request_run,
            scenario_run,
            overall,
        }
    }
}

/// Serialize the summary output to a writer as pretty-printed JSON
pub fn store_summary_output<W: Write>(output: &SummaryOutput, writer: W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(writer, output)?;
    Ok(())
}

/// Load a summary output from a reader
pub fn load_summary_output<R: Read>(reader: R) -> anyhow::Result<SummaryOutput> {
    let reader = std::io::BufReader::new(reader);
    let output: SummaryOutput = serde_json::from_reader(reader)?;
    Ok(output)
}
