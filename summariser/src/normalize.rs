//! Reduce raw runner reports to the canonical summaries.

use crate::loader::RawReport;
use dashboard_summary_model::{RunSummary, ScenarioSummary};
use log::{error, info};
use serde_json::Value;

mod cucumber;
mod newman;

/// Why a loaded report could not be summarised.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("Unexpected report format: {0}")]
    Format(#[from] serde_json::Error),
    #[error("Report is missing `{0}`")]
    Missing(&'static str),
    #[error("Report is not a list of features")]
    NotAList,
}

/// A summary that can be derived from one kind of runner report.
pub(crate) trait Normalize: Sized {
    /// Name of the producing runner, used in log messages
    const SOURCE: &'static str;

    /// The summary of a runner that produced no report
    fn missing() -> Self;

    /// The summary of a report that could not be used
    fn invalid(message: String) -> Self;

    fn extract(value: Value) -> Result<Self, NormalizeError>;

    fn from_report(report: RawReport) -> Self {
        match report {
            RawReport::Absent => {
                info!("No {} report, treating it as an empty run", Self::SOURCE);
                Self::missing()
            }
            RawReport::LoadError { message } => {
                error!("Could not load {} report: {message}", Self::SOURCE);
                Self::invalid(message)
            }
            RawReport::Loaded(value) => Self::extract(value).unwrap_or_else(|e| {
                error!("Error or invalid format in {} report: {e}", Self::SOURCE);
                Self::invalid(e.to_string())
            }),
        }
    }
}

/// Summarise a request/assertion (Newman) run report.
pub fn summarize_request_run(report: RawReport) -> RunSummary {
    RunSummary::from_report(report)
}

/// Summarise a feature/scenario/step (Cucumber) run report.
pub fn summarize_scenario_run(report: RawReport) -> ScenarioSummary {
    ScenarioSummary::from_report(report)
}
