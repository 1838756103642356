use super::{Normalize, NormalizeError};
use dashboard_summary_model::ScenarioSummary;
use serde::Deserialize;
use serde_json::Value;

const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// A feature from a Cucumber JSON report.
///
/// Elements stay raw, only the ones typed as scenarios are read any further.
#[derive(Debug, Deserialize)]
struct Feature {
    elements: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    steps: Option<Vec<Step>>,
}

#[derive(Debug, Deserialize)]
struct Step {
    result: Option<StepResult>,
}

#[derive(Debug, Deserialize)]
struct StepResult {
    status: Option<String>,
    /// Nanoseconds
    duration: Option<f64>,
}

/// Backgrounds and any other pickle types are skipped.
fn is_scenario(element: &Value) -> bool {
    element.get("type").and_then(Value::as_str) == Some("scenario")
}

impl StepResult {
    fn is_failed(&self) -> bool {
        self.status.as_deref() == Some("failed")
    }
}

/// Running counts over the scenarios visited so far.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct ScenarioTally {
    total: u64,
    passed: u64,
    failed: u64,
    duration_ns: f64,
}

impl ScenarioTally {
    /// Classify a single scenario from its steps.
    ///
    /// A scenario without steps is counted, but neither as passed nor as failed.
    fn of_scenario(scenario: &Scenario) -> Self {
        let steps = scenario.steps.as_deref().unwrap_or_default();
        let (failed, duration_ns) = steps
            .iter()
            .filter_map(|step| step.result.as_ref())
            .fold((false, 0.0), |(failed, duration_ns), result| {
                (
                    failed || result.is_failed(),
                    duration_ns + result.duration.unwrap_or(0.0),
                )
            });

        Self {
            total: 1,
            passed: u64::from(!failed && !steps.is_empty()),
            failed: u64::from(failed),
            duration_ns,
        }
    }

    fn combine(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            passed: self.passed + other.passed,
            failed: self.failed + other.failed,
            duration_ns: self.duration_ns + other.duration_ns,
        }
    }

    fn of_features(features: &[Feature]) -> Result<Self, NormalizeError> {
        features
            .iter()
            .flat_map(|feature| feature.elements.iter().flatten())
            .filter(|element| is_scenario(element))
            .try_fold(Self::default(), |tally, element| {
                let scenario = Scenario::deserialize(element)?;
                Ok(tally.combine(Self::of_scenario(&scenario)))
            })
    }
}

impl From<ScenarioTally> for ScenarioSummary {
    fn from(tally: ScenarioTally) -> Self {
        ScenarioSummary {
            total_scenarios: tally.total,
            passed_scenarios: tally.passed,
            failed_scenarios: tally.failed,
            duration_ms: (tally.duration_ns / NANOS_PER_MILLI).round() as i64,
            error: false,
            error_message: None,
        }
    }
}

impl Normalize for ScenarioSummary {
    const SOURCE: &'static str = "Cucumber";

    fn missing() -> Self {
        ScenarioSummary::empty()
    }

    fn invalid(message: String) -> Self {
        ScenarioSummary::failure(message)
    }

    fn extract(value: Value) -> Result<Self, NormalizeError> {
        if !value.is_array() {
            return Err(NormalizeError::NotAList);
        }
        let features: Vec<Feature> = serde_json::from_value(value)?;
        Ok(ScenarioTally::of_features(&features)?.into())
    }
}
