use std::path::PathBuf;

use clap::Parser;

use crate::render::DEFAULT_DETAILED_REPORT;

#[derive(Debug, Clone, Parser)]
#[command(about, long_about = None)]
pub struct CliArgs {
    /// Path to the Newman JSON report.
    #[arg(
        long,
        env = "NEWMAN_REPORT_PATH",
        default_value = "artifacts/logs/unit-tests-report.json"
    )]
    pub newman_report: PathBuf,

    /// Path to the Cucumber JSON report.
    #[arg(
        long,
        env = "CUCUMBER_REPORT_PATH",
        default_value = "artifacts/logs/bdd-report.json"
    )]
    pub cucumber_report: PathBuf,

    /// Path to write the HTML dashboard to.
    #[arg(
        long,
        env = "DASHBOARD_OUTPUT_PATH",
        default_value = "artifacts/reports/dashboard.html"
    )]
    pub output: PathBuf,

    /// File name of the detailed Newman HTML report, in the same directory as the dashboard.
    #[arg(long, env = "DETAILED_REPORT_NAME", default_value = DEFAULT_DETAILED_REPORT)]
    pub detailed_report: String,

    /// Also write the summaries as JSON to this path.
    #[arg(long, env = "DASHBOARD_SUMMARY_JSON")]
    pub summary_json: Option<PathBuf>,

    /// Leave out the generation time so that output only changes with the reports.
    #[arg(long, env = "DASHBOARD_NO_TIMESTAMP")]
    pub no_timestamp: bool,
}

impl CliArgs {
    /// Where the detailed Newman report is expected to be
    pub fn detailed_report_path(&self) -> PathBuf {
        self.output
            .parent()
            .map(|dir| dir.join(&self.detailed_report))
            .unwrap_or_else(|| PathBuf::from(&self.detailed_report))
    }
}
