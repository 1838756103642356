use anyhow::Context;
use chrono::Utc;
use dashboard_summary_model::SummaryOutput;
use log::{debug, info};

pub mod cli;
pub mod loader;
pub mod normalize;
pub mod render;
pub mod writer;

use cli::CliArgs;
use loader::load_report;
pub use normalize::{summarize_request_run, summarize_scenario_run};
use render::Dashboard;

/// Load both runner reports, summarise them and write the dashboard.
///
/// Problems with the input reports end up on the dashboard, only failing to write the outputs is
/// an error.
pub fn generate_dashboard(args: &CliArgs) -> anyhow::Result<SummaryOutput> {
    info!("Using Newman report: {}", args.newman_report.display());
    info!("Using Cucumber report: {}", args.cucumber_report.display());

    let request_run = summarize_request_run(load_report(&args.newman_report));
    debug!("Request run summary: {request_run:?}");
    let scenario_run = summarize_scenario_run(load_report(&args.cucumber_report));
    debug!("Scenario run summary: {scenario_run:?}");

    let output = SummaryOutput::new(request_run, scenario_run);
    debug!("Overall summary: {:?}", output.overall);

    let detailed_report_exists = args.detailed_report_path().is_file();
    let html = Dashboard::new(&output.request_run, &output.scenario_run, &output.overall)
        .detailed_report(detailed_report_exists.then_some(args.detailed_report.as_str()))
        .generated_at((!args.no_timestamp).then(Utc::now))
        .render();

    writer::write_dashboard(&args.output, &html).context("Failed to save the dashboard")?;
    info!("Dashboard written to {}", args.output.display());

    if let Some(path) = &args.summary_json {
        writer::write_summary_output(path, &output)
            .with_context(|| format!("Failed to save the summary JSON to {}", path.display()))?;
        info!("Summary JSON written to {}", path.display());
    }

    Ok(output)
}
