use clap::Parser as _;
use dashboard_summariser::cli::CliArgs;
use log::{error, info};

const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = CliArgs::parse();
    info!("{CRATE_NAME} {CRATE_VERSION}");

    match dashboard_summariser::generate_dashboard(&args) {
        Ok(output) => {
            if output.overall.unavailable {
                info!("Dashboard generated, overall summary unavailable due to report errors");
            } else {
                info!(
                    "Dashboard generated: {} total, {} passed, {} failed",
                    output.overall.total, output.overall.passed, output.overall.failed
                );
            }
            Ok(())
        }
        Err(e) => {
            error!("Failed to generate the dashboard: {e:?}");
            Err(e)
        }
    }
}
