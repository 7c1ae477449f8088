//! Management command runner.
//!
//! `manage wait_for_db` blocks until the database accepts connections.

use std::process::ExitCode;

use clap::Parser;

use db_readiness::commands::Cli;
use db_readiness::config::Settings;
use db_readiness::error::AppError;
use db_readiness::readiness::{ConsoleReporter, ReportMode};
use db_readiness::telemetry;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    telemetry::init_tracing();

    let mut reporter = ConsoleReporter::stdio(ReportMode::Command);

    let result = match Settings::new() {
        Ok(settings) => cli.command.dispatch(settings, &mut reporter).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(code = e.code(), error = %e, "Command failed");
            // The reporter already printed the verdict for a failed probe
            if matches!(e, AppError::Settings(_)) {
                eprintln!("CommandError: {}", e);
            }
            ExitCode::from(e.exit_code())
        }
    }
}
