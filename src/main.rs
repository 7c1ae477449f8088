//! Standalone database wait script.
//!
//! Progress and the final verdict go to stdout; exits 1 when the database
//! never became available.

use std::process::ExitCode;

use anyhow::{Context, Result};

use db_readiness::config::Settings;
use db_readiness::readiness::{self, ConsoleReporter, ReportMode};
use db_readiness::telemetry;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing
    telemetry::init_tracing();

    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    // Load configuration once; the prober never reads the environment again
    let settings = Settings::new().context("Failed to load database settings")?;
    tracing::debug!(database = %settings.db.url_masked(), "Configuration loaded");

    let policy = settings.retry_policy();
    let mut reporter = ConsoleReporter::stdio(ReportMode::Script);
    let outcome = readiness::probe(settings.db, policy, &mut reporter).await;

    tracing::info!(
        outcome = outcome.as_str(),
        attempts = outcome.attempts(),
        "Database wait finished"
    );
    Ok(ExitCode::from(outcome.exit_code()))
}
