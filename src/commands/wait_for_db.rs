//! `wait_for_db`: pause execution until the database is available.

use crate::config::Settings;
use crate::error::{AppError, Result};
use crate::postgres::PgConnector;
use crate::readiness::{Connector, ProbeOutcome, ProbeReporter, Prober, RetryPolicy};

pub const NAME: &str = "wait_for_db";
pub const HELP: &str = "Waits for database to be available";

/// Command adapter around the readiness prober.
///
/// Unlike the standalone binary, the command never exits the process: a
/// probe that does not end `Ready` comes back as `AppError::NotReady`.
pub struct WaitForDb<C> {
    prober: Prober<C>,
}

impl WaitForDb<PgConnector> {
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(PgConnector::new(&settings.db), settings.retry_policy())
    }
}

impl<C: Connector> WaitForDb<C> {
    pub fn new(connector: C, policy: RetryPolicy) -> Self {
        Self {
            prober: Prober::new(connector, policy),
        }
    }

    pub async fn handle(&self, reporter: &mut dyn ProbeReporter) -> Result<ProbeOutcome> {
        let outcome = self.prober.run(reporter).await;
        if outcome.is_ready() {
            Ok(outcome)
        } else {
            Err(AppError::NotReady(outcome))
        }
    }
}
