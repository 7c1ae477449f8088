//! Database readiness probing.
//!
//! Blocks startup until the database accepts a connection or the attempt
//! budget is exhausted.
//!
//! # Modules
//!
//! - `Connector`: one connection attempt against the target database
//! - `RetryPolicy`: attempt budget and fixed delay between attempts
//! - `Prober`: the retry loop
//! - `ProbeReporter`: console output for progress and the final verdict

mod connector;
mod outcome;
mod policy;
mod prober;
mod reporter;

pub use connector::{ConnectError, Connector, TransientKind};
pub use outcome::ProbeOutcome;
pub use policy::RetryPolicy;
pub use prober::Prober;
pub use reporter::{ConsoleReporter, ProbeReporter, ReportMode};

use crate::config::DatabaseConfig;
use crate::postgres::PgConnector;

/// Probe a PostgreSQL database with the given connection parameters.
///
/// The parameters are taken by value and turned into connect options once;
/// every attempt reuses them.
pub async fn probe(
    params: DatabaseConfig,
    policy: RetryPolicy,
    reporter: &mut dyn ProbeReporter,
) -> ProbeOutcome {
    Prober::new(PgConnector::new(&params), policy)
        .run(reporter)
        .await
}
