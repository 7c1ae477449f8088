//! Fixed-interval readiness retry loop.

use super::{Connector, ProbeOutcome, ProbeReporter, RetryPolicy};

/// Retries a connector until it succeeds or the attempt budget runs out.
pub struct Prober<C> {
    connector: C,
    policy: RetryPolicy,
}

impl<C: Connector> Prober<C> {
    pub fn new(connector: C, policy: RetryPolicy) -> Self {
        Self { connector, policy }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Run the probe loop to completion.
    ///
    /// Attempts are strictly sequential. The only wait is the fixed interval
    /// between two attempts; no sleep follows the last one. A single connect
    /// call is not timed out here, so a hanging attempt can stretch the run
    /// past `max_attempts * interval`.
    pub async fn run(&self, reporter: &mut dyn ProbeReporter) -> ProbeOutcome {
        let max_attempts = self.policy.max_attempts;
        let target = self.connector.target();

        tracing::info!(
            address = %target,
            max_attempts,
            interval_ms = self.policy.interval.as_millis() as u64,
            max_wait_ms = self.policy.max_wait().as_millis() as u64,
            strict = self.policy.strict,
            "Waiting for database"
        );
        reporter.started(&target);

        for attempt in 1..=max_attempts {
            let error = match self.connector.connect().await {
                Ok(()) => {
                    tracing::info!(attempt, "Database connection successful");
                    reporter.ready(attempt);
                    return ProbeOutcome::Ready { attempts: attempt };
                }
                Err(error) => error,
            };

            if error.is_transient() {
                tracing::debug!(
                    attempt,
                    max_attempts,
                    kind = error.kind_str(),
                    error = %error,
                    "Database unavailable"
                );
                reporter.retrying(attempt, max_attempts, &error);
            } else {
                tracing::debug!(
                    attempt,
                    max_attempts,
                    error = %error,
                    "Unexpected error while connecting to database"
                );
                if self.policy.strict {
                    reporter.aborted(attempt, &error);
                    return ProbeOutcome::Aborted { attempt, error };
                }
                reporter.unexpected(attempt, max_attempts, &error);
            }

            if attempt < max_attempts {
                tokio::time::sleep(self.policy.interval).await;
            }
        }

        tracing::info!(max_attempts, "Database did not become available");
        reporter.timed_out(max_attempts);
        ProbeOutcome::TimedOut {
            attempts: max_attempts,
        }
    }
}
