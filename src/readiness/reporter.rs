//! Console output for the readiness prober.
//!
//! Two output contracts exist:
//! - `Command`: progress on stdout, the terminal failure on stderr
//! - `Script`: everything on stdout

use std::io::{self, Stderr, Stdout, Write};

use super::ConnectError;

/// Which entrypoint the output is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Run through the `manage` command dispatcher
    Command,
    /// Run as the standalone `wait-for-db` binary
    Script,
}

/// Receives progress events from the prober.
pub trait ProbeReporter: Send {
    /// Probing is about to start against `target` (`host:port`).
    fn started(&mut self, target: &str);

    /// Attempt `attempt` failed with a known transient error.
    fn retrying(&mut self, attempt: u32, max_attempts: u32, error: &ConnectError);

    /// Attempt `attempt` failed with an error outside the transient set.
    fn unexpected(&mut self, attempt: u32, max_attempts: u32, error: &ConnectError);

    /// A connection succeeded on attempt `attempt`.
    fn ready(&mut self, attempt: u32);

    /// The attempt budget ran out.
    fn timed_out(&mut self, max_attempts: u32);

    /// Strict mode stopped on an unexpected failure.
    fn aborted(&mut self, attempt: u32, error: &ConnectError);
}

/// Writes progress lines to a pair of output streams.
pub struct ConsoleReporter<O, E> {
    mode: ReportMode,
    out: O,
    err: E,
}

impl ConsoleReporter<Stdout, Stderr> {
    /// Reporter bound to the process stdout and stderr.
    pub fn stdio(mode: ReportMode) -> Self {
        Self::new(mode, io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> ConsoleReporter<O, E> {
    pub fn new(mode: ReportMode, out: O, err: E) -> Self {
        Self { mode, out, err }
    }

    /// Recover the underlying streams.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    // Console write failures never change the probe outcome.
    fn progress(&mut self, line: &str) {
        let _ = writeln!(self.out, "{}", line);
        let _ = self.out.flush();
    }

    fn failure(&mut self, line: &str) {
        match self.mode {
            ReportMode::Command => {
                let _ = writeln!(self.err, "{}", line);
                let _ = self.err.flush();
            }
            ReportMode::Script => self.progress(line),
        }
    }
}

impl<O: Write + Send, E: Write + Send> ProbeReporter for ConsoleReporter<O, E> {
    fn started(&mut self, target: &str) {
        let line = match self.mode {
            ReportMode::Command => "Waiting for database...".to_string(),
            ReportMode::Script => format!("Waiting for database at {}...", target),
        };
        self.progress(&line);
    }

    fn retrying(&mut self, attempt: u32, max_attempts: u32, error: &ConnectError) {
        self.progress(&format!(
            "Database unavailable, retrying ({}/{})... Error: {}",
            attempt, max_attempts, error
        ));
    }

    fn unexpected(&mut self, _attempt: u32, _max_attempts: u32, error: &ConnectError) {
        self.progress(&format!("An unexpected error occurred: {}", error));
    }

    fn ready(&mut self, _attempt: u32) {
        self.progress("Database connection successful!");
    }

    fn timed_out(&mut self, max_attempts: u32) {
        self.failure(&format!(
            "Database did not become available after {} retries. Exiting.",
            max_attempts
        ));
    }

    fn aborted(&mut self, attempt: u32, error: &ConnectError) {
        self.failure(&format!(
            "Database check aborted on attempt {}: {}",
            attempt, error
        ));
    }
}
