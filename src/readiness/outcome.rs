use std::fmt;

use super::ConnectError;

/// Terminal state of a probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A connection succeeded on attempt `attempts`
    Ready { attempts: u32 },
    /// Every attempt in the budget failed
    TimedOut { attempts: u32 },
    /// Strict mode stopped on an unexpected failure
    Aborted { attempt: u32, error: ConnectError },
}

impl ProbeOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, ProbeOutcome::Ready { .. })
    }

    /// Number of connection attempts made.
    pub fn attempts(&self) -> u32 {
        match self {
            ProbeOutcome::Ready { attempts } | ProbeOutcome::TimedOut { attempts } => *attempts,
            ProbeOutcome::Aborted { attempt, .. } => *attempt,
        }
    }

    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> u8 {
        if self.is_ready() {
            0
        } else {
            1
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeOutcome::Ready { .. } => "ready",
            ProbeOutcome::TimedOut { .. } => "timed_out",
            ProbeOutcome::Aborted { .. } => "aborted",
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Ready { attempts } => {
                write!(f, "database ready after {} attempt(s)", attempts)
            }
            ProbeOutcome::TimedOut { attempts } => {
                write!(f, "database unavailable after {} attempt(s)", attempts)
            }
            ProbeOutcome::Aborted { attempt, error } => {
                write!(f, "aborted on attempt {}: {}", attempt, error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ProbeOutcome::Ready { attempts: 1 }.exit_code(), 0);
        assert_eq!(ProbeOutcome::TimedOut { attempts: 30 }.exit_code(), 1);
        let aborted = ProbeOutcome::Aborted {
            attempt: 2,
            error: ConnectError::unexpected("boom"),
        };
        assert_eq!(aborted.exit_code(), 1);
        assert_eq!(aborted.attempts(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ProbeOutcome::TimedOut { attempts: 30 }.to_string(),
            "database unavailable after 30 attempt(s)"
        );
        assert_eq!(ProbeOutcome::Ready { attempts: 4 }.as_str(), "ready");
    }
}
