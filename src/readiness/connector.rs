//! Connector trait for a single readiness attempt.

use async_trait::async_trait;
use thiserror::Error;

/// Failure kinds expected while a database is still coming up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientKind {
    /// Nothing is listening on the port yet
    ConnectionRefused,
    /// The host name does not resolve yet (container not registered in DNS)
    HostUnresolved,
    /// The server dropped the connection mid-handshake
    ConnectionReset,
    /// The connection attempt timed out
    TimedOut,
    /// No route to the host or network
    Unreachable,
    /// The server is up but still starting or recovering
    DatabaseStarting,
    /// Credentials rejected; the role may not be provisioned yet
    AuthenticationFailed,
    /// The database has not been created yet
    DatabaseMissing,
    /// Connection slots exhausted
    TooManyConnections,
}

impl TransientKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransientKind::ConnectionRefused => "connection_refused",
            TransientKind::HostUnresolved => "host_unresolved",
            TransientKind::ConnectionReset => "connection_reset",
            TransientKind::TimedOut => "timed_out",
            TransientKind::Unreachable => "unreachable",
            TransientKind::DatabaseStarting => "database_starting",
            TransientKind::AuthenticationFailed => "authentication_failed",
            TransientKind::DatabaseMissing => "database_missing",
            TransientKind::TooManyConnections => "too_many_connections",
        }
    }
}

/// Why a connection attempt failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectError {
    /// A failure that is expected to clear once the database finishes starting
    #[error("{detail}")]
    Transient { kind: TransientKind, detail: String },

    /// Anything outside the known transient set
    #[error("{detail}")]
    Unexpected { detail: String },
}

impl ConnectError {
    pub fn transient(kind: TransientKind, detail: impl Into<String>) -> Self {
        Self::Transient {
            kind,
            detail: detail.into(),
        }
    }

    pub fn unexpected(detail: impl Into<String>) -> Self {
        Self::Unexpected {
            detail: detail.into(),
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }

    /// Short label used in structured logs.
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::Transient { kind, .. } => kind.as_str(),
            Self::Unexpected { .. } => "unexpected",
        }
    }
}

/// Opens (and immediately closes) one connection to the target database.
///
/// Implementations hold their connection parameters; they are fixed when the
/// connector is built and must not be re-read between attempts.
#[async_trait]
pub trait Connector: Send + Sync {
    /// `host:port` of the target, for progress messages.
    fn target(&self) -> String;

    /// Make a single connection attempt.
    async fn connect(&self) -> Result<(), ConnectError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_is_detail() {
        let err = ConnectError::transient(TransientKind::ConnectionRefused, "connection refused");
        assert_eq!(err.to_string(), "connection refused");
        assert!(err.is_transient());
        assert_eq!(err.kind_str(), "connection_refused");

        let err = ConnectError::unexpected("tls handshake failed");
        assert_eq!(err.to_string(), "tls handshake failed");
        assert!(!err.is_transient());
        assert_eq!(err.kind_str(), "unexpected");
    }
}
