//! Mapping from `sqlx` errors to readiness failure kinds.

use std::io;

use crate::readiness::{ConnectError, TransientKind};

/// Classify a connect-time driver error.
///
/// Only a closed set of errors counts as transient; everything else is
/// reported as unexpected.
pub fn classify(err: &sqlx::Error) -> ConnectError {
    let detail = err.to_string();

    let kind = match err {
        sqlx::Error::Io(io_err) => classify_io(io_err),
        sqlx::Error::Database(db_err) => db_err.code().as_deref().and_then(classify_sqlstate),
        sqlx::Error::PoolTimedOut => Some(TransientKind::TimedOut),
        _ => None,
    };

    match kind {
        Some(kind) => ConnectError::Transient { kind, detail },
        None => ConnectError::Unexpected { detail },
    }
}

/// Map a PostgreSQL SQLSTATE code returned during startup to a transient kind.
pub fn classify_sqlstate(code: &str) -> Option<TransientKind> {
    match code {
        // cannot_connect_now: starting up, shutting down or in recovery
        "57P03" => Some(TransientKind::DatabaseStarting),
        // invalid_password, invalid_authorization_specification
        "28P01" | "28000" => Some(TransientKind::AuthenticationFailed),
        // invalid_catalog_name
        "3D000" => Some(TransientKind::DatabaseMissing),
        // too_many_connections
        "53300" => Some(TransientKind::TooManyConnections),
        _ => None,
    }
}

fn classify_io(err: &io::Error) -> Option<TransientKind> {
    match err.kind() {
        io::ErrorKind::ConnectionRefused => Some(TransientKind::ConnectionRefused),
        io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::UnexpectedEof => Some(TransientKind::ConnectionReset),
        io::ErrorKind::TimedOut => Some(TransientKind::TimedOut),
        io::ErrorKind::NotConnected
        | io::ErrorKind::AddrNotAvailable
        | io::ErrorKind::HostUnreachable
        | io::ErrorKind::NetworkUnreachable => Some(TransientKind::Unreachable),
        // getaddrinfo failures carry no dedicated kind
        _ if err.to_string().contains("failed to lookup address") => {
            Some(TransientKind::HostUnresolved)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_error(kind: io::ErrorKind, msg: &str) -> sqlx::Error {
        sqlx::Error::Io(io::Error::new(kind, msg.to_string()))
    }

    fn kind_of(err: &ConnectError) -> Option<TransientKind> {
        match err {
            ConnectError::Transient { kind, .. } => Some(*kind),
            ConnectError::Unexpected { .. } => None,
        }
    }

    #[test]
    fn test_refused_is_transient() {
        let err = classify(&io_error(io::ErrorKind::ConnectionRefused, "Connection refused"));
        assert_eq!(kind_of(&err), Some(TransientKind::ConnectionRefused));
        assert!(err.to_string().contains("Connection refused"));
    }

    #[test]
    fn test_dns_failure_is_transient() {
        let err = classify(&io_error(
            io::ErrorKind::Other,
            "failed to lookup address information: Name or service not known",
        ));
        assert_eq!(kind_of(&err), Some(TransientKind::HostUnresolved));
    }

    #[test]
    fn test_socket_errors() {
        assert_eq!(
            kind_of(&classify(&io_error(io::ErrorKind::ConnectionReset, "reset"))),
            Some(TransientKind::ConnectionReset)
        );
        assert_eq!(
            kind_of(&classify(&io_error(io::ErrorKind::TimedOut, "timed out"))),
            Some(TransientKind::TimedOut)
        );
        assert_eq!(
            kind_of(&classify(&io_error(io::ErrorKind::AddrNotAvailable, "no addr"))),
            Some(TransientKind::Unreachable)
        );
        assert_eq!(kind_of(&classify(&sqlx::Error::PoolTimedOut)), Some(TransientKind::TimedOut));
    }

    #[test]
    fn test_other_io_is_unexpected() {
        let err = classify(&io_error(io::ErrorKind::PermissionDenied, "denied"));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_sqlstate_codes() {
        assert_eq!(classify_sqlstate("57P03"), Some(TransientKind::DatabaseStarting));
        assert_eq!(classify_sqlstate("28P01"), Some(TransientKind::AuthenticationFailed));
        assert_eq!(classify_sqlstate("28000"), Some(TransientKind::AuthenticationFailed));
        assert_eq!(classify_sqlstate("3D000"), Some(TransientKind::DatabaseMissing));
        assert_eq!(classify_sqlstate("53300"), Some(TransientKind::TooManyConnections));
        assert_eq!(classify_sqlstate("42601"), None);
    }

    #[test]
    fn test_non_network_errors_unexpected() {
        let err = classify(&sqlx::Error::Protocol("unexpected message".to_string()));
        assert!(!err.is_transient());
        assert!(err.to_string().contains("unexpected message"));

        let err = classify(&sqlx::Error::Configuration("bad sslmode".into()));
        assert!(!err.is_transient());
    }
}
