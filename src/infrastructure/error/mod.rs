use thiserror::Error;

use crate::config::SettingsError;
use crate::readiness::ProbeOutcome;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("Database not ready: {0}")]
    NotReady(ProbeOutcome),
}

impl AppError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Settings(_) => 1,
            AppError::NotReady(outcome) => outcome.exit_code(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Settings(_) => "CONFIG_ERROR",
            AppError::NotReady(_) => "DATABASE_NOT_READY",
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_exit_code() {
        let err = AppError::NotReady(ProbeOutcome::TimedOut { attempts: 30 });
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.code(), "DATABASE_NOT_READY");
        assert!(err.to_string().contains("after 30 attempt(s)"));
    }

    #[test]
    fn test_settings_error_exit_code() {
        let err = AppError::from(SettingsError::Invalid {
            field: "DB_PORT",
            reason: "must be between 1 and 65535".to_string(),
        });
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("DB_PORT"));
    }
}
