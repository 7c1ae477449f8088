use std::fmt;
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use thiserror::Error;

use crate::readiness::RetryPolicy;

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub db: DatabaseConfig,
    #[serde(default)]
    pub wait: WaitConfig,
}

/// Connection parameters for the database being waited on.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_host")]
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    #[serde(default = "default_db_name")]
    pub name: String,
    #[serde(default = "default_db_user")]
    pub user: String,
    #[serde(default = "default_db_password")]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaitConfig {
    /// Maximum number of connection attempts
    #[serde(default = "default_wait_attempts")]
    pub attempts: u32,
    /// Delay between attempts in seconds
    #[serde(default = "default_wait_interval")]
    pub interval: u64,
    /// Stop on the first failure that is not a known transient one
    #[serde(default)]
    pub strict: bool,
}

// Defaults are meant for local docker-compose setups only.
fn default_db_host() -> String {
    "db".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_name() -> String {
    "mydjangoappdb".to_string()
}

fn default_db_user() -> String {
    "mydjangoappuser".to_string()
}

fn default_db_password() -> String {
    "mydjangoapppassword".to_string()
}

fn default_wait_attempts() -> u32 {
    30
}

fn default_wait_interval() -> u64 {
    2 // seconds
}

impl Settings {
    /// Load settings from the process environment (and `.env`, if present).
    pub fn new() -> Result<Self, SettingsError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        Self::from_env_source(None)
    }

    /// Load settings from an explicit variable map instead of the process
    /// environment. `None` reads the real environment.
    pub fn from_env_source(
        source: Option<config::Map<String, String>>,
    ) -> Result<Self, SettingsError> {
        // Each section is read flat from its own prefix, so DB_HOST maps to
        // `host` and extra variables like DB_PASSWORD_FILE are ignored.
        let db = Config::builder()
            .set_default("host", default_db_host())?
            .set_default("port", i64::from(default_db_port()))?
            .set_default("name", default_db_name())?
            .set_default("user", default_db_user())?
            .set_default("password", default_db_password())?
            // DB_HOST, DB_PORT, DB_NAME, DB_USER, DB_PASSWORD
            .add_source(
                Environment::with_prefix("DB")
                    .prefix_separator("_")
                    .source(source.clone()),
            )
            .build()?
            .try_deserialize::<DatabaseConfig>()?;

        let wait = Config::builder()
            .set_default("attempts", i64::from(default_wait_attempts()))?
            .set_default("interval", default_wait_interval() as i64)?
            .set_default("strict", false)?
            // WAIT_ATTEMPTS, WAIT_INTERVAL, WAIT_STRICT
            .add_source(
                Environment::with_prefix("WAIT")
                    .prefix_separator("_")
                    .source(source),
            )
            .build()?
            .try_deserialize::<WaitConfig>()?;

        let settings = Settings { db, wait };
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the prober cannot work with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.db.host.trim().is_empty() {
            return Err(SettingsError::Invalid {
                field: "DB_HOST",
                reason: "must not be empty".to_string(),
            });
        }
        if self.db.port == 0 {
            return Err(SettingsError::Invalid {
                field: "DB_PORT",
                reason: "must be between 1 and 65535".to_string(),
            });
        }
        if self.wait.attempts == 0 {
            return Err(SettingsError::Invalid {
                field: "WAIT_ATTEMPTS",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.wait.interval == 0 {
            return Err(SettingsError::Invalid {
                field: "WAIT_INTERVAL",
                reason: "must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.wait.attempts,
            interval: Duration::from_secs(self.wait.interval),
            strict: self.wait.strict,
        }
    }
}

impl DatabaseConfig {
    /// `host:port`, as shown in progress messages.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection URL with the password masked, safe for logging.
    pub fn url_masked(&self) -> String {
        if self.password.is_empty() {
            return format!(
                "postgres://{}@{}:{}/{}",
                self.user, self.host, self.port, self.name
            );
        }
        format!(
            "postgres://{}:***@{}:{}/{}",
            self.user, self.host, self.port, self.name
        )
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            port: default_db_port(),
            name: default_db_name(),
            user: default_db_user(),
            password: default_db_password(),
        }
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            attempts: default_wait_attempts(),
            interval: default_wait_interval(),
            strict: false,
        }
    }
}
