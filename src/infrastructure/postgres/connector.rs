//! Single-connection PostgreSQL connector.

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

use super::classify;
use crate::config::DatabaseConfig;
use crate::readiness::{ConnectError, Connector};

const APPLICATION_NAME: &str = "db-readiness";

/// Opens one connection per attempt and closes it right away.
///
/// No pool is kept; the connection only proves the server accepts logins.
pub struct PgConnector {
    /// Connect options, built once from the settings
    options: PgConnectOptions,

    /// `host:port` for progress messages
    address: String,

    /// Connection URL with the password masked (for logging purposes)
    url_masked: String,
}

impl PgConnector {
    pub fn new(config: &DatabaseConfig) -> Self {
        let url_masked = config.url_masked();
        tracing::debug!(url = %url_masked, "Readiness connector configured");

        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.name)
            .username(&config.user)
            .password(&config.password)
            .application_name(APPLICATION_NAME);

        Self {
            options,
            address: config.address(),
            url_masked,
        }
    }
}

#[async_trait]
impl Connector for PgConnector {
    fn target(&self) -> String {
        self.address.clone()
    }

    async fn connect(&self) -> Result<(), ConnectError> {
        let conn = PgConnection::connect_with(&self.options)
            .await
            .map_err(|e| classify(&e))?;

        // The login already succeeded; a failed goodbye does not matter.
        if let Err(e) = conn.close().await {
            tracing::debug!(
                url = %self.url_masked,
                error = %e,
                "Closing readiness connection failed"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_target() {
        let config = DatabaseConfig {
            host: "postgres".to_string(),
            port: 6432,
            ..DatabaseConfig::default()
        };
        let connector = PgConnector::new(&config);

        assert_eq!(connector.target(), "postgres:6432");
    }
}
