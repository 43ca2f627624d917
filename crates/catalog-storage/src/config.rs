//! Database configuration read from the environment.

use catalog_core::error::DomainError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string.
    pub url: String,
    /// Maximum pooled connections.
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Reads `DATABASE_URL` (required) and `DB_MAX_CONNECTIONS`
    /// (default 10).
    ///
    /// # Errors
    ///
    /// `DomainError::Infrastructure` when `DATABASE_URL` is missing or
    /// `DB_MAX_CONNECTIONS` is not a number.
    pub fn from_env() -> Result<Self, DomainError> {
        let url = std::env::var("DATABASE_URL").map_err(|_| {
            DomainError::Infrastructure("DATABASE_URL environment variable must be set".into())
        })?;
        let max_connections = match std::env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse().map_err(|_| {
                DomainError::Infrastructure("DB_MAX_CONNECTIONS must be a number".into())
            })?,
            Err(_) => 10,
        };
        Ok(Self {
            url,
            max_connections,
        })
    }

    /// Opens the connection pool.
    ///
    /// # Errors
    ///
    /// `DomainError::Infrastructure` when the pool cannot connect.
    pub async fn connect(&self) -> Result<PgPool, DomainError> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.url)
            .await
            .map_err(|err| DomainError::Infrastructure(err.to_string()))
    }
}
