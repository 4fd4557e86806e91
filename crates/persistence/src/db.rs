//! Database connection pool management.

use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use std::time::Duration;

use crate::error::{DatabaseError, DatabaseResult};

/// Schema used when none is configured.
pub const DEFAULT_SCHEMA: &str = "company";

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    /// Schema holding every Taskboard table. Set as `search_path` on each connection.
    #[serde(default = "default_schema")]
    pub schema: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

fn default_schema() -> String {
    DEFAULT_SCHEMA.to_string()
}
fn default_max_connections() -> u32 {
    5
}
fn default_min_connections() -> u32 {
    1
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}

impl DatabaseConfig {
    /// Creates a configuration with default pool settings for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            schema: default_schema(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Checks the settings that would otherwise fail late or unsafely.
    pub fn validate(&self) -> DatabaseResult<()> {
        if self.url.trim().is_empty() {
            return Err(DatabaseError::InvalidConfig(
                "database url must not be empty".into(),
            ));
        }
        shared::validation::validate_schema_name(&self.schema).map_err(|_| {
            DatabaseError::InvalidConfig(format!("invalid schema name: {:?}", self.schema))
        })?;
        if self.max_connections == 0 {
            return Err(DatabaseError::InvalidConfig(
                "max_connections must be at least 1".into(),
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(DatabaseError::InvalidConfig(format!(
                "min_connections ({}) exceeds max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }
        Ok(())
    }
}

/// Creates a PostgreSQL connection pool whose connections all use the
/// configured schema.
///
/// The schema itself is created if missing, so migrations can run right after.
pub async fn create_pool(config: &DatabaseConfig) -> DatabaseResult<PgPool> {
    config.validate()?;

    let set_search_path = format!("SET search_path TO {}", config.schema);
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .after_connect(move |conn, _meta| {
            let set_search_path = set_search_path.clone();
            Box::pin(async move {
                conn.execute(set_search_path.as_str()).await?;
                Ok(())
            })
        })
        .connect(&config.url)
        .await?;

    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", config.schema))
        .execute(&pool)
        .await?;

    Ok(pool)
}
