//! Database module for handling SQLite connections and operations
//!
//! This module provides connection pooling, configuration, schema
//! migrations and health checks for the workout database.

use crate::error::{DatabaseError, DatabaseResult};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;
use std::str::FromStr;
use tracing::{error, info};

/// Default database location, relative to the working directory
pub const DEFAULT_DATABASE_URL: &str = "sqlite://workout.db";

/// Database configuration struct
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    ///
    /// # Environment Variables
    /// - `DATABASE_URL`: SQLite connection URL (default: "sqlite://workout.db")
    /// - `DATABASE_MAX_CONNECTIONS`: Maximum number of connections (default: 5)
    pub fn from_env() -> DatabaseResult<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        if database_url.trim().is_empty() {
            return Err(DatabaseError::Configuration(
                "DATABASE_URL must not be empty".to_string(),
            ));
        }

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            database_url,
            max_connections,
        })
    }

    /// Configuration for a private in-memory database, used by tests and tooling
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

/// Initialize a SQLite connection pool
///
/// Foreign keys are enforced on every connection. An in-memory database
/// lives only as long as its connection, so such pools hold exactly one
/// connection that is never recycled.
///
/// # Arguments
///
/// * `config` - Database configuration
///
/// # Returns
///
/// * `DatabaseResult<SqlitePool>` - SQLite connection pool or error
pub async fn init_pool(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    info!("Initializing database connection pool");

    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(|e| DatabaseError::Configuration(format!("Invalid database URL: {}", e)))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if config.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections.max(1))
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(DatabaseError::Connection)?;

    info!("Database connection pool initialized successfully");
    Ok(pool)
}

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &SqlitePool) -> DatabaseResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(DatabaseError::Migration)?;

    info!("Database migrations applied");
    Ok(())
}

/// Check database connectivity
///
/// # Arguments
///
/// * `pool` - SQLite connection pool
///
/// # Returns
///
/// * `DatabaseResult<bool>` - True if connection is successful
pub async fn health_check(pool: &SqlitePool) -> DatabaseResult<bool> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| {
            error!("Database health check failed: {}", e);
            DatabaseError::Query(e)
        })?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_database_config_from_env() {
        unsafe {
            std::env::remove_var("DATABASE_URL");
            std::env::remove_var("DATABASE_MAX_CONNECTIONS");
        }

        let config = DatabaseConfig::from_env().expect("Failed to create database config");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    #[serial]
    fn test_database_config_from_env_with_custom_values() {
        unsafe {
            std::env::set_var("DATABASE_URL", "sqlite://custom.db");
            std::env::set_var("DATABASE_MAX_CONNECTIONS", "not-a-number");
        }

        let config = DatabaseConfig::from_env().unwrap();
        assert_eq!(config.database_url, "sqlite://custom.db");
        assert_eq!(config.max_connections, 5);

        unsafe {
            std::env::set_var("DATABASE_MAX_CONNECTIONS", "12");
        }
        assert_eq!(DatabaseConfig::from_env().unwrap().max_connections, 12);

        unsafe {
            std::env::remove_var("DATABASE_URL");
            std::env::remove_var("DATABASE_MAX_CONNECTIONS");
        }
    }

    #[test]
    #[serial]
    fn test_empty_database_url_is_rejected() {
        unsafe {
            std::env::set_var("DATABASE_URL", "  ");
        }

        let result = DatabaseConfig::from_env();
        assert!(matches!(result, Err(DatabaseError::Configuration(_))));

        unsafe {
            std::env::remove_var("DATABASE_URL");
        }
    }

    #[tokio::test]
    async fn test_in_memory_pool_migrates_and_answers() {
        let pool = init_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        assert!(health_check(&pool).await.unwrap());

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_%' ESCAPE '\\' AND name NOT LIKE 'sqlite%' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(tables, vec!["exercises", "workout_exercises", "workouts"]);
    }
}
