use crate::config::settings::Settings;
use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

pub async fn create_pool(settings: &Settings) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .min_connections(settings.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(60))
        .max_lifetime(Duration::from_secs(3600))
        .connect_with(settings.database.connection_string().parse()?)
        .await
        .context("Failed to create database connection pool")?;

    // Try to acquire a connection to verify the pool is working
    pool.acquire()
        .await
        .context("Failed to acquire initial database connection")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(pool)
}

// Error type for database errors
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Creator '{0}' is not a known user")]
    UnknownCreator(String),
    #[error("Database error: {0}")]
    Other(#[from] sqlx::Error),
}
