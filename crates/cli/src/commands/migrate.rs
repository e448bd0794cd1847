//! Session store migration.
//!
//! # Usage
//!
//! ```bash
//! CLARITY_DATABASE_URL=sqlite://clarity.db clarity-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `CLARITY_DATABASE_URL` - `SQLite` connection string for the session store
//!
//! The web server never creates the table itself; run this once before
//! starting it with a database URL.

use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use tower_sessions_sqlx_store::SqliteStore;

/// Errors from the migrate command.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create the session table.
///
/// # Errors
///
/// Returns an error if `CLARITY_DATABASE_URL` is unset or the database
/// cannot be opened or migrated.
pub async fn sessions() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("CLARITY_DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| MigrationError::MissingEnvVar("CLARITY_DATABASE_URL"))?;

    tracing::info!("Connecting to session database...");
    let options =
        SqliteConnectOptions::from_str(database_url.expose_secret())?.create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;

    tracing::info!("Running session store migration...");
    SqliteStore::new(pool).migrate().await?;

    tracing::info!("Session store migration complete!");
    Ok(())
}
