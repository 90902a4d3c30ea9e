/**
 * Server Configuration
 *
 * This module loads and validates server configuration from the
 * environment.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables, with sensible
 * defaults for local development where a default is safe to have.
 *
 * # Error Handling
 *
 * The token signing secret has no safe default: without it the server
 * could not issue or verify a single token, so its absence fails
 * configuration loading and with it process startup. The database is
 * optional: a missing `DATABASE_URL` degrades to the in-memory stores
 * with a warning, and the server keeps working for local development.
 */

use sqlx::PgPool;
use thiserror::Error;

use crate::backend::auth::password::DEFAULT_HASH_COST;

/// Default HTTP port.
const DEFAULT_PORT: u16 = 3000;

/// Configuration error; fails process startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The token signing secret is missing.
    #[error("JWT_SECRET_KEY is not set; refusing to start without a token signing secret")]
    MissingJwtSecret,
}

/// Validated server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Token signing secret (required)
    pub jwt_secret: String,
    /// HTTP listen port
    pub port: u16,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// `ConfigError::MissingJwtSecret` when `JWT_SECRET_KEY` is absent or
    /// empty. This is deliberately fatal: issuing tokens without a
    /// configured secret must be impossible, not an error discovered on
    /// the first login.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = std::env::var("JWT_SECRET_KEY")
            .ok()
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::MissingJwtSecret)?;

        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|raw| raw.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|raw| raw.parse::<u32>().ok())
            .unwrap_or(DEFAULT_HASH_COST);

        Ok(Self {
            jwt_secret,
            port,
            bcrypt_cost,
        })
    }
}

/// Load and initialize the database connection pool.
///
/// This function:
/// 1. Reads `DATABASE_URL` from the environment
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs database migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is successfully configured
/// - `None` if `DATABASE_URL` is not set or the connection fails
///
/// Errors are logged but do not prevent server startup; the caller falls
/// back to the in-memory stores.
pub async fn load_database() -> Option<PgPool> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Falling back to in-memory stores.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Falling back to in-memory stores.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {:?}", e);
            // Continue anyway - migrations might have already been run
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
