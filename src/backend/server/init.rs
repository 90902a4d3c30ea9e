/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server: store selection, default-admin bootstrap, state creation and
 * route configuration.
 *
 * # Initialization Process
 *
 * 1. Build the token service and password hasher from configuration
 * 2. Load the database; fall back to in-memory stores without one
 * 3. Ensure a default admin account exists
 * 4. Create the application state and router
 * 5. Start the periodic session purge task
 *
 * The token signing secret was already validated by configuration
 * loading, so initialization never has to handle a missing secret.
 */

use axum::Router;
use std::sync::Arc;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::tokens::TokenService;
use crate::backend::auth::users::{
    CredentialStore, MemoryCredentialStore, NewUser, PgCredentialStore, Role,
};
use crate::backend::orders::store::{MemoryOrderStore, OrderStore, PgOrderStore};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Default admin credentials created when no admin account exists.
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
const DEFAULT_ADMIN_PASSWORD: &str = "Admin@123";

/// How often expired sessions are reclaimed.
const SESSION_PURGE_INTERVAL_SECS: u64 = 300;

/// Create and configure the Axum application.
///
/// # Returns
///
/// Configured Axum Router ready to serve requests.
pub async fn create_app(config: &ServerConfig) -> Router<()> {
    tracing::info!("Initializing bookstore backend server");

    // Step 1: Services that exist regardless of the store backend.
    let tokens = TokenService::new(&config.jwt_secret);
    let hasher = PasswordHasher::new(config.bcrypt_cost);

    // Step 2: Pick the store backend.
    let (store, orders): (Arc<dyn CredentialStore>, Arc<dyn OrderStore>) =
        match load_database().await {
            Some(pool) => (
                Arc::new(PgCredentialStore::new(pool.clone())),
                Arc::new(PgOrderStore::new(pool)),
            ),
            None => (
                Arc::new(MemoryCredentialStore::new()),
                Arc::new(MemoryOrderStore::new()),
            ),
        };

    // Step 3: Make sure the dashboard is reachable on a fresh install.
    ensure_default_admin(store.as_ref(), &hasher).await;

    // Step 4: Application state and router.
    let app_state = AppState::new(store, orders, tokens, hasher);
    let app = create_router(app_state.clone());

    // Step 5: Periodic cleanup of expired session records.
    let sessions = app_state.sessions.clone();
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(SESSION_PURGE_INTERVAL_SECS));
        loop {
            interval.tick().await;
            let purged = sessions.purge_expired().await;
            if purged > 0 {
                tracing::debug!("Purged {} expired sessions", purged);
            }
        }
    });

    tracing::info!("Router configured with periodic session purge task");

    app
}

/// Create the default admin account if no admin exists.
///
/// Failures are logged but never abort startup; the admin registration
/// endpoint remains available either way.
async fn ensure_default_admin(store: &dyn CredentialStore, hasher: &PasswordHasher) {
    match store.count_by_role(Role::Admin).await {
        Ok(0) => {}
        Ok(_) => {
            tracing::info!("Admin account already exists");
            return;
        }
        Err(e) => {
            tracing::error!("Failed to check for existing admin: {:?}", e);
            return;
        }
    }

    let password_hash = match hasher.hash(DEFAULT_ADMIN_PASSWORD) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash default admin password: {:?}", e);
            return;
        }
    };

    match store
        .create(NewUser {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password_hash,
            role: Role::Admin,
        })
        .await
    {
        Ok(_) => {
            tracing::warn!(
                "Default admin created (username: {}, password: {}). Change the password.",
                DEFAULT_ADMIN_USERNAME,
                DEFAULT_ADMIN_PASSWORD
            );
        }
        Err(e) => {
            tracing::error!("Failed to create default admin: {:?}", e);
        }
    }
}
