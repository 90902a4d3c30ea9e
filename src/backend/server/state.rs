/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is the central state container for the
 * application, holding:
 * - The credential store (PostgreSQL or in-memory)
 * - The order store (PostgreSQL or in-memory)
 * - The session store (in-memory, shared)
 * - The token service (signing keys, no mutable state)
 * - The password hasher (work factor, no mutable state)
 *
 * # Thread Safety
 *
 * Everything in the state is cheap to clone and safe for concurrent
 * access: the stores are `Arc`ed trait objects over internally
 * synchronized implementations, the session store wraps its map in
 * `Arc<RwLock<>>`, and the token service and hasher are immutable.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract just the service
 * they need (`State<Arc<dyn OrderStore>>`, `State<SessionStore>`, ...)
 * instead of the whole `AppState`.
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::SessionStore;
use crate::backend::auth::tokens::TokenService;
use crate::backend::auth::users::{CredentialStore, MemoryCredentialStore};
use crate::backend::orders::store::{MemoryOrderStore, OrderStore};

/// Application state shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    /// User records and lookups
    pub store: Arc<dyn CredentialStore>,

    /// Order records and lookups
    pub orders: Arc<dyn OrderStore>,

    /// Server-side sessions for the cookie login path
    pub sessions: SessionStore,

    /// JWT issuance and verification
    pub tokens: TokenService,

    /// bcrypt hashing with the configured work factor
    pub hasher: PasswordHasher,
}

impl AppState {
    /// Assemble state from already-constructed services.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        orders: Arc<dyn OrderStore>,
        tokens: TokenService,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            store,
            orders,
            sessions: SessionStore::new(),
            tokens,
            hasher,
        }
    }

    /// State backed entirely by in-memory stores.
    ///
    /// What the server runs on when no database is configured, and what
    /// the tests run on always.
    pub fn in_memory(jwt_secret: &str, bcrypt_cost: u32) -> Self {
        Self::new(
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(MemoryOrderStore::new()),
            TokenService::new(jwt_secret),
            PasswordHasher::new(bcrypt_cost),
        )
    }
}

/// Allow handlers to extract the credential store directly.
impl FromRef<AppState> for Arc<dyn CredentialStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

/// Allow handlers to extract the order store directly.
impl FromRef<AppState> for Arc<dyn OrderStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.orders.clone()
    }
}

/// Allow handlers to extract the session store directly.
impl FromRef<AppState> for SessionStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}

/// Allow handlers to extract the token service directly.
impl FromRef<AppState> for TokenService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

/// Allow handlers to extract the password hasher directly.
impl FromRef<AppState> for PasswordHasher {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.hasher
    }
}
