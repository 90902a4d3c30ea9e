/**
 * Server-Side Sessions
 *
 * This module implements the stateful credential proof: a random session
 * id handed to the browser in a cookie, mapping to a server-side record
 * with its own expiry. Sessions are regenerated on login (the old id is
 * invalidated only after the new record exists, so the caller never holds
 * zero valid sessions mid-login) and destroyed on logout.
 */

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Session lifetime: 24 hours from creation.
pub const SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// A server-side session record.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    /// The user this session authenticates
    pub user_id: Uuid,
    /// Hard expiry; the record is dead after this instant
    pub expires_at: DateTime<Utc>,
}

/// In-memory session store shared across request handlers.
///
/// The map is wrapped in `Arc<RwLock<>>` for concurrent access; every
/// method takes the lock, does pure map work, and releases it before
/// returning, so no lock is ever held across I/O.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionRecord>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new session for a user and return its id.
    pub async fn create(&self, user_id: Uuid) -> String {
        self.create_with_ttl(user_id, SESSION_TTL_SECS).await
    }

    /// Create a session with an explicit lifetime in seconds.
    pub async fn create_with_ttl(&self, user_id: Uuid, ttl_secs: i64) -> String {
        let session_id = Uuid::new_v4().simple().to_string();
        let record = SessionRecord {
            user_id,
            expires_at: Utc::now() + Duration::seconds(ttl_secs),
        };

        self.sessions
            .write()
            .await
            .insert(session_id.clone(), record);

        session_id
    }

    /// Look up a session by id.
    ///
    /// # Returns
    ///
    /// The record if the id exists and has not expired; `None` otherwise.
    /// Expired records are left in place for the periodic purge.
    pub async fn get(&self, session_id: &str) -> Option<SessionRecord> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session_id)
            .filter(|record| record.expires_at > Utc::now())
            .cloned()
    }

    /// Destroy a session. Removing an unknown id is a no-op, which is
    /// what makes logout idempotent.
    pub async fn remove(&self, session_id: &str) {
        self.sessions.write().await.remove(session_id);
    }

    /// Drop all expired records and return how many were removed.
    ///
    /// Run from a periodic background task; lookups already treat expired
    /// records as absent, so this only reclaims memory.
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        let now = Utc::now();
        sessions.retain(|_, record| record.expires_at > now);
        before - sessions.len()
    }

    /// Number of live records, expired or not (for logging).
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
