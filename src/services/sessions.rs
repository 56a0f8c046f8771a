use std::time::Duration;
use thiserror::Error;

use crate::models::ProblemSession;

/// Errors that can occur with session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Session not found or expired: {0}")]
    NotFound(String),
}

/// In-memory store for problem sessions
///
/// Entries expire after the configured TTL (24 hours by default), so a client
/// has that long to move from detection to matching.
pub struct SessionStore {
    cache: moka::future::Cache<String, Vec<u8>>,
}

impl SessionStore {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Store a session and return its new identifier
    pub async fn create(&self, session: &ProblemSession) -> Result<String, SessionError> {
        let session_id = uuid::Uuid::new_v4().to_string();
        let bytes = serde_json::to_vec(session)?;

        self.cache.insert(SessionKey::session(&session_id), bytes).await;

        tracing::trace!("Session stored: {}", session_id);
        Ok(session_id)
    }

    pub async fn get(&self, session_id: &str) -> Result<ProblemSession, SessionError> {
        match self.cache.get(&SessionKey::session(session_id)).await {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Err(SessionError::NotFound(session_id.to_string())),
        }
    }

    pub async fn delete(&self, session_id: &str) {
        self.cache.invalidate(&SessionKey::session(session_id)).await;
    }
}

/// Session key builder
pub struct SessionKey;

impl SessionKey {
    pub fn session(session_id: &str) -> String {
        format!("session:{}", session_id)
    }
}
