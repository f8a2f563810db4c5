// Durable per-visitor session state, keyed by an opaque random token.
pub mod backend;
pub mod cookie;
pub mod postgres;

pub use backend::{MemoryBackend, SessionBackend};
pub use postgres::PostgresBackend;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),

    #[error("session data could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<sqlx::Error> for SessionError {
    fn from(err: sqlx::Error) -> Self {
        SessionError::Unavailable(err.to_string())
    }
}

/// One visitor's durable state. Owned by the store; requests hold a
/// transient mutable copy for the duration of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub data: HashMap<String, Value>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.data.insert(key.into(), value);
    }

    /// Push the expiry out to now + ttl. Done once per request at commit.
    pub fn touch(&mut self, ttl: Duration) {
        self.expires_at = Utc::now() + ttl;
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Session lifecycle over a pluggable durable backend.
pub struct SessionStore {
    backend: Arc<dyn SessionBackend>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn SessionBackend>, ttl_days: i64) -> Self {
        Self { backend, ttl: Duration::days(ttl_days) }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Present and unexpired, or absent. An expired record is deleted on
    /// sight so its id can never be resurrected.
    pub async fn load(&self, id: &str) -> Result<Option<SessionRecord>, SessionError> {
        match self.backend.get(id).await? {
            Some(record) if !record.is_expired() => Ok(Some(record)),
            Some(record) => {
                if let Err(err) = self.backend.delete(&record.id).await {
                    tracing::warn!("failed to reclaim expired session {}: {}", record.id, err);
                }
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Fresh record with a cryptographically random token, persisted
    /// immediately so a concurrent request sees a consistent store.
    pub async fn create(&self) -> Result<SessionRecord, SessionError> {
        let record = SessionRecord {
            id: Uuid::new_v4().simple().to_string(),
            data: HashMap::new(),
            expires_at: Utc::now() + self.ttl,
        };
        self.backend.set(&record).await?;
        tracing::debug!("created session {}", record.id);
        Ok(record)
    }

    /// Idempotent whole-record persist. Callers refresh the expiry with
    /// `SessionRecord::touch` before saving.
    pub async fn save(&self, record: &SessionRecord) -> Result<(), SessionError> {
        self.backend.set(record).await
    }
}
