use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::session::{SessionError, SessionRecord};

/// Durable key-value medium addressed by session id. Implementations must
/// make `set` an atomic replace so concurrent saves of the same id never
/// interleave (last writer wins).
#[async_trait]
pub trait SessionBackend: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<SessionRecord>, SessionError>;
    async fn set(&self, record: &SessionRecord) -> Result<(), SessionError>;
    async fn delete(&self, id: &str) -> Result<(), SessionError>;
}

/// Process-local backend. Sessions do not survive a restart; used by tests
/// and deployments without a DATABASE_URL. The whole-map write lock gives
/// the per-id atomic replace for free.
#[derive(Default)]
pub struct MemoryBackend {
    records: RwLock<HashMap<String, SessionRecord>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl SessionBackend for MemoryBackend {
    async fn get(&self, id: &str) -> Result<Option<SessionRecord>, SessionError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn set(&self, record: &SessionRecord) -> Result<(), SessionError> {
        self.records.write().await.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), SessionError> {
        self.records.write().await.remove(id);
        Ok(())
    }
}
