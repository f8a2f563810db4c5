use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::session::backend::SessionBackend;
use crate::session::{SessionError, SessionRecord};

/// Postgres-backed session storage. One row per session; the upsert makes
/// concurrent saves of the same id an atomic replace.
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the sessions table when missing, matching the get/set/delete
    /// contract; no other schema detail is load-bearing.
    pub async fn ensure_table(&self) -> Result<(), SessionError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS sessions (
                sid TEXT PRIMARY KEY,
                data JSONB NOT NULL,
                expires_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SessionBackend for PostgresBackend {
    async fn get(&self, id: &str) -> Result<Option<SessionRecord>, SessionError> {
        let row = sqlx::query("SELECT sid, data, expires_at FROM sessions WHERE sid = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let data: Json<HashMap<String, Value>> = row.try_get("data")?;
                let expires_at: DateTime<Utc> = row.try_get("expires_at")?;
                Ok(Some(SessionRecord { id: row.try_get("sid")?, data: data.0, expires_at }))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, record: &SessionRecord) -> Result<(), SessionError> {
        sqlx::query(
            "INSERT INTO sessions (sid, data, expires_at) VALUES ($1, $2, $3)
             ON CONFLICT (sid) DO UPDATE
             SET data = EXCLUDED.data, expires_at = EXCLUDED.expires_at",
        )
        .bind(&record.id)
        .bind(Json(&record.data))
        .bind(record.expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), SessionError> {
        sqlx::query("DELETE FROM sessions WHERE sid = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
