// db/statedb.rs
use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::Row;

use super::db::DBClient;
use crate::error::ServiceError;

/// Version written alongside every state tree. Bump it together with a
/// migration when a store's persisted shape changes.
pub const SCHEMA_VERSION: i64 = 1;

// Namespace keys, kept identical to the shipped app's storage keys so an
// upgraded install finds its old state rows.
pub const AUTH_NAMESPACE: &str = "loop-local-auth";
pub const BUSINESS_NAMESPACE: &str = "loop-local-business";
pub const NOTIFICATION_NAMESPACE: &str = "loop-local-notifications";
pub const SYNC_NAMESPACE: &str = "loop-local-sync";

#[async_trait]
pub trait StateStoreExt {
    /// Load a store's state tree. `Ok(None)` means the namespace has never
    /// been written; a version mismatch is a hard error, not a misparse.
    async fn load_state<T: DeserializeOwned + Send>(
        &self,
        namespace: &str,
    ) -> Result<Option<T>, ServiceError>;

    async fn save_state<T: Serialize + Sync>(
        &self,
        namespace: &str,
        state: &T,
    ) -> Result<(), ServiceError>;

    async fn clear_state(&self, namespace: &str) -> Result<(), ServiceError>;
}

#[async_trait]
impl StateStoreExt for DBClient {
    async fn load_state<T: DeserializeOwned + Send>(
        &self,
        namespace: &str,
    ) -> Result<Option<T>, ServiceError> {
        let row = sqlx::query("SELECT version, state FROM store_state WHERE namespace = $1")
            .bind(namespace)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let version: i64 = row.try_get("version")?;
        if version != SCHEMA_VERSION {
            return Err(ServiceError::SchemaVersion {
                namespace: namespace.to_string(),
                found: version,
                supported: SCHEMA_VERSION,
            });
        }

        let state: String = row.try_get("state")?;
        Ok(Some(serde_json::from_str(&state)?))
    }

    async fn save_state<T: Serialize + Sync>(
        &self,
        namespace: &str,
        state: &T,
    ) -> Result<(), ServiceError> {
        let state = serde_json::to_string(state)?;

        sqlx::query(
            r#"
            INSERT INTO store_state (namespace, version, state, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT(namespace) DO UPDATE SET
                version = excluded.version,
                state = excluded.state,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(namespace)
        .bind(SCHEMA_VERSION)
        .bind(state)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn clear_state(&self, namespace: &str) -> Result<(), ServiceError> {
        sqlx::query("DELETE FROM store_state WHERE namespace = $1")
            .bind(namespace)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
