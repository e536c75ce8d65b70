// db/db.rs
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

/// Handle to the on-device key-value database. One row per store namespace;
/// the whole store state tree lives in the row as JSON.
#[derive(Clone)]
pub struct DBClient {
    pub pool: Pool<Sqlite>,
}

impl std::fmt::Debug for DBClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DBClient")
            .field("pool", &"Pool<Sqlite>")
            .finish()
    }
}

impl DBClient {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        DBClient { pool }
    }

    /// Open the local database and make sure the state table exists.
    /// A single connection keeps `sqlite::memory:` databases coherent.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        let client = DBClient::new(pool);
        client.init_schema().await?;

        tracing::info!("Local store opened at {}", database_url);
        Ok(client)
    }

    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS store_state (
                namespace  TEXT PRIMARY KEY,
                version    INTEGER NOT NULL,
                state      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
