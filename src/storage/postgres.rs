//! PostgreSQL document store: one JSONB row per section

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{postgres::PgPoolOptions, Pool, Postgres, Row};

use super::{Document, DocumentStore, Section};
use crate::error::AppResult;

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    /// Connect and run migrations
    pub async fn connect(url: &str, max_connections: u32) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;

        tracing::info!("Connected to database");
        Ok(Self::new(pool))
    }

    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn read_all(&self) -> AppResult<Document> {
        let rows = sqlx::query("SELECT section, data FROM collections")
            .fetch_all(&self.pool)
            .await?;

        let mut root = Map::new();
        for row in rows {
            let section: String = row.get("section");
            let data: Value = row.get("data");
            root.insert(section, data);
        }

        Document::from_value(Value::Object(root))
    }

    async fn write_sections(&self, sections: Vec<(Section, Value)>) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        for (section, data) in sections {
            tracing::debug!("Writing section {}", section);
            sqlx::query(
                r#"
                INSERT INTO collections (section, data, updated_at)
                VALUES ($1, $2, NOW())
                ON CONFLICT (section)
                DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()
                "#,
            )
            .bind(section.as_str())
            .bind(data)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
