//! SQLite-backed region document storage.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::infrastructure::clock::document_stamp;
use crate::infrastructure::ports::{
    ClockPort, RegionDocumentRepo, RepoError, StoredCityMappings, StoredRegionConfig,
    CITY_MAPPINGS_KEY, REGION_CONFIG_KEY,
};

/// SQLite implementation of the two region documents.
///
/// One row per document, keyed by document name, body stored as JSON.
pub struct SqliteRegionDocuments {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteRegionDocuments {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("region_documents", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS region_documents (
                doc_key TEXT PRIMARY KEY NOT NULL,
                body_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("region_documents", e))?;

        Ok(Self { pool, clock })
    }

    /// When a document was last written, as RFC 3339.
    #[cfg(test)]
    async fn updated_at(&self, key: &str) -> Result<Option<String>, RepoError> {
        let row = sqlx::query("SELECT updated_at FROM region_documents WHERE doc_key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("updated_at", e))?;
        Ok(row.map(|row| row.get("updated_at")))
    }

    async fn get_document<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        key: &str,
    ) -> Result<Option<T>, RepoError> {
        let row = sqlx::query("SELECT body_json FROM region_documents WHERE doc_key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database(operation, e))?;

        match row {
            Some(row) => {
                let json: String = row.get("body_json");
                let document = serde_json::from_str(&json).map_err(|e| RepoError::serialization(key, e))?;
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    async fn save_document<T: Serialize + Sync>(
        &self,
        operation: &'static str,
        key: &str,
        document: &T,
    ) -> Result<(), RepoError> {
        let json = serde_json::to_string(document).map_err(|e| RepoError::serialization(key, e))?;
        let now = document_stamp(self.clock.as_ref());

        sqlx::query(
            r#"
            INSERT INTO region_documents (doc_key, body_json, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(doc_key) DO UPDATE SET
                body_json = excluded.body_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database(operation, e))?;

        Ok(())
    }
}

#[async_trait]
impl RegionDocumentRepo for SqliteRegionDocuments {
    async fn get_region_config(&self) -> Result<Option<StoredRegionConfig>, RepoError> {
        self.get_document("get_region_config", REGION_CONFIG_KEY)
            .await
    }

    async fn save_region_config(&self, config: &StoredRegionConfig) -> Result<(), RepoError> {
        self.save_document("save_region_config", REGION_CONFIG_KEY, config)
            .await
    }

    async fn get_city_mappings(&self) -> Result<Option<StoredCityMappings>, RepoError> {
        self.get_document("get_city_mappings", CITY_MAPPINGS_KEY)
            .await
    }

    async fn save_city_mappings(&self, mappings: &StoredCityMappings) -> Result<(), RepoError> {
        self.save_document("save_city_mappings", CITY_MAPPINGS_KEY, mappings)
            .await
    }
}
