//! In-memory region document storage.
//!
//! Same contract as the SQLite adapter without a database file. Selected when
//! `REGIONMAP_DB_PATH` is `:memory:`, and by tests that exercise the full store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{
    RegionDocumentRepo, RepoError, StoredCityMappings, StoredRegionConfig,
};

#[derive(Default)]
pub struct InMemoryRegionDocuments {
    region_config: RwLock<Option<StoredRegionConfig>>,
    city_mappings: RwLock<Option<StoredCityMappings>>,
}

impl InMemoryRegionDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing documents.
    pub fn with_documents(
        region_config: Option<StoredRegionConfig>,
        city_mappings: Option<StoredCityMappings>,
    ) -> Self {
        Self {
            region_config: RwLock::new(region_config),
            city_mappings: RwLock::new(city_mappings),
        }
    }
}

#[async_trait]
impl RegionDocumentRepo for InMemoryRegionDocuments {
    async fn get_region_config(&self) -> Result<Option<StoredRegionConfig>, RepoError> {
        Ok(self.region_config.read().await.clone())
    }

    async fn save_region_config(&self, config: &StoredRegionConfig) -> Result<(), RepoError> {
        *self.region_config.write().await = Some(config.clone());
        Ok(())
    }

    async fn get_city_mappings(&self) -> Result<Option<StoredCityMappings>, RepoError> {
        Ok(self.city_mappings.read().await.clone())
    }

    async fn save_city_mappings(&self, mappings: &StoredCityMappings) -> Result<(), RepoError> {
        *self.city_mappings.write().await = Some(mappings.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regionmap_domain::PolicyMode;

    #[tokio::test]
    async fn documents_are_independent() {
        let repo = InMemoryRegionDocuments::with_documents(
            Some(StoredRegionConfig {
                regions: vec!["Unknown".into()],
                mode: PolicyMode::Strict,
            }),
            None,
        );

        repo.save_city_mappings(&StoredCityMappings::default())
            .await
            .unwrap();

        let config = repo.get_region_config().await.unwrap().unwrap();
        assert_eq!(config.mode, PolicyMode::Strict);
        assert_eq!(
            repo.get_city_mappings().await.unwrap(),
            Some(StoredCityMappings::default())
        );
    }
}
