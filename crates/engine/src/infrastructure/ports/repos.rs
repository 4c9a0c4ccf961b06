//! Repository port traits for document storage.

use async_trait::async_trait;

use super::error::RepoError;
use super::types::{StoredCityMappings, StoredRegionConfig};

// =============================================================================
// Region Documents
// =============================================================================

/// Whole-document storage for the region configuration.
///
/// Each document is read and replaced as a unit; last writer wins.
/// `Ok(None)` means the document has never been written.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegionDocumentRepo: Send + Sync {
    async fn get_region_config(&self) -> Result<Option<StoredRegionConfig>, RepoError>;
    async fn save_region_config(&self, config: &StoredRegionConfig) -> Result<(), RepoError>;
    async fn get_city_mappings(&self) -> Result<Option<StoredCityMappings>, RepoError>;
    async fn save_city_mappings(&self, mappings: &StoredCityMappings) -> Result<(), RepoError>;
}
