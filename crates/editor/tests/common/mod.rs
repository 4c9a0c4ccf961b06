//! Shared fixtures: the real region store behind the editor's port.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;

use regionmap_editor::{RegionStorePort, StoreError};
use regionmap_engine::{InMemoryRegionDocuments, RegionStore};
use regionmap_shared::{
    RegionAccessPolicyResponse, RegionMappingsResponse, RegionsResponse, SetRegionMappingsRequest,
    SetRegionsRequest, WriteResponse,
};

/// Calls the engine's region store in-process.
pub struct EngineBackedStore {
    pub store: Arc<RegionStore>,
}

impl EngineBackedStore {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RegionStore::new(Arc::new(InMemoryRegionDocuments::new()))),
        }
    }

    /// Another client sharing the same backing store.
    pub fn sibling(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

#[async_trait]
impl RegionStorePort for EngineBackedStore {
    async fn get_regions(&self) -> Result<RegionsResponse, StoreError> {
        Ok(self.store.get_regions().await)
    }

    async fn set_regions(&self, request: SetRegionsRequest) -> Result<WriteResponse, StoreError> {
        Ok(self.store.set_regions(request).await)
    }

    async fn get_region_mappings(&self) -> Result<RegionMappingsResponse, StoreError> {
        Ok(self.store.get_region_mappings().await)
    }

    async fn set_region_mappings(
        &self,
        request: SetRegionMappingsRequest,
    ) -> Result<WriteResponse, StoreError> {
        Ok(self.store.set_region_mappings(request).await)
    }

    async fn get_region_access_policy(&self) -> Result<RegionAccessPolicyResponse, StoreError> {
        Ok(self.store.get_region_access_policy().await)
    }
}

/// Replaces the stored region list between a client's regions write and its
/// mappings write, the way a second admin saving at the same moment would.
pub struct InterleavedRegionsStore {
    pub inner: EngineBackedStore,
    pub regions_written_meanwhile: Vec<String>,
}

#[async_trait]
impl RegionStorePort for InterleavedRegionsStore {
    async fn get_regions(&self) -> Result<RegionsResponse, StoreError> {
        self.inner.get_regions().await
    }

    async fn set_regions(&self, request: SetRegionsRequest) -> Result<WriteResponse, StoreError> {
        self.inner.set_regions(request).await
    }

    async fn get_region_mappings(&self) -> Result<RegionMappingsResponse, StoreError> {
        self.inner.get_region_mappings().await
    }

    async fn set_region_mappings(
        &self,
        request: SetRegionMappingsRequest,
    ) -> Result<WriteResponse, StoreError> {
        let meanwhile = SetRegionsRequest {
            regions: self.regions_written_meanwhile.clone(),
        };
        self.inner.set_regions(meanwhile).await?;
        self.inner.set_region_mappings(request).await
    }

    async fn get_region_access_policy(&self) -> Result<RegionAccessPolicyResponse, StoreError> {
        self.inner.get_region_access_policy().await
    }
}
