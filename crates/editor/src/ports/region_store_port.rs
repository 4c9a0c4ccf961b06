//! Region Store Port - the editor's view of the server-side region store
//!
//! Adapters return the response envelope as sent. A `success: false` envelope is
//! still `Ok`; `StoreError` is reserved for calls that never produced one.

use async_trait::async_trait;

use regionmap_shared::{
    RegionAccessPolicyResponse, RegionMappingsResponse, RegionsResponse, SetRegionMappingsRequest,
    SetRegionsRequest, WriteResponse,
};

/// Transport-level failures talking to the region store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Store returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegionStorePort: Send + Sync {
    async fn get_regions(&self) -> Result<RegionsResponse, StoreError>;

    async fn set_regions(&self, request: SetRegionsRequest) -> Result<WriteResponse, StoreError>;

    async fn get_region_mappings(&self) -> Result<RegionMappingsResponse, StoreError>;

    async fn set_region_mappings(
        &self,
        request: SetRegionMappingsRequest,
    ) -> Result<WriteResponse, StoreError>;

    async fn get_region_access_policy(&self) -> Result<RegionAccessPolicyResponse, StoreError>;
}
