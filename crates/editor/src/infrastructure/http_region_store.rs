//! HTTP client for the engine's region store routes.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use url::Url;

use regionmap_shared::{
    RegionAccessPolicyResponse, RegionMappingsResponse, RegionsResponse, SetRegionMappingsRequest,
    SetRegionsRequest, WriteResponse,
};

use crate::infrastructure::config::EditorConfig;
use crate::ports::{RegionStorePort, StoreError};

#[derive(Clone)]
pub struct HttpRegionStore {
    client: Client,
    base_url: Url,
}

impl HttpRegionStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        // Joined paths are relative, so the base must end in '/'.
        let base = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base_url = Url::parse(&base).map_err(|e| StoreError::InvalidUrl(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &EditorConfig) -> Result<Self, StoreError> {
        Self::new(
            &config.api_url,
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    /// Create client from environment variables.
    pub fn from_env() -> Result<Self, StoreError> {
        Self::from_config(&EditorConfig::from_env())
    }

    fn url(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(path)
            .map_err(|e| StoreError::InvalidUrl(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
        let response = self
            .client
            .get(self.url(path)?)
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;
        read_json(response).await
    }

    async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .client
            .put(self.url(path)?)
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;
        return Err(StoreError::Status {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json()
        .await
        .map_err(|e| StoreError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl RegionStorePort for HttpRegionStore {
    async fn get_regions(&self) -> Result<RegionsResponse, StoreError> {
        tracing::debug!("GET regions");
        self.get_json("api/regions").await
    }

    async fn set_regions(&self, request: SetRegionsRequest) -> Result<WriteResponse, StoreError> {
        tracing::debug!(count = request.regions.len(), "PUT regions");
        self.put_json("api/regions", &request).await
    }

    async fn get_region_mappings(&self) -> Result<RegionMappingsResponse, StoreError> {
        tracing::debug!("GET region mappings");
        self.get_json("api/region-mappings").await
    }

    async fn set_region_mappings(
        &self,
        request: SetRegionMappingsRequest,
    ) -> Result<WriteResponse, StoreError> {
        tracing::debug!(
            mappings = request.mappings.len(),
            cities = request.cities.len(),
            "PUT region mappings"
        );
        self.put_json("api/region-mappings", &request).await
    }

    async fn get_region_access_policy(&self) -> Result<RegionAccessPolicyResponse, StoreError> {
        self.get_json("api/region-access-policy").await
    }
}
