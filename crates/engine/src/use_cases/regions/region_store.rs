//! Region store - persistence boundary for the region list and city mapping.
//!
//! Every public operation answers with a response envelope. Storage failures and
//! rejected writes are reported as `success: false` plus a message, never as a
//! panic or a transport error.
//!
//! Reads are lenient: malformed stored entries are skipped with a warning and a
//! missing `Unknown` region is restored. Writes are strict and all-or-nothing.

use std::sync::Arc;

use regionmap_domain::{
    slugify, City, CityCatalog, CityMapping, CitySlug, DomainError, MapTarget, PolicyMode,
    RegionList, RegionName,
};
use regionmap_shared::{
    CityData, RegionAccessPolicyResponse, RegionMappingsResponse, RegionsResponse,
    ResolveCityResponse, SetRegionMappingsRequest, SetRegionsRequest, WriteResponse,
};

use crate::infrastructure::ports::{
    RegionDocumentRepo, RepoError, StoredCity, StoredCityMappings, StoredRegionConfig,
};

/// Errors that can occur during region store operations.
#[derive(Debug, thiserror::Error)]
pub enum RegionStoreError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error("{}", .0.message())]
    Invalid(#[from] DomainError),
    #[error("Mappings reference regions that do not exist: {}", .0.join(", "))]
    UndefinedRegions(Vec<String>),
    #[error("City is required")]
    MissingCity,
}

impl RegionStoreError {
    /// The request was refused; storage itself is fine.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Repo(_))
    }
}

pub struct RegionStore {
    repo: Arc<dyn RegionDocumentRepo>,
}

impl RegionStore {
    pub fn new(repo: Arc<dyn RegionDocumentRepo>) -> Self {
        Self { repo }
    }

    // =========================================================================
    // Regions
    // =========================================================================

    /// Ordered region list and policy mode. `["Unknown"]` / legacy when unconfigured.
    pub async fn get_regions(&self) -> RegionsResponse {
        match self.load_region_config().await {
            Ok((mode, regions)) => RegionsResponse::ok(mode, regions.to_strings()),
            Err(e) => {
                log_failure("get_regions", &e);
                RegionsResponse::failed(e.to_string())
            }
        }
    }

    /// Replace the whole region list, keeping the stored policy mode.
    pub async fn set_regions(&self, request: SetRegionsRequest) -> WriteResponse {
        match self.replace_regions(request.regions).await {
            Ok(regions) => {
                tracing::info!(count = regions.len(), "Saved region list");
                WriteResponse::ok()
            }
            Err(e) => {
                log_failure("set_regions", &e);
                WriteResponse::failed(e.to_string())
            }
        }
    }

    pub async fn get_region_access_policy(&self) -> RegionAccessPolicyResponse {
        match self.load_region_config().await {
            Ok((mode, _)) => RegionAccessPolicyResponse::ok(mode),
            Err(e) => {
                log_failure("get_region_access_policy", &e);
                RegionAccessPolicyResponse::failed(e.to_string())
            }
        }
    }

    // =========================================================================
    // Mappings
    // =========================================================================

    /// Current mapping, city catalog (sorted by label) and region list.
    pub async fn get_region_mappings(&self) -> RegionMappingsResponse {
        let loaded = async {
            let (_, regions) = self.load_region_config().await?;
            let (mappings, cities) = self.load_city_mappings().await?;
            Ok::<_, RegionStoreError>((regions, mappings, cities))
        };

        match loaded.await {
            Ok((regions, mappings, cities)) => RegionMappingsResponse::ok(
                mappings.to_string_map(),
                cities
                    .sorted_by_label()
                    .into_iter()
                    .map(CityData::from)
                    .collect(),
                regions.to_strings(),
            ),
            Err(e) => {
                log_failure("get_region_mappings", &e);
                RegionMappingsResponse::failed(e.to_string())
            }
        }
    }

    /// Replace the mapping and catalog after checking them against the region
    /// list as it is stored right now.
    pub async fn set_region_mappings(&self, request: SetRegionMappingsRequest) -> WriteResponse {
        match self.replace_mappings(request).await {
            Ok((mapped, cities)) => {
                tracing::info!(mapped, cities, "Saved city region mappings");
                WriteResponse::ok()
            }
            Err(e) => {
                log_failure("set_region_mappings", &e);
                WriteResponse::failed(e.to_string())
            }
        }
    }

    /// Region a city routes to. Falls back to `Unknown` when the city is unmapped
    /// or mapped to a region that no longer exists.
    pub async fn resolve_city_region(&self, city: &str) -> ResolveCityResponse {
        match self.resolve(city).await {
            Ok((slug, region)) => ResolveCityResponse::ok(slug, region.as_str()),
            Err(e) => {
                log_failure("resolve_city_region", &e);
                ResolveCityResponse::failed(e.to_string())
            }
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn load_region_config(&self) -> Result<(PolicyMode, RegionList), RegionStoreError> {
        let stored = self.repo.get_region_config().await?.unwrap_or_default();
        Ok((stored.mode, RegionList::from_stored(&stored.regions)))
    }

    async fn load_city_mappings(&self) -> Result<(CityMapping, CityCatalog), RegionStoreError> {
        let stored = self.repo.get_city_mappings().await?.unwrap_or_default();

        let mappings: CityMapping = stored
            .mappings
            .into_iter()
            .filter_map(|(city, region)| {
                match (CitySlug::new(city.as_str()), RegionName::new(region)) {
                    (Ok(city), Ok(region)) => Some((city, region)),
                    _ => {
                        tracing::warn!(city = %city, "Skipping malformed stored mapping");
                        None
                    }
                }
            })
            .collect();

        let cities: CityCatalog = stored
            .cities
            .into_iter()
            .filter_map(|city| match City::new(city.label, city.value.as_str()) {
                Ok(city) => Some(city),
                Err(e) => {
                    tracing::warn!(value = %city.value, error = %e, "Skipping malformed stored city");
                    None
                }
            })
            .collect();

        Ok((mappings, cities))
    }

    async fn replace_regions(&self, raw: Vec<String>) -> Result<RegionList, RegionStoreError> {
        let names = raw
            .iter()
            .map(|name| RegionName::new(name.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let regions = RegionList::new(names)?;

        let mode = self
            .repo
            .get_region_config()
            .await?
            .map(|stored| stored.mode)
            .unwrap_or_default();

        self.repo
            .save_region_config(&StoredRegionConfig {
                regions: regions.to_strings(),
                mode,
            })
            .await?;
        Ok(regions)
    }

    async fn replace_mappings(
        &self,
        request: SetRegionMappingsRequest,
    ) -> Result<(usize, usize), RegionStoreError> {
        let mut mappings = CityMapping::new();
        for (city, region) in request.mappings {
            let city = CitySlug::new(city)?;
            let region = RegionName::new(region)?;
            mappings.assign(city, MapTarget::Region(region));
        }

        let mut catalog = CityCatalog::new();
        for city in request.cities {
            catalog.insert(city.into_city()?)?;
        }

        // Checked against a fresh read, not the list the client loaded.
        let (_, regions) = self.load_region_config().await?;
        let undefined = mappings.undefined_regions(&regions);
        if !undefined.is_empty() {
            return Err(RegionStoreError::UndefinedRegions(
                undefined.into_iter().map(String::from).collect(),
            ));
        }

        let document = StoredCityMappings {
            mappings: mappings.to_string_map(),
            cities: catalog
                .sorted_by_label()
                .into_iter()
                .map(StoredCity::from)
                .collect(),
        };
        self.repo.save_city_mappings(&document).await?;
        Ok((mappings.len(), catalog.len()))
    }

    async fn resolve(&self, city: &str) -> Result<(String, RegionName), RegionStoreError> {
        let slug = slugify(city);
        if slug.is_empty() {
            return Err(RegionStoreError::MissingCity);
        }
        let (_, regions) = self.load_region_config().await?;
        let (mappings, _) = self.load_city_mappings().await?;
        let region = mappings.resolve(&slug, &regions);
        Ok((slug, region))
    }
}

fn log_failure(operation: &'static str, error: &RegionStoreError) {
    if error.is_rejection() {
        tracing::warn!(operation, error = %error, "Region store rejected request");
    } else {
        tracing::error!(operation, error = %error, "Region store storage failure");
    }
}
