//! Load and save a region edit session through the region store
//!
//! Save writes regions first, then mappings. The two writes are not atomic: if
//! the mappings write fails after the regions write succeeded, the store keeps
//! the new regions with the old mappings and the caller gets
//! [`SaveError::PartialSave`].

use regionmap_domain::{
    reference_cities, CityCatalog, CityMapping, CitySlug, PolicyMode, RegionConfiguration,
    RegionList, RegionName,
};
use regionmap_shared::{CityData, Envelope, SetRegionMappingsRequest, SetRegionsRequest};

use crate::application::session::RegionEditSession;
use crate::ports::{RegionStorePort, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The store answered with `success: false`
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    /// Nothing was written
    #[error("Error saving regions: {0}")]
    Regions(String),
    /// Regions were written, mappings were not
    #[error("Partial save: regions were saved but city mappings were not ({0})")]
    PartialSave(String),
}

/// Fetch regions and mappings concurrently and build a clean session.
///
/// Stored entries that fail validation are skipped with a warning. The
/// reference city list is merged into the catalog; stored labels win.
pub async fn load(store: &dyn RegionStorePort) -> Result<RegionEditSession, LoadError> {
    let (regions, mappings) = tokio::join!(store.get_regions(), store.get_region_mappings());

    let regions = regions?;
    if let Some(message) = regions.failure_message() {
        return Err(LoadError::Rejected(message));
    }
    let mappings = mappings?;
    if let Some(message) = mappings.failure_message() {
        return Err(LoadError::Rejected(message));
    }

    let region_list = RegionList::from_stored(&regions.regions);

    let mapping: CityMapping = mappings
        .mappings
        .into_iter()
        .filter_map(|(city, region)| match (CitySlug::new(&city), RegionName::new(&region)) {
            (Ok(city), Ok(region)) => Some((city, region)),
            _ => {
                tracing::warn!(%city, %region, "Skipping malformed city mapping");
                None
            }
        })
        .collect();

    let mut catalog: CityCatalog = mappings
        .cities
        .into_iter()
        .filter_map(|data| match data.clone().into_city() {
            Ok(city) => Some(city),
            Err(e) => {
                tracing::warn!(label = %data.label, value = %data.value, error = %e, "Skipping malformed city");
                None
            }
        })
        .collect();
    catalog.merge_reference(reference_cities());

    tracing::info!(
        regions = region_list.len(),
        mapped = mapping.len(),
        cities = catalog.len(),
        mode = %regions.mode,
        "Loaded region configuration"
    );

    Ok(RegionEditSession::new(
        RegionConfiguration::new(region_list, mapping, catalog),
        regions.mode,
    ))
}

/// Fetch the downstream policy mode on its own.
pub async fn load_access_policy(store: &dyn RegionStorePort) -> Result<PolicyMode, LoadError> {
    let response = store.get_region_access_policy().await?;
    if let Some(message) = response.failure_message() {
        return Err(LoadError::Rejected(message));
    }
    Ok(response.mode)
}

/// Persist a session: regions, then mappings plus the full city catalog.
///
/// The mappings write is skipped when the regions write fails.
pub async fn save(store: &dyn RegionStorePort, session: &RegionEditSession) -> Result<(), SaveError> {
    let config = session.configuration();

    let regions = SetRegionsRequest {
        regions: config.regions().to_strings(),
    };
    let response = store
        .set_regions(regions)
        .await
        .map_err(|e| SaveError::Regions(e.to_string()))?;
    if let Some(message) = response.failure_message() {
        return Err(SaveError::Regions(message));
    }

    let catalog = config.catalog_for_save();
    let mappings = SetRegionMappingsRequest {
        mappings: config.mappings().to_string_map(),
        cities: catalog.sorted_by_label().into_iter().map(CityData::from).collect(),
    };
    let response = store
        .set_region_mappings(mappings)
        .await
        .map_err(|e| SaveError::PartialSave(e.to_string()))?;
    if let Some(message) = response.failure_message() {
        tracing::warn!(error = %message, "Regions saved but mappings were rejected");
        return Err(SaveError::PartialSave(message));
    }

    tracing::info!(
        regions = config.regions().len(),
        mapped = config.mappings().len(),
        cities = catalog.len(),
        "Saved region configuration"
    );
    Ok(())
}
