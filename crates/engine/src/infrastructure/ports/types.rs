//! Stored document shapes.
//!
//! These mirror what is persisted, not the domain types: documents written by
//! older clients may carry blank names or stale regions, so reads go through
//! the lenient domain constructors and writes through the strict ones.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use regionmap_domain::{City, PolicyMode};

/// Document key of the ordered region list and policy mode.
pub const REGION_CONFIG_KEY: &str = "region_config";

/// Document key of the city mapping and city catalog.
pub const CITY_MAPPINGS_KEY: &str = "city_region_mappings";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRegionConfig {
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub mode: PolicyMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCityMappings {
    /// City slug -> region name
    #[serde(default)]
    pub mappings: BTreeMap<String, String>,
    #[serde(default)]
    pub cities: Vec<StoredCity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCity {
    pub label: String,
    pub value: String,
}

impl From<&City> for StoredCity {
    fn from(city: &City) -> Self {
        Self {
            label: city.label().to_string(),
            value: city.value().as_str().to_string(),
        }
    }
}
