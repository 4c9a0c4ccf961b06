//! Response envelopes
//!
//! Every region store call answers `{ success, error?, ...data }`. Failures are
//! carried as data: `success: false` plus a human-readable `error`, with the data
//! fields at their defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use regionmap_domain::{PolicyMode, UNKNOWN_REGION};

use crate::requests::CityData;

/// Common view over every envelope.
pub trait Envelope {
    fn success(&self) -> bool;
    fn error(&self) -> Option<&str>;

    /// The error message of a failed envelope, with a fallback when none was sent.
    fn failure_message(&self) -> Option<String> {
        if self.success() {
            return None;
        }
        Some(
            self.error()
                .filter(|e| !e.trim().is_empty())
                .unwrap_or("Request failed")
                .to_string(),
        )
    }
}

macro_rules! impl_envelope {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Envelope for $ty {
                fn success(&self) -> bool {
                    self.success
                }

                fn error(&self) -> Option<&str> {
                    self.error.as_deref()
                }
            }
        )+
    };
}

fn default_regions() -> Vec<String> {
    vec![UNKNOWN_REGION.to_string()]
}

// =============================================================================
// Writes
// =============================================================================

/// Result of `setRegions` and `setRegionMappings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WriteResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

// =============================================================================
// Reads
// =============================================================================

/// Result of `getRegions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionsResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub mode: PolicyMode,
    #[serde(default = "default_regions")]
    pub regions: Vec<String>,
}

impl RegionsResponse {
    pub fn ok(mode: PolicyMode, regions: Vec<String>) -> Self {
        Self {
            success: true,
            error: None,
            mode,
            regions,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            mode: PolicyMode::default(),
            regions: default_regions(),
        }
    }
}

/// Result of `getRegionMappings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionMappingsResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub mappings: BTreeMap<String, String>,
    #[serde(default)]
    pub cities: Vec<CityData>,
    #[serde(default = "default_regions")]
    pub regions: Vec<String>,
}

impl RegionMappingsResponse {
    pub fn ok(
        mappings: BTreeMap<String, String>,
        cities: Vec<CityData>,
        regions: Vec<String>,
    ) -> Self {
        Self {
            success: true,
            error: None,
            mappings,
            cities,
            regions,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            mappings: BTreeMap::new(),
            cities: Vec::new(),
            regions: default_regions(),
        }
    }
}

/// Result of `getRegionAccessPolicy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionAccessPolicyResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub mode: PolicyMode,
}

impl RegionAccessPolicyResponse {
    pub fn ok(mode: PolicyMode) -> Self {
        Self {
            success: true,
            error: None,
            mode,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            mode: PolicyMode::default(),
        }
    }
}

/// Result of resolving one city to its region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveCityResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Slug the lookup was made with
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub region: String,
}

impl ResolveCityResponse {
    pub fn ok(city: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            success: true,
            error: None,
            city: city.into(),
            region: region.into(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            city: String::new(),
            region: UNKNOWN_REGION.to_string(),
        }
    }
}

impl_envelope!(
    WriteResponse,
    RegionsResponse,
    RegionMappingsResponse,
    RegionAccessPolicyResponse,
    ResolveCityResponse,
);
