//! Region value objects
//!
//! Regions are administrative groupings used to route participants and consent
//! candidates by geography. The `Unknown` region is a sentinel: it always exists,
//! cannot be renamed or deleted, and is what an unmapped city resolves to.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Stored name of the sentinel region.
pub const UNKNOWN_REGION: &str = "Unknown";

/// Label shown to admins for the sentinel region.
pub const UNKNOWN_REGION_LABEL: &str = "Not assigned region";

/// Value used by pickers to request that a city be unmapped.
pub const UNMAPPED_TARGET: &str = "unmapped";

/// Maximum length for a region name
const MAX_REGION_NAME_LENGTH: usize = 100;

// ============================================================================
// RegionName
// ============================================================================

/// A validated region name (non-empty, <=100 chars, trimmed).
///
/// Comparison is exact and case-sensitive: `"GTA"` and `"gta"` are distinct regions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionName(String);

impl RegionName {
    /// Create a new validated region name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 100 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Region name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_REGION_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Region name cannot exceed {} characters",
                MAX_REGION_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The sentinel region every unmapped city resolves to.
    pub fn unknown() -> Self {
        Self(UNKNOWN_REGION.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_REGION
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name as shown in admin screens.
    pub fn display_label(&self) -> &str {
        if self.is_unknown() {
            UNKNOWN_REGION_LABEL
        } else {
            &self.0
        }
    }
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RegionName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RegionName> for String {
    fn from(name: RegionName) -> String {
        name.0
    }
}

impl PartialEq<str> for RegionName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RegionName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ============================================================================
// MapTarget
// ============================================================================

/// Destination of a city assignment: a concrete region, or no region at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapTarget {
    Region(RegionName),
    Unmapped,
}

impl MapTarget {
    pub fn region(&self) -> Option<&RegionName> {
        match self {
            MapTarget::Region(name) => Some(name),
            MapTarget::Unmapped => None,
        }
    }
}

impl std::str::FromStr for MapTarget {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == UNMAPPED_TARGET {
            return Ok(MapTarget::Unmapped);
        }
        RegionName::new(s).map(MapTarget::Region)
    }
}

impl From<RegionName> for MapTarget {
    fn from(name: RegionName) -> Self {
        MapTarget::Region(name)
    }
}

impl fmt::Display for MapTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapTarget::Region(name) => write!(f, "{}", name),
            MapTarget::Unmapped => write!(f, "{}", UNMAPPED_TARGET),
        }
    }
}

// ============================================================================
// PolicyMode
// ============================================================================

/// How strictly unmapped cities are treated by downstream consumers.
///
/// Read-only from the region configuration's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyMode {
    #[default]
    Legacy,
    Strict,
}

impl fmt::Display for PolicyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyMode::Legacy => write!(f, "legacy"),
            PolicyMode::Strict => write!(f, "strict"),
        }
    }
}

impl std::str::FromStr for PolicyMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" | "" => Ok(PolicyMode::Legacy),
            "strict" => Ok(PolicyMode::Strict),
            _ => Err(DomainError::parse(format!("Invalid policy mode: {}", s))),
        }
    }
}
