//! Region configuration domain events
//!
//! These enums communicate what happened when the region configuration was
//! modified, allowing callers to react appropriately (log, mark dirty, notify).

use crate::value_objects::{CitySlug, RegionName};

/// Outcome of renaming a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionRenameOutcome {
    /// The new name equals the old one
    Unchanged,
    /// Region renamed; `remapped` cities now point at the new name
    Renamed {
        from: RegionName,
        to: RegionName,
        remapped: usize,
    },
}

/// A region that was removed along with the cities it released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRemoved {
    pub name: RegionName,
    /// Cities that pointed at the region and are now unmapped
    pub unmapped: Vec<CitySlug>,
}

/// Outcome of assigning a single city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityAssignment {
    Assigned {
        city: CitySlug,
        from: Option<RegionName>,
        to: RegionName,
    },
    Unmapped {
        city: CitySlug,
        from: RegionName,
    },
    /// The city already had the requested target
    Unchanged { city: CitySlug },
}

impl CityAssignment {
    pub fn is_change(&self) -> bool {
        !matches!(self, CityAssignment::Unchanged { .. })
    }
}
