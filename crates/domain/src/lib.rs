//! Region configuration domain: region names, city slugs, mappings and the
//! reference city catalog.
//!
//! Pure and synchronous. No I/O, no framework types.

pub mod aggregates;
pub mod error;
pub mod events;
pub mod reference;
pub mod value_objects;

pub use aggregates::{
    sort_cities_by_label, CityCatalog, CityMapping, RegionConfiguration, RegionList,
};
pub use error::DomainError;
pub use events::{CityAssignment, RegionRemoved, RegionRenameOutcome};
pub use reference::{reference_cities, reference_city, resolve_city};
pub use value_objects::{
    slugify, City, CitySlug, MapTarget, PolicyMode, RegionName, RESERVED_CITY_SLUG,
    UNKNOWN_REGION, UNKNOWN_REGION_LABEL, UNMAPPED_TARGET,
};
