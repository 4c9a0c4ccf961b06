//! Port traits at the engine's infrastructure boundary.
//!
//! Two seams: the region document store (SQLite or in-memory) and the clock
//! that stamps document writes.

mod error;
mod repos;
mod testing;
pub mod types;

pub use error::RepoError;
pub use repos::RegionDocumentRepo;
pub use testing::ClockPort;
pub use types::{
    StoredCity, StoredCityMappings, StoredRegionConfig, CITY_MAPPINGS_KEY, REGION_CONFIG_KEY,
};

#[cfg(test)]
pub use repos::MockRegionDocumentRepo;
#[cfg(test)]
pub use testing::MockClockPort;
