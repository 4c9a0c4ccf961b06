//! Request bodies accepted by the region store.

mod region;

pub use region::{CityData, SetRegionMappingsRequest, SetRegionsRequest};
