//! Value objects - Immutable objects defined by their attributes

mod city;
mod region;

pub use city::{slugify, City, CitySlug, RESERVED_CITY_SLUG};
pub use region::{
    MapTarget, PolicyMode, RegionName, UNKNOWN_REGION, UNKNOWN_REGION_LABEL, UNMAPPED_TARGET,
};
