//! Aggregates - domain objects that own their related data
//!
//! Each aggregate exposes behavior through methods, never public fields, and
//! reports what a mutation did by returning an outcome from `events`.

pub mod city_catalog;
pub mod city_mapping;
pub mod region_configuration;
pub mod region_list;

pub use city_catalog::{sort_cities_by_label, CityCatalog};
pub use city_mapping::CityMapping;
pub use region_configuration::RegionConfiguration;
pub use region_list::RegionList;
