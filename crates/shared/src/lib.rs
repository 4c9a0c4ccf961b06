//! Region map wire types shared by the engine and the editor
//!
//! Request bodies and response envelopes for the region store. Every field is a
//! plain string or list so either side can evolve its domain types without a
//! wire break; validation happens when a DTO is converted into a domain value.

pub mod requests;
pub mod responses;

pub use requests::{CityData, SetRegionMappingsRequest, SetRegionsRequest};
pub use responses::{
    Envelope, RegionAccessPolicyResponse, RegionMappingsResponse, RegionsResponse,
    ResolveCityResponse, WriteResponse,
};
