//! Editor port definitions.

mod region_store_port;

pub use region_store_port::{RegionStorePort, StoreError};

#[cfg(test)]
pub use region_store_port::MockRegionStorePort;
