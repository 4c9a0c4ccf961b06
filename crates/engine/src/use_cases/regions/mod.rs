//! Region configuration use cases.

mod region_store;

pub use region_store::{RegionStore, RegionStoreError};
