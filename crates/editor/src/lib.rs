//! Region map editor
//!
//! Client side of the region configuration: a pure edit session, views derived
//! from it, and a controller that loads and saves through [`RegionStorePort`].
//! [`HttpRegionStore`] is the production adapter for the port.

pub mod application;
pub mod infrastructure;
pub mod ports;

pub use application::{
    EditRejection, Notice, NoticeKind, RegionConfigEditor, RegionEdit, RegionEditSession,
};
pub use infrastructure::{EditorConfig, HttpRegionStore};
pub use ports::{RegionStorePort, StoreError};
