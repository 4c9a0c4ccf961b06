//! Adapters for the editor's ports.

pub mod config;
pub mod http_region_store;

pub use config::EditorConfig;
pub use http_region_store::HttpRegionStore;
