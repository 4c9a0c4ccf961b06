//! Region map engine library.
//!
//! Server side of the region configuration: document storage, the region
//! store use case and its HTTP surface.
//!
//! ## Structure
//!
//! - `use_cases/` - Region store operations returning response envelopes
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition
//! - `config` - Environment configuration

pub mod api;
pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use config::EngineConfig;
pub use infrastructure::memory::InMemoryRegionDocuments;
pub use use_cases::{RegionStore, RegionStoreError};
