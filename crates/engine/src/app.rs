//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::RegionDocumentRepo;
use crate::use_cases::RegionStore;

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub regions: Arc<RegionStore>,
}

impl App {
    pub fn new(documents: Arc<dyn RegionDocumentRepo>) -> Self {
        Self {
            use_cases: UseCases {
                regions: Arc::new(RegionStore::new(documents)),
            },
        }
    }
}
