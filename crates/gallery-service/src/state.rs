//! Application state.

use std::sync::Arc;

use gallery_store::Store;

use crate::config::ServiceConfig;
use crate::services::{CatalogService, OrderService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<dyn Store>,

    /// Service configuration.
    pub config: ServiceConfig,

    /// Painting catalog.
    pub catalog: CatalogService,

    /// Order workflows.
    pub orders: OrderService,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        Self {
            catalog: CatalogService::new(Arc::clone(&store)),
            orders: OrderService::new(Arc::clone(&store)),
            store,
            config,
        }
    }
}
