//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use sb_core::{ObjectStore, ServerSettings};

/// Application state shared across handlers
///
/// Immutable after startup; the object store is the only shared resource.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ObjectStore>,
    pub presign_expiry: Duration,
    pub delete_concurrency: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn ObjectStore>, settings: &ServerSettings) -> Self {
        Self {
            store,
            presign_expiry: settings.presign_expiry(),
            delete_concurrency: settings.delete_concurrency,
        }
    }
}
