// Application state module
// Shared by every connection for the lifetime of the process

use super::types::Config;
use crate::store::BlobStore;

/// Application state
pub struct AppState {
    pub config: Config,

    /// The JSON blob pushed through the data route
    pub blob: BlobStore,
}

impl AppState {
    /// Create `AppState` holding an empty blob
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            blob: BlobStore::new(),
        }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
