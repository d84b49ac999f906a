//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::BackofficeClient;
use crate::config::AdminConfig;
use crate::services::FileStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the remote service client, and local file storage.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    api: BackofficeClient,
    files: FileStore,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let api = BackofficeClient::new(&config);
        let files = FileStore::new(config.public_dir.clone());
        Self {
            inner: Arc::new(AppStateInner { config, api, files }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the remote service client.
    #[must_use]
    pub fn api(&self) -> &BackofficeClient {
        &self.inner.api
    }

    /// Get a reference to the local file storage.
    #[must_use]
    pub fn files(&self) -> &FileStore {
        &self.inner.files
    }
}
