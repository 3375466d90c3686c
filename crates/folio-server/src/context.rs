//! Application context shared by all request handlers.
//!
//! [`AppContext`] is constructed once at startup (or once per test) and
//! handed to Axum as router state. It only holds `Arc`s, so cloning it per
//! request is cheap.

use std::sync::Arc;

use folio_core::config::Config;
use folio_store::{AssetStorage, ContentService, ContentStore};

/// Application context shared by all request handlers (via Axum state).
#[derive(Clone)]
pub struct AppContext {
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
    /// Content records and their assets.
    pub content: Arc<ContentService>,
}

impl AppContext {
    /// Build a fresh context with an empty record store rooted at the
    /// configured upload directory.
    pub fn new(config: Config) -> Self {
        let assets = AssetStorage::new(config.storage.upload_dir.clone());
        let content = ContentService::new(ContentStore::new(), assets);
        Self {
            config: Arc::new(config),
            content: Arc::new(content),
        }
    }
}
