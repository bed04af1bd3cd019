//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::content::{ContentError, ContentStore};
use crate::services::AuthService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Everything behind it is
/// read-only after startup; per-visitor state lives in the session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    content: ContentStore,
    auth: AuthService,
}

impl AppState {
    /// Create a new application state with the built-in catalog and the
    /// markdown content found under `config.content_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the content directory cannot be read.
    pub fn new(config: StorefrontConfig) -> Result<Self, ContentError> {
        let content = ContentStore::load(&config.content_dir)?;
        Ok(Self::with_parts(config, Catalog::fixtures(), content))
    }

    /// Assemble state from already-built parts.
    #[must_use]
    pub fn with_parts(config: StorefrontConfig, catalog: Catalog, content: ContentStore) -> Self {
        let auth = AuthService::new(config.auth_latency);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                content,
                auth,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the loaded blog posts and pages.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Get the mock authentication service.
    #[must_use]
    pub fn auth(&self) -> AuthService {
        self.inner.auth
    }
}
