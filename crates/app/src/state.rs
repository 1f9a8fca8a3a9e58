//! Shared client state.

use std::sync::Arc;

use pawcart_core::IdGenerator;

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::http::{HttpClient, HttpError};
use crate::services::{DogImageClient, HttpEcho};
use crate::store::StoreHandle;
use crate::submission::PetSubmission;

/// The add-pet workflow wired to the configured HTTP services.
pub type HttpPetSubmission = PetSubmission<DogImageClient, HttpEcho>;

/// Shared client state.
///
/// Cheap to clone; every clone sees the same store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    http: HttpClient,
    store: StoreHandle,
    ids: Arc<IdGenerator>,
}

impl AppState {
    /// Create state with an empty store.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: AppConfig) -> Result<Self, HttpError> {
        let http = HttpClient::new(config.http_timeout)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                http,
                store: StoreHandle::new(),
                ids: Arc::new(IdGenerator::new()),
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn http(&self) -> &HttpClient {
        &self.inner.http
    }

    #[must_use]
    pub fn store(&self) -> &StoreHandle {
        &self.inner.store
    }

    /// Image service client for the configured endpoint.
    #[must_use]
    pub fn images(&self) -> DogImageClient {
        DogImageClient::new(self.inner.http.clone(), self.inner.config.image_url.clone())
    }

    /// A submission workflow over the shared store.
    #[must_use]
    pub fn submission(&self) -> HttpPetSubmission {
        let echo = HttpEcho::new(self.inner.http.clone(), self.inner.config.echo_url.clone());
        PetSubmission::new(
            self.inner.store.clone(),
            Arc::clone(&self.inner.ids),
            self.images(),
            echo,
        )
    }

    /// Browser and cart logic over the shared store.
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.inner.store.clone(), Arc::clone(&self.inner.ids))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_clones_share_store() {
        let config = AppConfig::from_lookup(|key| {
            (key == "PAWCART_HTTP_TIMEOUT_MS").then(|| "250".to_string())
        })
        .unwrap();
        let state = AppState::new(config).unwrap();
        assert_eq!(state.http().default_timeout(), Duration::from_millis(250));

        let other = state.clone();
        let catalog = other.catalog();
        assert!(catalog.landing().is_some());

        state.store().clear_cart();
        assert_eq!(other.store().total_items(), 0);
        assert!(!state.submission().is_submitting());
    }
}
