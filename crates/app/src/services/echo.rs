//! Remote echo of newly added pets.
//!
//! The echo endpoint only records what it receives. Its response body is
//! returned for logging but never interpreted; only the status matters.

use std::future::Future;
use std::time::Duration;

use pawcart_core::Pet;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::http::{HttpClient, HttpError};

/// Destination of the best-effort POST made after a pet is committed.
pub trait PetEcho: Send + Sync {
    /// Send `pet` to the remote endpoint.
    fn echo(&self, pet: &Pet) -> impl Future<Output = Result<Value, HttpError>> + Send;
}

/// Echoes pets to an HTTP endpoint as JSON.
#[derive(Debug, Clone)]
pub struct HttpEcho {
    http: HttpClient,
    endpoint: Url,
    timeout: Option<Duration>,
}

impl HttpEcho {
    /// Create an echo targeting `endpoint` with the client's default timeout.
    #[must_use]
    pub const fn new(http: HttpClient, endpoint: Url) -> Self {
        Self {
            http,
            endpoint,
            timeout: None,
        }
    }

    /// Override the timeout for echo requests.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl PetEcho for HttpEcho {
    #[instrument(skip(self, pet), fields(endpoint = %self.endpoint, pet_id = %pet.id))]
    async fn echo(&self, pet: &Pet) -> Result<Value, HttpError> {
        self.http.post(self.endpoint.as_str(), pet, self.timeout).await
    }
}
