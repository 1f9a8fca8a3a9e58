//! Random image service client.
//!
//! The service answers `GET` with `{ "message": "<image url>", ... }`. Any
//! other status or shape is reported as an [`ImageError`].

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::http::{HttpClient, HttpError};

/// Errors that can occur when fetching an image URL.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The request itself failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response did not contain a usable `message` string.
    #[error("Image response has no image URL: {0}")]
    MissingUrl(String),
}

impl ImageError {
    /// Whether the request was cancelled by its timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}

/// Source of a representative image for a new pet.
pub trait ImageSource: Send + Sync {
    /// Fetch one image URL.
    fn random_image_url(&self) -> impl Future<Output = Result<String, ImageError>> + Send;
}

/// Image service response body.
#[derive(Debug, Deserialize)]
struct ImageResponse {
    message: String,
}

/// Client for a dog.ceo-compatible random image endpoint.
#[derive(Debug, Clone)]
pub struct DogImageClient {
    http: HttpClient,
    endpoint: Url,
    timeout: Option<Duration>,
}

impl DogImageClient {
    /// Create a client for `endpoint` using the client's default timeout.
    #[must_use]
    pub const fn new(http: HttpClient, endpoint: Url) -> Self {
        Self {
            http,
            endpoint,
            timeout: None,
        }
    }

    /// Override the timeout for image requests.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl ImageSource for DogImageClient {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn random_image_url(&self) -> Result<String, ImageError> {
        let body = self.http.get(self.endpoint.as_str(), self.timeout).await?;

        let response: ImageResponse = serde_json::from_value(body.clone())
            .map_err(|_| ImageError::MissingUrl(body.to_string()))?;

        if response.message.trim().is_empty() {
            return Err(ImageError::MissingUrl(body.to_string()));
        }

        Ok(response.message)
    }
}
