//! JSON-over-HTTP client with per-request timeouts.
//!
//! Every request is raced against a timer. The timer covers the exchange up
//! to the arrival of the response head and is dropped as soon as the
//! response arrives, so a slow body never triggers a late cancellation.
//! Dropping the returned future cancels the request as well.
//!
//! Failures are normalized into [`HttpError`], which keeps timeouts apart
//! from every other failure so callers can show a connectivity message.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::config::DEFAULT_TIMEOUT_MS;

/// Message shown to users when a request timed out.
pub const TIMEOUT_USER_MESSAGE: &str = "Request timed out. Please check your internet connection.";

/// Errors that can occur when calling an upstream service.
#[derive(Debug, Error)]
pub enum HttpError {
    /// No response arrived before the timer fired.
    #[error("Request to {url} timed out after {}ms", .after.as_millis())]
    Timeout { url: String, after: Duration },

    /// Connection, TLS or transport failure.
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A 2xx body was not valid JSON.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl HttpError {
    /// Whether the request was cancelled by its timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// The HTTP status for `Status` errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message safe to show to users.
    #[must_use]
    pub fn user_message(&self) -> String {
        if self.is_timeout() {
            TIMEOUT_USER_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

/// How a non-2xx response is turned into an error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureMessage {
    /// Always `HTTP error! status: <code>`.
    Status,
    /// The response body when non-empty, else the status message.
    BodyOrStatus,
}

fn status_message(status: StatusCode) -> String {
    format!("HTTP error! status: {}", status.as_u16())
}

/// JSON HTTP client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    default_timeout: Duration,
}

impl HttpClient {
    /// Create a client whose requests time out after `default_timeout`
    /// unless a call passes its own timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(default_timeout: Duration) -> Result<Self, HttpError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            default_timeout,
        })
    }

    /// Create a client with the 30 second default timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn with_default_timeout() -> Result<Self, HttpError> {
        Self::new(Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }

    /// The timeout used when a call does not pass one.
    #[must_use]
    pub const fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// GET `url` and parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Timeout` if no response arrived in time,
    /// `HttpError::Status` (`HTTP error! status: <code>`) for non-2xx
    /// responses, and `Network`/`Decode` for transport and JSON failures.
    #[instrument(skip(self), fields(method = "GET"))]
    pub async fn get(&self, url: &str, timeout: Option<Duration>) -> Result<Value, HttpError> {
        let result = self
            .execute(self.client.get(url), url, timeout, FailureMessage::Status)
            .await;

        if let Err(e) = &result {
            error!(error = %e, timed_out = e.is_timeout(), "GET request failed");
        }
        result
    }

    /// POST `body` as JSON to `url` and parse the response body as JSON.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`], except that a non-2xx error carries the
    /// response body text when the server sent one.
    #[instrument(skip(self, body), fields(method = "POST"))]
    pub async fn post<B>(
        &self,
        url: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<Value, HttpError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let request = self.client.post(url).json(body);
        let result = self
            .execute(request, url, timeout, FailureMessage::BodyOrStatus)
            .await;

        if let Err(e) = &result {
            error!(error = %e, timed_out = e.is_timeout(), "POST request failed");
        }
        result
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        url: &str,
        timeout: Option<Duration>,
        on_failure: FailureMessage,
    ) -> Result<Value, HttpError> {
        let limit = timeout.unwrap_or(self.default_timeout);

        let response = tokio::time::timeout(limit, request.send())
            .await
            .map_err(|_| HttpError::Timeout {
                url: url.to_string(),
                after: limit,
            })??;

        let status = response.status();
        if !status.is_success() {
            let message = match on_failure {
                FailureMessage::Status => status_message(status),
                FailureMessage::BodyOrStatus => {
                    let text = response.text().await.unwrap_or_default();
                    if text.trim().is_empty() {
                        status_message(status)
                    } else {
                        text
                    }
                }
            };
            return Err(HttpError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let value = serde_json::from_slice(&bytes)?;
        debug!(status = status.as_u16(), "Request succeeded");
        Ok(value)
    }
}
