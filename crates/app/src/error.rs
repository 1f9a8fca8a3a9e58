//! Top-level error type for the client library.

use thiserror::Error;

use crate::config::ConfigError;
use crate::http::HttpError;
use crate::services::ImageError;

/// Errors that can stop a front end from running.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Message safe to show to users.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(e) => e.to_string(),
            Self::Http(e) | Self::Image(ImageError::Http(e)) => e.user_message(),
            Self::Image(ImageError::MissingUrl(_)) => {
                "The image service returned an unexpected response.".to_string()
            }
            Self::Io(_) => "Could not read or write the terminal.".to_string(),
        }
    }
}

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::http::TIMEOUT_USER_MESSAGE;

    #[test]
    fn test_timeouts_map_to_connectivity_message() {
        let timeout = || HttpError::Timeout {
            url: "http://x.test".to_string(),
            after: Duration::from_secs(1),
        };
        assert_eq!(AppError::from(timeout()).user_message(), TIMEOUT_USER_MESSAGE);
        assert_eq!(
            AppError::from(ImageError::from(timeout())).user_message(),
            TIMEOUT_USER_MESSAGE
        );
    }

    #[test]
    fn test_missing_url_hides_body() {
        let err = AppError::from(ImageError::MissingUrl("{\"secret\":1}".to_string()));
        assert!(!err.user_message().contains("secret"));
    }
}
