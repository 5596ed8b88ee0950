// src/error/types.rs
use serde::Serialize;
use thiserror::Error;

/// Crate-wide error type.
///
/// Errors are `Clone` because a single failure can be observed by several
/// parties at once: every caller awaiting a de-duplicated request, and the
/// store slot that records it for the presentation layer.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    /// No response reached us (DNS, connection refused, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Rejected before any network call was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// The payload did not match the expected entity shape
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// Message suitable for a toast title
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => "Network Error!".to_string(),
            AppError::Api { message, .. } => message.clone(),
            AppError::Validation(message) => message.clone(),
            AppError::Decode(_) => "Unexpected response from server".to_string(),
            AppError::Config(message) => message.clone(),
            AppError::Other(_) => "Something went wrong!".to_string(),
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Other(format!("Background task failed: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_uses_server_message() {
        let error = AppError::Api {
            status: 404,
            message: "The resource you requested could not be found.".to_string(),
        };
        assert_eq!(
            error.user_message(),
            "The resource you requested could not be found."
        );
    }

    #[test]
    fn test_network_error_has_generic_title() {
        let error = AppError::Network("connection refused".to_string());
        assert_eq!(error.user_message(), "Network Error!");
    }

    #[test]
    fn test_every_variant_has_a_toast_title() {
        let errors = [
            AppError::Validation("Page numbers start at 1".into()),
            AppError::Decode("missing field `id`".into()),
            AppError::Config("TMDB_API_TOKEN is not set".into()),
            AppError::Other("join failed".into()),
        ];
        for error in errors {
            assert!(!error.user_message().is_empty());
        }
    }

    #[test]
    fn test_serializes_as_display_string() {
        let json = serde_json::to_string(&AppError::Validation("Movie id is required".into()))
            .unwrap();
        assert_eq!(json, "\"Validation error: Movie id is required\"");
    }
}
