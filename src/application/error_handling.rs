// src/application/error_handling.rs
//
// Error projection for the presentation layer
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for UI
// - Never exposes internal implementation details
// - Logs errors for debugging

use log::error;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The server could not be reached
    Network,

    /// The server answered with a failure status
    Api,

    /// Invalid input, rejected before any request
    Validation,

    /// The server answered with an unexpected shape
    Decode,

    /// Missing or invalid settings
    Configuration,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: &AppError) -> Self {
        let (error_type, details) = match error {
            AppError::Network(cause) => (ErrorType::Network, Some(cause.clone())),
            AppError::Api { status, .. } => (ErrorType::Api, Some(format!("HTTP {}", status))),
            AppError::Validation(_) => (ErrorType::Validation, None),
            AppError::Decode(cause) => {
                error!("Decode error: {}", cause);
                (ErrorType::Decode, Some("Check logs for details".to_string()))
            }
            AppError::Config(_) => (ErrorType::Configuration, None),
            AppError::Other(cause) => {
                error!("Other error: {}", cause);
                (ErrorType::Internal, None)
            }
        };

        Self {
            success: false,
            error_type,
            message: error.user_message(),
            details,
        }
    }

    /// JSON form handed back to the UI
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "Internal error".to_string())
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Validation,
            message,
            details: None,
        }
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self::from_app_error(error)
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| ErrorResponse::from_app_error(&e).to_json())
    }
}
