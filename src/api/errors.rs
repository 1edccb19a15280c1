//! API error types
//!
//! API errors are pass-through: store errors keep their code and kind. The
//! API itself only adds errors for input it cannot parse.

use std::fmt;

use crate::store::{ErrorKind, StoreError};

/// API-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Invalid request format
    InvalidRequest,
    /// Unknown operation
    UnknownOperation,
    /// Response data could not be encoded
    EncodingFailed,
}

impl ApiErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ApiErrorCode::InvalidRequest => "HUB_INVALID_REQUEST",
            ApiErrorCode::UnknownOperation => "HUB_UNKNOWN_OPERATION",
            ApiErrorCode::EncodingFailed => "HUB_ENCODING_FAILED",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// API error with preserved store error information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Original error code string (from the store or the API)
    code: String,
    message: String,
    kind: ErrorKind,
}

impl ApiError {
    /// Create an invalid request error
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self {
            code: ApiErrorCode::InvalidRequest.code().to_string(),
            message: reason.into(),
            kind: ErrorKind::Validation,
        }
    }

    /// Create an unknown operation error
    pub fn unknown_operation(op: &str) -> Self {
        Self {
            code: ApiErrorCode::UnknownOperation.code().to_string(),
            message: format!("Unknown operation: {}", op),
            kind: ErrorKind::Validation,
        }
    }

    /// Create an encoding failure
    pub fn encoding(err: serde_json::Error) -> Self {
        Self {
            code: ApiErrorCode::EncodingFailed.code().to_string(),
            message: format!("Failed to encode response: {}", err),
            kind: ErrorKind::Validation,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the outcome class
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            kind: err.kind(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
