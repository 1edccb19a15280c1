//! Store error types
//!
//! Every engine operation either succeeds or fails with exactly one of three
//! kinds. None of them are retried internally; the caller maps kinds to its
//! own signals.

use std::fmt;

use thiserror::Error;

use crate::index::IndexId;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Logical outcome class of a failed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The write collides with existing state
    Conflict,
    /// The request is malformed for this operation
    Validation,
    /// The addressed hub, document or index does not exist
    NotFound,
}

impl ErrorKind {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Conflict => "conflict",
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    // ==================
    // Conflict
    // ==================
    /// A document with this id is already stored
    #[error("Document already exists: {0}")]
    DuplicateDocument(String),

    /// A unique attribute value is already held in the index group
    #[error("Unique attribute {key} already held in index {index}")]
    UniqueConflict { index: IndexId, key: String },

    /// A hub with the same controller and reference id exists
    #[error("Hub already exists for controller {controller} with reference {reference_id}")]
    DuplicateHub {
        controller: String,
        reference_id: String,
    },

    // ==================
    // Validation
    // ==================
    /// The addressed id differs from the id carried in the document
    #[error("Document id mismatch: addressed {expected}, document carries {actual}")]
    IdMismatch { expected: String, actual: String },

    /// Hub configuration rejected
    #[error("Invalid hub config: {0}")]
    InvalidHubConfig(String),

    // ==================
    // Not Found
    // ==================
    /// No hub registered under this id
    #[error("Hub not found: {0}")]
    HubNotFound(String),

    /// No document stored under this id
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// No index group exists for this identifier
    #[error("Index not found: {0}")]
    IndexNotFound(IndexId),

    /// The hub has no master key yet
    #[error("Master key not set for hub {0}")]
    MasterKeyNotFound(String),
}

impl StoreError {
    /// Returns the outcome class
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::DuplicateDocument(_)
            | StoreError::UniqueConflict { .. }
            | StoreError::DuplicateHub { .. } => ErrorKind::Conflict,

            StoreError::IdMismatch { .. } | StoreError::InvalidHubConfig(_) => {
                ErrorKind::Validation
            }

            StoreError::HubNotFound(_)
            | StoreError::DocumentNotFound(_)
            | StoreError::IndexNotFound(_)
            | StoreError::MasterKeyNotFound(_) => ErrorKind::NotFound,
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::DuplicateDocument(_) => "HUB_DUPLICATE_DOCUMENT",
            StoreError::UniqueConflict { .. } => "HUB_UNIQUE_CONFLICT",
            StoreError::DuplicateHub { .. } => "HUB_DUPLICATE_HUB",
            StoreError::IdMismatch { .. } => "HUB_ID_MISMATCH",
            StoreError::InvalidHubConfig(_) => "HUB_INVALID_CONFIG",
            StoreError::HubNotFound(_) => "HUB_NOT_FOUND",
            StoreError::DocumentNotFound(_) => "HUB_DOCUMENT_NOT_FOUND",
            StoreError::IndexNotFound(_) => "HUB_INDEX_NOT_FOUND",
            StoreError::MasterKeyNotFound(_) => "HUB_MASTER_KEY_NOT_FOUND",
        }
    }
}
