//! API Layer for hubvault
//!
//! A thin request/response layer over the hub registry. It parses one JSON
//! request, runs one engine operation and renders one JSON response; error
//! codes and kinds from the store are passed through unchanged.
//!
//! # Supported Operations
//!
//! - createHub / getHub / deleteHub
//! - putMasterKey / getMasterKey
//! - createDocument / updateDocument / getDocument / deleteDocument
//! - query
//! - metrics

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiErrorCode, ApiResult};
pub use handler::ApiHandler;
pub use request::{Request, OPERATIONS};
pub use response::{ErrorResponse, Response, SuccessResponse};
