//! API request types
//!
//! One JSON object per request, tagged by `op`.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::hub::HubConfig;
use crate::query::Query;
use crate::store::Document;

use super::errors::{ApiError, ApiResult};

/// Every operation name the handler understands
pub const OPERATIONS: &[&str] = &[
    "createHub",
    "getHub",
    "deleteHub",
    "putMasterKey",
    "getMasterKey",
    "createDocument",
    "updateDocument",
    "getDocument",
    "deleteDocument",
    "query",
    "metrics",
];

/// Unified request envelope
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Request {
    CreateHub { config: HubConfig },
    GetHub { hub: String },
    DeleteHub { hub: String },
    PutMasterKey { hub: String, key: Value },
    GetMasterKey { hub: String },
    CreateDocument { hub: String, document: Document },
    UpdateDocument { hub: String, id: String, document: Document },
    GetDocument { hub: String, id: String },
    DeleteDocument { hub: String, id: String },
    Query { hub: String, query: Query },
    Metrics,
}

impl Request {
    /// Parse a request from a JSON string
    pub fn parse(json: &str) -> ApiResult<Self> {
        let raw: Value = serde_json::from_str(json)
            .map_err(|e| ApiError::invalid_request(format!("Invalid JSON: {}", e)))?;

        let op = raw
            .get("op")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::invalid_request("Missing op"))?;

        if !OPERATIONS.contains(&op) {
            return Err(ApiError::unknown_operation(op));
        }

        let request: Request = serde_json::from_value(raw)
            .map_err(|e| ApiError::invalid_request(e.to_string()))?;
        request.validate()?;
        Ok(request)
    }

    /// Addressed and created document ids must be route-safe
    fn validate(&self) -> ApiResult<()> {
        match self {
            Request::CreateDocument { document, .. } => check_document_id(&document.id),
            Request::UpdateDocument { id, .. }
            | Request::GetDocument { id, .. }
            | Request::DeleteDocument { id, .. } => check_document_id(id),
            _ => Ok(()),
        }
    }
}

fn check_document_id(id: &str) -> ApiResult<()> {
    if document_id_pattern().is_match(id) {
        Ok(())
    } else {
        Err(ApiError::invalid_request(format!(
            "Invalid document id: {:?}",
            id
        )))
    }
}

fn document_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[-_A-Za-z0-9]+$").expect("document id pattern is valid"))
}
