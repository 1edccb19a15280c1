//! API Handler for hubvault
//!
//! Resolves hubs through an injected registry and dispatches each request
//! to one engine operation. Locking is per hub and happens inside `Hub`, so
//! the handler itself holds no lock.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use crate::hub::{HubRegistry, MasterKeyOutcome};
use crate::observability::{log_event_with_fields, Event};

use super::errors::{ApiError, ApiResult};
use super::request::Request;
use super::response::Response;

/// Request dispatcher over a hub registry
pub struct ApiHandler {
    registry: Arc<HubRegistry>,
}

impl ApiHandler {
    /// Create a handler serving `registry`
    pub fn new(registry: Arc<HubRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<HubRegistry> {
        &self.registry
    }

    /// Handle a raw JSON request string
    pub fn handle(&self, json_request: &str) -> Response {
        let request = match Request::parse(json_request) {
            Ok(r) => r,
            Err(e) => {
                log_event_with_fields(Event::RequestRejected, &[("code", e.code())]);
                return Response::error(&e);
            }
        };

        match self.dispatch(request) {
            Ok(data) => Response::success(data),
            Err(e) => Response::error(&e),
        }
    }

    /// Execute a parsed request
    pub fn dispatch(&self, request: Request) -> ApiResult<Value> {
        match request {
            Request::CreateHub { config } => {
                let id = self.registry.create(config)?;
                encode(self.registry.get(id.as_str())?.info())
            }
            Request::GetHub { hub } => encode(self.registry.get(&hub)?.info()),
            Request::DeleteHub { hub } => {
                self.registry.remove(&hub)?;
                Ok(Value::Null)
            }
            Request::PutMasterKey { hub, key } => {
                let outcome = self.registry.get(&hub)?.put_master_key(key);
                Ok(json!({ "stored": outcome == MasterKeyOutcome::Stored }))
            }
            Request::GetMasterKey { hub } => Ok(self.registry.get(&hub)?.master_key()?),
            Request::CreateDocument { hub, document } => {
                let id = document.id.clone();
                self.registry.get(&hub)?.create_document(document)?;
                Ok(json!({ "id": id }))
            }
            Request::UpdateDocument { hub, id, document } => {
                self.registry.get(&hub)?.update_document(&id, document)?;
                Ok(Value::Null)
            }
            Request::GetDocument { hub, id } => encode(self.registry.get(&hub)?.get_document(&id)?),
            Request::DeleteDocument { hub, id } => {
                self.registry.get(&hub)?.delete_document(&id)?;
                Ok(Value::Null)
            }
            Request::Query { hub, query } => encode(self.registry.get(&hub)?.query(&query)?),
            Request::Metrics => encode(self.registry.metrics().snapshot()),
        }
    }
}

fn encode<T: Serialize>(data: T) -> ApiResult<Value> {
    serde_json::to_value(data).map_err(ApiError::encoding)
}
