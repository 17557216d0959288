//! Request identification.
//!
//! # Responsibilities
//! - Assign a UUID v4 `x-request-id` to every incoming request
//! - Echo the id on the response
//! - Expose the id to handlers and log lines
//!
//! # Design Decisions
//! - An id supplied by the client is kept, not replaced
//! - The id is set outside the trace layer so every span can carry it

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId as TowerRequestId, SetRequestIdLayer,
};
use uuid::Uuid;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestId;

impl MakeRequestId for RequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<TowerRequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(TowerRequestId::new)
    }
}

/// Layer pair that sets the id on the way in and copies it to the response.
pub struct RequestIdLayer;

impl RequestIdLayer {
    pub fn set() -> SetRequestIdLayer<RequestId> {
        SetRequestIdLayer::new(X_REQUEST_ID, RequestId)
    }

    pub fn propagate() -> PropagateRequestIdLayer {
        PropagateRequestIdLayer::new(X_REQUEST_ID)
    }
}

/// Read the request id from a header map.
pub trait RequestIdExt {
    fn request_id(&self) -> &str;
}

impl RequestIdExt for HeaderMap {
    fn request_id(&self) -> &str {
        self.get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}
