//! Gateway error kinds.
//!
//! # Design Decisions
//! - One enum for every per-request failure so the dispatch handler can
//!   short-circuit uniformly at any stage
//! - Every per-request kind maps to the same client-visible status (400)
//!   with the error's Display text as the body; there is no per-kind
//!   status mapping
//! - `SchemeLoad` is the only startup-fatal kind; it never reaches a client

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::routing::scheme::SchemeError;

/// Errors produced by the routing-and-dispatch core.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request path is shorter than the minimum `/x/y` shape.
    #[error("request path is too short")]
    PathTooShort,

    /// Request path does not split into a service token and a remainder.
    #[error("request should contain both service and method in path")]
    MalformedPath,

    /// No service with that name in the scheme.
    #[error("service not found")]
    ServiceNotFound,

    /// Service exists but does not declare that method.
    #[error("method not found")]
    MethodNotFound,

    /// Service declares no endpoints, so nothing can be selected.
    #[error("service has no endpoints")]
    NoEndpoints,

    /// Rejected by the edge-security collaborator.
    #[error("edge security rejected request: {0}")]
    EdgeSecurityRejected(String),

    /// Rejected by the cross-origin collaborator.
    #[error("cross-origin policy rejected request: {0}")]
    CrossOriginRejected(String),

    /// The upstream leg failed at the transport level.
    #[error("upstream transport failure: {0}")]
    UpstreamTransport(String),

    /// Scheme document could not be loaded at startup.
    #[error("failed to load scheme: {0}")]
    SchemeLoad(#[from] SchemeError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        // Uniform failure status for every stage of the pipeline.
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}
