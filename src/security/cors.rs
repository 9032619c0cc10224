//! Cross-origin collaborator (CORS).
//!
//! # Responsibilities
//! - Request side: reject requests whose `Origin` is not in the allowlist
//! - Response side: attach `Access-Control-Allow-*` headers after a
//!   successful forward
//!
//! # Design Decisions
//! - Verifier and setter state derived once at construction, reused for
//!   every request
//! - A request without an `Origin` header is not a cross-origin request
//!   and passes

use axum::body::Body;
use axum::http::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN,
};
use axum::http::Request;

use crate::error::GatewayError;

/// CORS policy for the gateway's public origin set.
#[derive(Debug, Clone)]
pub struct Cors {
    origins: Vec<String>,
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl Cors {
    /// Build the policy from allowed origins, methods and headers.
    pub fn new(origins: Vec<String>, methods: Vec<String>, headers: Vec<String>) -> Self {
        // Allow-Origin admits a single value; the first configured origin is
        // the default, a cross-origin caller gets its own origin echoed.
        let allow_origin = origins
            .first()
            .and_then(|o| HeaderValue::from_str(o).ok())
            .unwrap_or_else(|| HeaderValue::from_static(""));
        let allow_methods = joined_value(&methods);
        let allow_headers = joined_value(&headers);

        Self {
            origins: origins.into_iter().map(|o| o.to_ascii_lowercase()).collect(),
            allow_origin,
            allow_methods,
            allow_headers,
        }
    }

    /// The method allowlist the original gateway ships with.
    pub fn default_methods() -> Vec<String> {
        ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
            .map(String::from)
            .to_vec()
    }

    /// The header allowlist the original gateway ships with.
    pub fn default_headers() -> Vec<String> {
        ["content-type", "accept", "authorization"]
            .map(String::from)
            .to_vec()
    }

    /// Request-side verifier. Runs after the edge-security check and before
    /// any routing work.
    pub fn verify(&self, request: &Request<Body>) -> Result<(), GatewayError> {
        let Some(origin) = request.headers().get(ORIGIN) else {
            return Ok(());
        };

        let origin = origin.to_str().map_err(|_| {
            GatewayError::CrossOriginRejected("origin header is not valid text".into())
        })?;

        if self.allowed(origin) {
            Ok(())
        } else {
            Err(GatewayError::CrossOriginRejected(format!(
                "origin {origin:?} is not allowed"
            )))
        }
    }

    /// Attach the CORS response headers. Success path only.
    ///
    /// A cross-origin request gets its own (already verified) origin echoed;
    /// otherwise the first configured origin is emitted.
    pub fn set(&self, headers: &mut HeaderMap, origin: Option<&HeaderValue>) {
        let allow_origin = origin
            .filter(|o| o.to_str().is_ok_and(|o| self.allowed(o)))
            .cloned()
            .unwrap_or_else(|| self.allow_origin.clone());

        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
    }

    /// Origins are compared without the scheme so "example.com" in the
    /// allowlist covers both http and https callers.
    fn allowed(&self, origin: &str) -> bool {
        let bare = origin
            .strip_prefix("https://")
            .or_else(|| origin.strip_prefix("http://"))
            .unwrap_or(origin)
            .to_ascii_lowercase();

        self.origins.iter().any(|allowed| allowed == &bare)
    }
}

fn joined_value(parts: &[String]) -> HeaderValue {
    HeaderValue::from_str(&parts.join(", ")).unwrap_or_else(|_| HeaderValue::from_static(""))
}
