//! Edge-security collaborator (HSTS).
//!
//! # Responsibilities
//! - Request side: verify the request names a host this gateway serves
//!   (the configured domain or its `www.` variant)
//! - Response side: attach the `Strict-Transport-Security` header after a
//!   successful forward
//!
//! # Design Decisions
//! - Header value precomputed at construction; nothing allocates per request
//! - Host comparison is case-insensitive and ignores the port

use axum::body::Body;
use axum::http::header::{HeaderMap, HeaderValue, HOST, STRICT_TRANSPORT_SECURITY};
use axum::http::Request;

use crate::error::GatewayError;

/// HSTS policy bound to one public domain.
#[derive(Debug, Clone)]
pub struct Hsts {
    domain: String,
    www_domain: String,
    header: HeaderValue,
}

impl Hsts {
    /// Build the policy for `domain` with the given `max-age` in seconds.
    pub fn new(domain: &str, max_age: u64) -> Self {
        let header = HeaderValue::from_str(&format!("max-age={max_age}"))
            .unwrap_or_else(|_| HeaderValue::from_static("max-age=0"));

        Self {
            domain: domain.to_ascii_lowercase(),
            www_domain: format!("www.{}", domain.to_ascii_lowercase()),
            header,
        }
    }

    /// Verify the request host. Runs before any routing work.
    ///
    /// HTTP/1.1 carries the host in the `Host` header; HTTP/2 carries it in
    /// the `:authority` pseudo-header, which surfaces on the request URI.
    pub fn verify(&self, request: &Request<Body>) -> Result<(), GatewayError> {
        let host = request
            .headers()
            .get(HOST)
            .and_then(|h| h.to_str().ok())
            .or_else(|| request.uri().host())
            .ok_or_else(|| GatewayError::EdgeSecurityRejected("missing host header".into()))?;

        // Drop the port, compare the bare host.
        let bare = host.rsplit_once(':').map_or(host, |(h, _)| h);
        let bare = bare.to_ascii_lowercase();

        if bare == self.domain || bare == self.www_domain {
            Ok(())
        } else {
            Err(GatewayError::EdgeSecurityRejected(format!(
                "host {bare:?} is not served by this gateway"
            )))
        }
    }

    /// Attach the HSTS response header. Success path only.
    pub fn set(&self, headers: &mut HeaderMap) {
        headers.insert(STRICT_TRANSPORT_SECURITY, self.header.clone());
    }
}
