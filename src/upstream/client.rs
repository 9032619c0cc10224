//! Persistent per-endpoint HTTP client.
//!
//! # Responsibilities
//! - Bind one reusable client to a single backend host:port pair
//! - Forward rewritten requests and surface transport failures once
//!
//! # Design Decisions
//! - Built eagerly at scheme construction; no lazy dialing on the request path
//! - Connection reuse is delegated to the hyper-util legacy pool
//! - Carries a symbolic name (the gateway display name) for diagnostics

use axum::body::Body;
use axum::http::uri::{Authority, InvalidUri};
use axum::http::Request;
use hyper::body::Incoming;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use crate::error::GatewayError;

/// A persistent connection client bound to one backend endpoint.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    name: String,
    authority: Authority,
    client: Client<HttpConnector, Body>,
}

impl UpstreamClient {
    /// Build a client for `host:port`.
    ///
    /// The connector dials both address families; whichever the resolver
    /// yields first wins.
    pub fn new(name: &str, host: &str, port: u16) -> Result<Self, InvalidUri> {
        let authority = Authority::try_from(format!("{host}:{port}"))?;

        let mut connector = HttpConnector::new();
        connector.set_nodelay(true);

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            name: name.to_string(),
            authority,
            client,
        })
    }

    /// The `host:port` authority this client dials.
    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Symbolic client name, used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Issue a rewritten request on the persistent connection pool.
    ///
    /// A transport failure is surfaced once as
    /// [`GatewayError::UpstreamTransport`]; nothing here retries.
    pub async fn forward(&self, request: Request<Body>) -> Result<axum::http::Response<Incoming>, GatewayError> {
        self.client
            .request(request)
            .await
            .map_err(|e| GatewayError::UpstreamTransport(e.to_string()))
    }
}
