//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the axum router with the dispatch handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve the same handler on the plain and TLS listeners
//! - Sequence the dispatch pipeline: edge security → cross-origin →
//!   parse → resolve → rewrite → forward → decorate
//!
//! # Design Decisions
//! - Transitions are strictly sequential; the first failure terminates
//!   the request with a uniform 400 carrying the error text
//! - The upstream leg is always plaintext HTTP; TLS terminates at the edge
//! - No retries: a transport failure is surfaced once

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::header::ORIGIN,
    http::uri::{PathAndQuery, Scheme, Uri},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::http::request::{request_id_layer, X_REQUEST_ID};
use crate::observability::metrics;
use crate::routing::parser;

/// How long draining connections get after a shutdown signal.
const DRAIN_GRACE: Duration = Duration::from_secs(16);

/// HTTP server for the gateway.
#[derive(Clone)]
pub struct GatewayServer {
    router: Router,
}

impl GatewayServer {
    /// Build the server around a constructed gateway.
    pub fn new(gateway: Arc<Gateway>, config: &GatewayConfig) -> Self {
        let router = Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(gateway)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(request_id_layer())
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Serve plaintext HTTP on the given listener until shutdown.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!(address = %addr, "HTTP server stopped");
        Ok(())
    }

    /// Serve TLS-terminated HTTPS on `addr` until shutdown.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        tracing::info!(address = %addr, "HTTPS server starting");

        let handle = Handle::new();
        let watcher = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            watcher.graceful_shutdown(Some(DRAIN_GRACE));
        });

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!(address = %addr, "HTTPS server stopped");
        Ok(())
    }
}

/// Dispatch handler: runs the full pipeline for one request.
async fn dispatch(State(gateway): State<Arc<Gateway>>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Dispatching request"
    );

    match relay(&gateway, request).await {
        Ok((response, upstream)) => {
            let status = response.status();
            tracing::debug!(
                request_id = %request_id,
                status = %status,
                upstream = %upstream,
                "Request forwarded"
            );
            metrics::record_request(&method, status.as_u16(), &upstream, start);
            response
        }
        Err(err) => {
            tracing::warn!(
                request_id = %request_id,
                path = %path,
                error = %err,
                "Request terminated"
            );
            metrics::record_request(&method, StatusCode::BAD_REQUEST.as_u16(), "none", start);
            err.into_response()
        }
    }
}

/// The sequential forwarding pipeline. Any failure short-circuits.
async fn relay(
    gateway: &Gateway,
    request: Request<Body>,
) -> Result<(Response, String), GatewayError> {
    // 1. Edge-security check.
    gateway.hsts().verify(&request)?;

    // 2. Cross-origin check.
    gateway.cors().verify(&request)?;

    let (mut parts, body) = request.into_parts();
    let origin = parts.headers.get(ORIGIN).cloned();

    // 3. Parse the path into a service token and a remainder.
    let (service, rest) = parser::parse(parts.uri.path().as_bytes())?;
    let service = std::str::from_utf8(service).map_err(|_| GatewayError::MalformedPath)?;
    let rest = std::str::from_utf8(rest).map_err(|_| GatewayError::MalformedPath)?;
    let method_key = rest.strip_prefix('/').unwrap_or(rest);

    // 4. Resolve the upstream client.
    let client = gateway.find(service, method_key)?;
    let upstream = client.authority().as_str().to_string();

    // 5. Rewrite: plaintext scheme, endpoint authority, remainder path.
    // The query string rides along unchanged.
    let path_and_query = match parts.uri.query() {
        Some(query) => PathAndQuery::try_from(format!("{rest}?{query}")),
        None => PathAndQuery::try_from(rest),
    }
    .map_err(|_| GatewayError::MalformedPath)?;

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(client.authority().clone());
    uri_parts.path_and_query = Some(path_and_query);
    parts.uri = Uri::from_parts(uri_parts).map_err(|_| GatewayError::MalformedPath)?;

    // 6. Forward on the persistent client, relaying the upstream response.
    let upstream_response = client.forward(Request::from_parts(parts, body)).await?;
    let (response_parts, response_body) = upstream_response.into_parts();
    let mut response = Response::from_parts(response_parts, Body::new(response_body));

    // 7. Decorate the success path with the collaborators' response headers.
    gateway.hsts().set(response.headers_mut());
    gateway.cors().set(response.headers_mut(), origin.as_ref());

    Ok((response, upstream))
}
