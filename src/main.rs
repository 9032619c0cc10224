//! Reverse-proxy gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                   GATEWAY                     │
//!                     │                                               │
//!  Client Request     │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!  ───────────────────┼─▶│ security │──▶│ routing  │──▶│ upstream │──┼──▶ Backend
//!   :80 / :443 (TLS)  │  │hsts+cors │   │parse+find│   │  client  │  │    Service
//!                     │  └──────────┘   └──────────┘   └────┬─────┘  │
//!                     │                                     │        │
//!  Client Response    │  ┌──────────────────┐               │        │
//!  ◀──────────────────┼──│ response headers │◀──────────────┘        │
//!                     │  │   (hsts, cors)   │                        │
//!                     │  └──────────────────┘                        │
//!                     │                                               │
//!                     │  config · lifecycle · observability           │
//!                     └──────────────────────────────────────────────┘
//! ```
//!
//! The routing table is built once at startup from the scheme document and
//! never changes; each endpoint keeps one persistent upstream client for
//! the process lifetime.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinSet;

use gateway::config::{load_config, GatewayConfig};
use gateway::lifecycle::{signals, Shutdown};
use gateway::observability::{logging, metrics};
use gateway::security::{Cors, Hsts};
use gateway::{Gateway, GatewayServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("gateway=debug,tower_http=debug");

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "gateway.toml".to_string());
    let config = load_config(Path::new(&config_path))?;

    tracing::info!(
        host = %config.host,
        name = %config.gateway.name,
        scheme_path = %config.gateway.scheme_path,
        http_address = %config.listener.http_address,
        tls = config.listener.tls.is_some(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    run(config).await
}

async fn run(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Policy collaborators are built once and reused for every request.
    let hsts = Hsts::new(&config.host, config.hsts.max_age);
    let cors = Cors::new(
        vec![config.host.clone()],
        Cors::default_methods(),
        Cors::default_headers(),
    );

    // The only place route state is ever constructed; failure is fatal.
    let gateway = Arc::new(Gateway::create(&config, hsts, cors)?);
    tracing::info!(
        name = %gateway.name(),
        services = gateway.scheme().len(),
        "Gateway created"
    );

    let shutdown = Shutdown::new();
    let mut servers = JoinSet::new();

    let http_listener = TcpListener::bind(&config.listener.http_address).await?;
    let server = GatewayServer::new(gateway, &config);

    servers.spawn(server.clone().run(http_listener, shutdown.subscribe()));

    if let Some(tls) = &config.listener.tls {
        let rustls = gateway::net::tls::load_tls_config(
            Path::new(&tls.cert_path),
            Path::new(&tls.key_path),
        )
        .await?;
        let https_addr: SocketAddr = config.listener.https_address.parse()?;
        servers.spawn(server.run_tls(https_addr, rustls, shutdown.subscribe()));
    }

    tokio::select! {
        _ = signals::wait_for_signal() => {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
        Some(result) = servers.join_next() => {
            shutdown.trigger();
            result??;
        }
    }

    // Let the remaining listener(s) drain in-flight requests.
    while servers.join_next().await.is_some() {}

    tracing::info!("Shutdown complete");
    Ok(())
}
