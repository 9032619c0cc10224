//! End-to-end dispatch tests for the gateway.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use gateway::config::GatewayConfig;
use gateway::lifecycle::Shutdown;
use gateway::security::{Cors, Hsts};
use gateway::{Gateway, GatewayServer};
use tokio::net::TcpListener;

mod common;

fn test_config(scheme_path: &Path, proxy_addr: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.host = "127.0.0.1".into();
    config.gateway.scheme_path = scheme_path.to_string_lossy().into_owned();
    config.listener.http_address = proxy_addr.to_string();
    config
}

fn build_gateway(config: &GatewayConfig) -> Arc<Gateway> {
    let hsts = Hsts::new(&config.host, config.hsts.max_age);
    let cors = Cors::new(
        vec![config.host.clone()],
        Cors::default_methods(),
        Cors::default_headers(),
    );
    Arc::new(Gateway::create(config, hsts, cors).unwrap())
}

async fn start_gateway(config: &GatewayConfig, proxy_addr: SocketAddr) -> Shutdown {
    let gateway = build_gateway(config);
    let server = GatewayServer::new(gateway, config);
    let listener = TcpListener::bind(proxy_addr).await.unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    tokio::time::sleep(Duration::from_millis(200)).await;
    shutdown
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn test_dispatch_forwards_to_backend() {
    let backend_addr: SocketAddr = "127.0.0.1:28511".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28512".parse().unwrap();

    common::start_echo_backend(backend_addr).await;
    let scheme = common::write_scheme("dispatch-forward.json", backend_addr.port());
    let config = test_config(&scheme, proxy_addr);
    let shutdown = start_gateway(&config, proxy_addr).await;

    let res = client()
        .get(format!("http://{proxy_addr}/users/profile"))
        .send()
        .await
        .expect("gateway unreachable");

    assert_eq!(res.status(), 200);

    // Success path gets both collaborators' response headers.
    assert_eq!(
        res.headers().get("strict-transport-security").unwrap(),
        "max-age=31536000"
    );
    assert_eq!(
        res.headers().get("access-control-allow-origin").unwrap(),
        "127.0.0.1"
    );

    // The upstream leg sees the parsed remainder, not the full path.
    assert_eq!(res.text().await.unwrap(), "/profile");

    shutdown.trigger();
}

#[tokio::test]
async fn test_query_string_rides_along() {
    let backend_addr: SocketAddr = "127.0.0.1:28521".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28522".parse().unwrap();

    common::start_echo_backend(backend_addr).await;
    let scheme = common::write_scheme("dispatch-query.json", backend_addr.port());
    let config = test_config(&scheme, proxy_addr);
    let shutdown = start_gateway(&config, proxy_addr).await;

    let res = client()
        .get(format!("http://{proxy_addr}/users/profile?full=1"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "/profile?full=1");

    shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_method_rejected() {
    let proxy_addr: SocketAddr = "127.0.0.1:28532".parse().unwrap();

    let scheme = common::write_scheme("dispatch-method.json", 28531);
    let config = test_config(&scheme, proxy_addr);
    let shutdown = start_gateway(&config, proxy_addr).await;

    let res = client()
        .get(format!("http://{proxy_addr}/users/unknown"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    assert!(res.text().await.unwrap().contains("method not found"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_service_rejected() {
    let proxy_addr: SocketAddr = "127.0.0.1:28542".parse().unwrap();

    let scheme = common::write_scheme("dispatch-service.json", 28541);
    let config = test_config(&scheme, proxy_addr);
    let shutdown = start_gateway(&config, proxy_addr).await;

    let res = client()
        .get(format!("http://{proxy_addr}/ghost/x"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);

    // Policy headers are a success-path decoration; failures stay bare.
    assert!(res.headers().get("strict-transport-security").is_none());
    assert!(res.headers().get("access-control-allow-origin").is_none());

    assert!(res.text().await.unwrap().contains("service not found"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_short_path_rejected() {
    let proxy_addr: SocketAddr = "127.0.0.1:28552".parse().unwrap();

    let scheme = common::write_scheme("dispatch-short.json", 28551);
    let config = test_config(&scheme, proxy_addr);
    let shutdown = start_gateway(&config, proxy_addr).await;

    let res = client()
        .get(format!("http://{proxy_addr}/a"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    assert!(res.text().await.unwrap().contains("too short"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_foreign_origin_rejected() {
    let proxy_addr: SocketAddr = "127.0.0.1:28562".parse().unwrap();

    let scheme = common::write_scheme("dispatch-origin.json", 28561);
    let config = test_config(&scheme, proxy_addr);
    let shutdown = start_gateway(&config, proxy_addr).await;

    let res = client()
        .get(format!("http://{proxy_addr}/users/profile"))
        .header("Origin", "https://evil.com")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    assert!(res.text().await.unwrap().contains("origin"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_dead_backend_surfaces_transport_failure() {
    let proxy_addr: SocketAddr = "127.0.0.1:28572".parse().unwrap();

    // Nothing listens on the backend port.
    let scheme = common::write_scheme("dispatch-dead.json", 28571);
    let config = test_config(&scheme, proxy_addr);
    let shutdown = start_gateway(&config, proxy_addr).await;

    let res = client()
        .get(format!("http://{proxy_addr}/users/profile"))
        .send()
        .await
        .unwrap();

    // Same status class as every other failure, message from the transport.
    assert_eq!(res.status(), 400);
    assert!(res.text().await.unwrap().contains("upstream transport failure"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_concurrent_resolution_is_stable() {
    let scheme = common::write_scheme("dispatch-concurrent.json", 28581);
    let config = test_config(&scheme, "127.0.0.1:28582".parse().unwrap());
    let gateway = build_gateway(&config);

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let gateway = gateway.clone();
        tasks.push(tokio::spawn(async move {
            gateway
                .find("users", "profile")
                .unwrap()
                .authority()
                .as_str()
                .to_string()
        }));
    }

    for task in tasks {
        assert_eq!(task.await.unwrap(), "127.0.0.1:28581");
    }
}
