//! Reverse-proxy gateway library.
//!
//! Routes inbound HTTP(S) requests against an immutable scheme and
//! forwards them to backend services over persistent plaintext clients.

// Core subsystems
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod net;
pub mod routing;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use gateway::Gateway;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
