//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (axum setup, dispatch pipeline)
//!     → request.rs (request ID layer)
//!     → security collaborators verify
//!     → routing resolves an upstream client
//!     → upstream response relayed, policy headers applied
//!     → Send to client
//! ```

pub mod request;
pub mod server;

pub use request::{request_id_layer, X_REQUEST_ID};
pub use server::GatewayServer;
