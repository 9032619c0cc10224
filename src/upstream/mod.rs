//! Upstream client subsystem.
//!
//! # Data Flow
//! ```text
//! Scheme construction (startup):
//!     endpoint host:port → client.rs (build persistent client)
//!
//! Per request:
//!     rewritten request → client.rs (reused connection pool) → backend
//! ```
//!
//! # Design Decisions
//! - One client per configured endpoint, built once, reused for the
//!   process lifetime
//! - Clients are internally thread-safe; many requests share one client
//!   without external locking

pub mod client;

pub use client::UpstreamClient;
