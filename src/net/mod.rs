//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     tls.rs (load provisioned certificate material)
//!     → rustls config for the 443 listener
//!
//! Incoming connections are accepted by the HTTP layer directly; the
//! plain and TLS listeners feed the same dispatch handler.
//! ```

pub mod tls;
