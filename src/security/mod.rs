//! Security policy collaborators.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → hsts.rs verify (edge-security check, before any routing work)
//!     → cors.rs verify (cross-origin request-side check)
//!     → Pass to routing
//!
//! Outgoing response (success path only):
//!     → hsts.rs set (Strict-Transport-Security header)
//!     → cors.rs set (Access-Control-Allow-* headers)
//! ```
//!
//! # Design Decisions
//! - Both collaborators are built once at gateway construction and reused
//!   for every request
//! - Fail closed: a verify failure terminates the request before routing
//! - Response decoration only happens after a successful forward

pub mod cors;
pub mod hsts;

pub use cors::Cors;
pub use hsts::Hsts;
