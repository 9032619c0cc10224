//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → parser.rs (split into service token + remainder, zero-copy)
//!     → scheme.rs (service + method lookup)
//!     → selector.rs (pick endpoint, deterministic index 0)
//!     → Return: persistent upstream client or explicit error
//!
//! Scheme Construction (at startup):
//!     JSON document
//!     → Decode + validate service names
//!     → Build one persistent client per endpoint
//!     → Freeze as immutable Scheme
//! ```
//!
//! # Design Decisions
//! - Route table built at startup, immutable at runtime; no reload path
//! - Deterministic: same (service, method) always resolves to the same
//!   endpoint
//! - No regex, no allocation in the hot-path parser

pub mod parser;
pub mod scheme;
pub mod selector;

pub use scheme::{Scheme, SchemeError, Service};
pub use selector::{FirstEndpoint, SelectEndpoint};
