//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main):
//!     Load config → Build gateway → Bind listeners
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Shutdown only stops acceptance; in-flight requests drain
//! - No mid-request cancellation anywhere in the dispatch path

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
