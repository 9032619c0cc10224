//! Structured logging.
//!
//! # Design Decisions
//! - tracing + EnvFilter; `RUST_LOG` wins over the built-in default
//! - Initialized once in main, before any other subsystem

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
pub fn init(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
