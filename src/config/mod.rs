//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, defaults on absence)
//!     → GatewayConfig (immutable)
//!     → consumed once at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults so a minimal config is runnable
//! - The scheme document is separate state with its own loader (routing)

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::{GatewayConfig, ListenerConfig, TlsConfig};
