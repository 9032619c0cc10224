//! Backend endpoint selection strategy.
//!
//! # Design Decisions
//! - Selection is a narrow trait so richer strategies (round-robin,
//!   least-connections, health-aware) can slot in without touching
//!   resolution
//! - The shipped default is deterministic index-0 selection: no rotation
//!   state, same answer for the same service every time

use crate::routing::scheme::Endpoint;

/// Picks one endpoint out of a service's ordered endpoint list.
pub trait SelectEndpoint: Send + Sync + std::fmt::Debug {
    /// Returns the endpoint to forward to, or `None` when the list is empty.
    fn select<'a>(&self, endpoints: &'a [Endpoint]) -> Option<&'a Endpoint>;
}

/// Deterministic first-endpoint selection.
#[derive(Debug, Default)]
pub struct FirstEndpoint;

impl SelectEndpoint for FirstEndpoint {
    fn select<'a>(&self, endpoints: &'a [Endpoint]) -> Option<&'a Endpoint> {
        endpoints.first()
    }
}
