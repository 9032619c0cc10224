//! The gateway: route table plus policy collaborators.
//!
//! # Responsibilities
//! - Own the immutable scheme and the two policy collaborators
//! - Resolve (service, method) pairs to a persistent upstream client
//!
//! # Design Decisions
//! - Built once at startup, never mutated, shared via `Arc`
//! - Endpoint selection goes through the `SelectEndpoint` seam; the
//!   default is deterministic first-endpoint selection

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::routing::{FirstEndpoint, Scheme, SelectEndpoint};
use crate::security::{Cors, Hsts};
use crate::upstream::UpstreamClient;

/// Process-wide routing and dispatch state.
#[derive(Debug)]
pub struct Gateway {
    name: String,
    scheme: Scheme,
    hsts: Hsts,
    cors: Cors,
    selector: Box<dyn SelectEndpoint>,
}

impl Gateway {
    /// Load the scheme named by `config` and assemble the gateway with its
    /// two policy collaborators.
    ///
    /// This is the only place route state is ever constructed; a
    /// [`GatewayError::SchemeLoad`] here is fatal to startup.
    pub fn create(config: &GatewayConfig, hsts: Hsts, cors: Cors) -> Result<Self, GatewayError> {
        let scheme = Scheme::load(
            std::path::Path::new(&config.gateway.scheme_path),
            &config.gateway.name,
        )?;

        Ok(Self {
            name: config.gateway.name.clone(),
            scheme,
            hsts,
            cors,
            selector: Box::new(FirstEndpoint),
        })
    }

    /// Replace the endpoint selection strategy.
    pub fn with_selector(mut self, selector: Box<dyn SelectEndpoint>) -> Self {
        self.selector = selector;
        self
    }

    /// Resolve a (service, method) pair to the upstream client to forward to.
    pub fn find(&self, service: &str, method: &str) -> Result<&UpstreamClient, GatewayError> {
        let service = self
            .scheme
            .service(service)
            .ok_or(GatewayError::ServiceNotFound)?;

        if !service.has_method(method) {
            return Err(GatewayError::MethodNotFound);
        }

        let endpoint = self
            .selector
            .select(service.endpoints())
            .ok_or(GatewayError::NoEndpoints)?;

        Ok(endpoint.client())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn hsts(&self) -> &Hsts {
        &self.hsts
    }

    pub fn cors(&self) -> &Cors {
        &self.cors
    }
}
