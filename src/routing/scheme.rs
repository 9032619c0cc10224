//! Route table construction and lookup.
//!
//! # Responsibilities
//! - Decode the declarative scheme document (JSON) at startup
//! - Validate service-name invariants
//! - Eagerly build one persistent upstream client per declared endpoint
//!
//! # Design Decisions
//! - Built once, immutable afterward; there is no reload operation
//! - Document types (serde) are separate from runtime types so clients
//!   never pass through deserialization
//! - Declared `require` scope lists are retained but not enforced here

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use axum::http::uri::InvalidUri;
use serde::Deserialize;
use thiserror::Error;

use crate::upstream::UpstreamClient;

/// Permission scopes declared for one method key.
///
/// Only the presence of the method key is checked during resolution; the
/// scope strings are carried as declared metadata.
pub type Require = Vec<String>;

/// Errors raised while constructing the route table. Startup-fatal.
#[derive(Debug, Error)]
pub enum SchemeError {
    #[error("failed to open scheme document {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode scheme document: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid service name {0:?}: must be non-empty and must not contain '/'")]
    InvalidServiceName(String),

    #[error("invalid endpoint {host}:{port} for service {service:?}: {source}")]
    Endpoint {
        service: String,
        host: String,
        port: u16,
        source: InvalidUri,
    },
}

/// On-disk shape of the scheme document.
#[derive(Debug, Deserialize)]
struct SchemeDoc {
    #[serde(default)]
    services: HashMap<String, ServiceDoc>,
}

#[derive(Debug, Deserialize)]
struct ServiceDoc {
    #[serde(default)]
    urls: Vec<EndpointDoc>,
    #[serde(default)]
    methods: HashMap<String, Require>,
}

#[derive(Debug, Deserialize)]
struct EndpointDoc {
    host: String,
    port: u16,
}

/// One backend network location with its persistent client.
#[derive(Debug)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    client: UpstreamClient,
}

impl Endpoint {
    /// The persistent connection client bound to this endpoint.
    pub fn client(&self) -> &UpstreamClient {
        &self.client
    }
}

/// One backend unit: ordered endpoints plus declared method keys.
#[derive(Debug)]
pub struct Service {
    endpoints: Vec<Endpoint>,
    methods: HashMap<String, Require>,
}

impl Service {
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn has_method(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    /// Declared scope list for a method key, if any.
    pub fn require(&self, method: &str) -> Option<&Require> {
        self.methods.get(method)
    }
}

/// The immutable route table, decoded once at startup.
#[derive(Debug)]
pub struct Scheme {
    path: PathBuf,
    services: HashMap<String, Service>,
}

impl Scheme {
    /// Load and validate the scheme document at `path`, eagerly building a
    /// persistent client for every declared endpoint.
    ///
    /// `client_name` is the gateway display name, attached to each client
    /// for diagnostics. Any failure here aborts startup.
    pub fn load(path: &Path, client_name: &str) -> Result<Self, SchemeError> {
        let file = File::open(path).map_err(|source| SchemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let doc: SchemeDoc = serde_json::from_reader(BufReader::new(file))?;

        let mut services = HashMap::with_capacity(doc.services.len());
        for (name, service_doc) in doc.services {
            if name.is_empty() || name.contains('/') {
                return Err(SchemeError::InvalidServiceName(name));
            }

            let mut endpoints = Vec::with_capacity(service_doc.urls.len());
            for url in service_doc.urls {
                let client = UpstreamClient::new(client_name, &url.host, url.port).map_err(
                    |source| SchemeError::Endpoint {
                        service: name.clone(),
                        host: url.host.clone(),
                        port: url.port,
                        source,
                    },
                )?;
                endpoints.push(Endpoint {
                    host: url.host,
                    port: url.port,
                    client,
                });
            }

            tracing::debug!(
                service = %name,
                endpoints = endpoints.len(),
                methods = service_doc.methods.len(),
                "Service registered"
            );

            services.insert(
                name,
                Service {
                    endpoints,
                    methods: service_doc.methods,
                },
            );
        }

        tracing::info!(
            path = %path.display(),
            services = services.len(),
            "Scheme loaded"
        );

        Ok(Self {
            path: path.to_path_buf(),
            services,
        })
    }

    /// The document path this scheme was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.get(name)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
