//! TLS configuration loading.
//!
//! Certificate acquisition and renewal are an external collaborator's job;
//! the narrow interface here is PEM files on disk covering the configured
//! domain and its `www.` variant.

use std::path::Path;

use axum_server::tls_rustls::RustlsConfig;

/// Load rustls configuration from provisioned certificate and key files.
pub async fn load_tls_config(cert_path: &Path, key_path: &Path) -> Result<RustlsConfig, std::io::Error> {
    for (label, path) in [("certificate", cert_path), ("private key", key_path)] {
        if !path.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{label} file not found: {}", path.display()),
            ));
        }
    }

    RustlsConfig::from_pem_file(cert_path, key_path).await
}
