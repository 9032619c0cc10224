//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration from a TOML file.
///
/// A missing file is not an error: the gateway falls back to defaults the
/// same way the process runs without an env file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Config file not found, using defaults");
        return Ok(GatewayConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config(Path::new("/nonexistent/gateway.toml")).unwrap();
        assert_eq!(config.gateway.name, "gateway");
        assert_eq!(config.gateway.scheme_path, ".scheme");
        assert_eq!(config.hsts.max_age, 31_536_000);
    }

    #[test]
    fn test_partial_config_parses() {
        let path = std::env::temp_dir().join("gateway-config-partial.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(
            br#"
host = "example.com"

[gateway]
name = "edge"
scheme_path = "/etc/gateway/.scheme"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.host, "example.com");
        assert_eq!(config.gateway.name, "edge");
        assert_eq!(config.listener.http_address, "0.0.0.0:80");
        assert!(config.listener.tls.is_none());
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let path = std::env::temp_dir().join("gateway-config-bad.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"host = [broken").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
    }
}
