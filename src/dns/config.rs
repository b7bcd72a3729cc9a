//! Resolver configuration.

use super::validator::{HostnameValidator, ValidateName};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

/// Errors from loading a [`ResolverConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read resolver config: {0}")]
    Io(#[from] std::io::Error),

    /// The config is not valid JSON for this schema.
    #[error("failed to parse resolver config: {0}")]
    Parse(#[from] serde_json::Error),

    /// An override key is not a valid host name, or has no addresses.
    #[error("invalid override: {0}")]
    InvalidOverride(String),
}

/// Which upstream resolver ends the chain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Async lookups through hickory-dns.
    #[default]
    Hickory,
    /// `getaddrinfo` on a blocking thread.
    System,
    /// No upstream; only overrides and cache answer.
    None,
}

/// Cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Put a [`MemoryCache`](super::MemoryCache) in front of the backend.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of cached (name, family) entries.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: default_max_entries(),
        }
    }
}

/// Resolver configuration.
///
/// Every field has a default, so `{}` is a valid config: cache enabled,
/// hickory backend with the system nameservers, no overrides.
///
/// ```json
/// {
///   "overrides": { "api.local": ["127.0.0.1"] },
///   "cache": { "enabled": true, "max_entries": 1024 },
///   "backend": "hickory",
///   "nameservers": ["1.1.1.1:53"]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Fixed hostname-to-address answers, consulted first.
    #[serde(default)]
    pub overrides: HashMap<String, Vec<IpAddr>>,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub backend: Backend,

    /// Nameservers for the hickory backend. Empty means the system
    /// configuration.
    #[serde(default)]
    pub nameservers: Vec<SocketAddr>,

    /// Accept `_` in host names.
    #[serde(default)]
    pub allow_underscore: bool,
}

impl ResolverConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Validator matching this config.
    pub fn validator(&self) -> HostnameValidator {
        HostnameValidator::new().allow_underscore(self.allow_underscore)
    }

    /// Check override keys against the host name rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let validator = self.validator();
        for (host, addrs) in &self.overrides {
            if !validator.validate(host) {
                return Err(ConfigError::InvalidOverride(format!(
                    "not a valid host name: {host}"
                )));
            }
            if addrs.is_empty() {
                return Err(ConfigError::InvalidOverride(format!(
                    "no addresses for {host}"
                )));
            }
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_max_entries() -> usize {
    256
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_defaults() {
        let config = ResolverConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ResolverConfig::default());
        assert!(config.cache.enabled);
        assert_eq!(config.cache.max_entries, 256);
        assert_eq!(config.backend, Backend::Hickory);
        assert!(config.nameservers.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config = ResolverConfig::from_json_str(
            r#"{
                "overrides": { "api.local": ["127.0.0.1", "::1"] },
                "cache": { "enabled": false },
                "backend": "system",
                "nameservers": ["192.0.2.53:53"],
                "allow_underscore": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.overrides["api.local"].len(), 2);
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.max_entries, 256);
        assert_eq!(config.backend, Backend::System);
        assert_eq!(config.nameservers[0].port(), 53);
        assert!(config.validator().validate("_srv.example"));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let err =
            ResolverConfig::from_json_str(r#"{ "overrides": { "bad host": ["127.0.0.1"] } }"#)
                .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOverride(_)));

        let err = ResolverConfig::from_json_str(r#"{ "overrides": { "empty.local": [] } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOverride(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = ResolverConfig::from_json_str(r#"{ "backend": "carrier-pigeon" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "backend": "none" }}"#).unwrap();

        let config = ResolverConfig::from_file(file.path()).unwrap();
        assert_eq!(config.backend, Backend::None);

        let err = ResolverConfig::from_file(file.path().with_extension("missing")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
