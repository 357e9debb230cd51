// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Client Configuration
//!
//! Connection settings for the base client, loaded from YAML and overridden
//! by the standard `VAULT_*` environment variables.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Address, credentials and transport options for [`crate::Client`]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::VaultError;

pub const DEFAULT_URL: &str = "http://localhost:8200";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Proxy map keys understood by the HTTP adapter.
pub const PROXY_SCHEMES: [&str; 3] = ["http", "https", "all"];

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base address of the Vault server, e.g. `https://vault.internal:8200`
    pub url: String,

    /// Token sent as `X-Vault-Token`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Enterprise namespace sent as `X-Vault-Namespace`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// PEM bundle used to verify the server certificate
    pub ca_cert: Option<PathBuf>,

    /// PEM client certificate for mutual TLS (requires `client_key`)
    pub client_cert: Option<PathBuf>,

    /// PEM private key matching `client_cert`
    pub client_key: Option<PathBuf>,

    /// Verify the server's TLS certificate
    pub verify: bool,

    /// Per-request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Proxy URLs keyed by scheme (`http`, `https` or `all`)
    pub proxies: BTreeMap<String, String>,

    /// Follow HTTP redirects
    pub allow_redirects: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            token: None,
            namespace: None,
            ca_cert: None,
            client_cert: None,
            client_key: None,
            verify: true,
            timeout: DEFAULT_TIMEOUT,
            proxies: BTreeMap::new(),
            allow_redirects: true,
        }
    }
}

// Tokens must never end up in logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("namespace", &self.namespace)
            .field("ca_cert", &self.ca_cert)
            .field("client_cert", &self.client_cert)
            .field("client_key", &self.client_key)
            .field("verify", &self.verify)
            .field("timeout", &self.timeout)
            .field("proxies", &self.proxies)
            .field("allow_redirects", &self.allow_redirects)
            .finish()
    }
}

impl ClientConfig {
    /// Configuration pointing at `url` with every other setting defaulted
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, VaultError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| VaultError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, VaultError> {
        serde_yaml::from_str(yaml)
            .map_err(|e| VaultError::config(format!("malformed YAML: {}", e)))
    }

    /// Discover configuration file using precedence order
    /// 1. VAULT_GPG_TRANSIT_CONFIG environment variable
    /// 2. ./vault-gpg-transit.yaml (working directory)
    /// 3. ~/.vault-gpg-transit/config.yaml (user home)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("VAULT_GPG_TRANSIT_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./vault-gpg-transit.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".vault-gpg-transit").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        None
    }

    /// Load configuration with discovery, fallback to default.
    ///
    /// Environment overrides and the `~/.vault-token` fallback are applied
    /// on top of whichever source was chosen.
    pub fn load_or_default(cli_path: Option<PathBuf>) -> Result<Self, VaultError> {
        let mut config = if let Some(path) = cli_path {
            tracing::info!("Loading client configuration from explicit path: {:?}", path);
            Self::from_yaml_file(&path)?
        } else if let Some(path) = Self::discover_config() {
            tracing::info!("Loading client configuration from discovered path: {:?}", path);
            Self::from_yaml_file(&path)?
        } else {
            tracing::debug!("No client configuration file found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        if let Some(home) = dirs::home_dir() {
            config.apply_token_file(home.join(".vault-token"));
        }
        Ok(config)
    }

    /// Apply the standard `VAULT_*` environment variables
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("VAULT_ADDR") {
            tracing::info!("Environment override: VAULT_ADDR={}", url);
            self.url = url;
        }
        if let Some(token) = lookup("VAULT_TOKEN") {
            tracing::info!("Environment override: VAULT_TOKEN=<redacted>");
            self.token = Some(token);
        }
        if let Some(namespace) = lookup("VAULT_NAMESPACE") {
            tracing::info!("Environment override: VAULT_NAMESPACE={}", namespace);
            self.namespace = Some(namespace);
        }
        if let Some(path) = lookup("VAULT_CACERT") {
            self.ca_cert = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("VAULT_CLIENT_CERT") {
            self.client_cert = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("VAULT_CLIENT_KEY") {
            self.client_key = Some(PathBuf::from(path));
        }

        if let Some(val) = lookup("VAULT_SKIP_VERIFY") {
            match val.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => {
                    tracing::info!("Environment override: VAULT_SKIP_VERIFY=true");
                    self.verify = false;
                }
                "false" | "0" | "no" | "off" => {
                    self.verify = true;
                }
                _ => {
                    tracing::warn!(
                        "Invalid value for VAULT_SKIP_VERIFY: '{}'. Expected true/false. Ignoring.",
                        val
                    );
                }
            }
        }

        if let Some(val) = lookup("VAULT_CLIENT_TIMEOUT") {
            match val.trim().trim_end_matches('s').parse::<u64>() {
                Ok(secs) => self.timeout = Duration::from_secs(secs),
                Err(_) => {
                    tracing::warn!(
                        "Invalid value for VAULT_CLIENT_TIMEOUT: '{}'. Expected seconds. Ignoring.",
                        val
                    );
                }
            }
        }
    }

    /// Fill in the token from a Vault token helper file when none is set.
    pub fn apply_token_file(&mut self, path: impl AsRef<Path>) {
        if self.token.is_some() {
            return;
        }
        if let Ok(contents) = std::fs::read_to_string(path.as_ref()) {
            let token = contents.trim();
            if !token.is_empty() {
                tracing::debug!("Using token from {:?}", path.as_ref());
                self.token = Some(token.to_string());
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), VaultError> {
        if self.url.is_empty() {
            return Err(VaultError::config("url must not be empty"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(VaultError::config(format!(
                "url '{}' must start with http:// or https://",
                self.url
            )));
        }
        match (&self.client_cert, &self.client_key) {
            (Some(_), None) => {
                return Err(VaultError::config("client_cert requires client_key"));
            }
            (None, Some(_)) => {
                return Err(VaultError::config("client_key requires client_cert"));
            }
            _ => {}
        }
        if self.timeout.is_zero() {
            return Err(VaultError::config("timeout must be greater than zero"));
        }
        if let Some(scheme) = self
            .proxies
            .keys()
            .find(|scheme| !PROXY_SCHEMES.contains(&scheme.as_str()))
        {
            return Err(VaultError::config(format!(
                "unknown proxy scheme '{}', expected one of: {}",
                scheme,
                PROXY_SCHEMES.join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.url, "http://localhost:8200");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.verify);
        assert!(config.allow_redirects);
        assert!(config.token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_str_partial() {
        let yaml = r#"
url: https://vault.example.com:8200
namespace: team-a
timeout: 5s
allow_redirects: false
proxies:
  https: http://proxy.local:3128
"#;
        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.url, "https://vault.example.com:8200");
        assert_eq!(config.namespace.as_deref(), Some("team-a"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.allow_redirects);
        assert!(config.verify);
        assert_eq!(
            config.proxies.get("https").map(String::as_str),
            Some("http://proxy.local:3128")
        );
    }

    #[test]
    fn test_from_yaml_str_rejects_garbage() {
        let err = ClientConfig::from_yaml_str("timeout: [not, a, duration]").unwrap_err();
        assert!(matches!(err, VaultError::Config(_)));
    }

    #[test]
    fn test_from_yaml_file_missing() {
        let err = ClientConfig::from_yaml_file("/nonexistent/vault.yaml").unwrap_err();
        assert!(matches!(err, VaultError::Io { .. }));
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "url: http://127.0.0.1:8201\n").unwrap();

        let config = ClientConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.url, "http://127.0.0.1:8201");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ClientConfig::default();
        config.apply_overrides(lookup_from(&[
            ("VAULT_ADDR", "https://vault:8200"),
            ("VAULT_TOKEN", "s.abc"),
            ("VAULT_NAMESPACE", "ns1"),
            ("VAULT_SKIP_VERIFY", "true"),
            ("VAULT_CLIENT_TIMEOUT", "12"),
        ]));

        assert_eq!(config.url, "https://vault:8200");
        assert_eq!(config.token.as_deref(), Some("s.abc"));
        assert_eq!(config.namespace.as_deref(), Some("ns1"));
        assert!(!config.verify);
        assert_eq!(config.timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let mut config = ClientConfig::default();
        config.apply_overrides(lookup_from(&[
            ("VAULT_SKIP_VERIFY", "maybe"),
            ("VAULT_CLIENT_TIMEOUT", "soon"),
        ]));

        assert!(config.verify);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_token_file_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".vault-token");
        std::fs::write(&path, "s.fromfile\n").unwrap();

        let mut config = ClientConfig::default();
        config.apply_token_file(&path);
        assert_eq!(config.token.as_deref(), Some("s.fromfile"));

        let mut config = ClientConfig::default().with_token("s.explicit");
        config.apply_token_file(&path);
        assert_eq!(config.token.as_deref(), Some("s.explicit"));
    }

    #[test]
    fn test_validate() {
        assert!(ClientConfig::new("").validate().is_err());
        assert!(ClientConfig::new("vault:8200").validate().is_err());
        assert!(ClientConfig::default()
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());

        let mut config = ClientConfig::default();
        config.client_cert = Some(PathBuf::from("/tmp/cert.pem"));
        assert!(config.validate().is_err());
        config.client_key = Some(PathBuf::from("/tmp/key.pem"));
        assert!(config.validate().is_ok());

        let mut config = ClientConfig::default();
        config
            .proxies
            .insert("socks".to_string(), "socks5://proxy:1080".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::default().with_token("s.supersecret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("s.supersecret"));
        assert!(rendered.contains("<redacted>"));
    }
}
