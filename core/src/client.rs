// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::adapter::{Adapter, JsonAdapter};
use crate::config::ClientConfig;
use crate::engines::{EngineFactory, SecretsEngines};
use crate::error::VaultError;

/// Client for a Vault-compatible secret store.
pub struct Client {
    config: ClientConfig,
    adapter: Arc<dyn Adapter>,
    secrets: SecretsEngines,
}

impl Client {
    /// Create a client with the built-in secrets engines
    pub fn new(config: ClientConfig) -> Result<Self, VaultError> {
        Self::builder(config).build()
    }

    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder {
            config,
            adapter: None,
            session: None,
            engines: Vec::new(),
        }
    }

    /// Registered secrets engines
    pub fn secrets(&self) -> &SecretsEngines {
        &self.secrets
    }

    pub fn adapter(&self) -> &Arc<dyn Adapter> {
        &self.adapter
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn namespace(&self) -> Option<&str> {
        self.config.namespace.as_deref()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("secrets", &self.secrets)
            .finish()
    }
}

/// Builder for [`Client`].
///
/// An explicit adapter takes precedence over a session; with neither, a
/// [`JsonAdapter`] is built from the configuration.
pub struct ClientBuilder {
    config: ClientConfig,
    adapter: Option<Arc<dyn Adapter>>,
    session: Option<reqwest::Client>,
    engines: Vec<EngineFactory>,
}

impl ClientBuilder {
    /// Replace the HTTP adapter entirely
    pub fn adapter(mut self, adapter: Arc<dyn Adapter>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Reuse an existing HTTP session
    pub fn session(mut self, session: reqwest::Client) -> Self {
        self.session = Some(session);
        self
    }

    /// Append a secrets engine after the built-in ones
    pub fn engine(mut self, factory: EngineFactory) -> Self {
        self.engines.push(factory);
        self
    }

    pub fn build(self) -> Result<Client, VaultError> {
        self.config.validate()?;

        let adapter: Arc<dyn Adapter> = match (self.adapter, self.session) {
            (Some(adapter), _) => adapter,
            (None, Some(session)) => Arc::new(JsonAdapter::with_session(&self.config, session)),
            (None, None) => Arc::new(JsonAdapter::from_config(&self.config)?),
        };

        let secrets = SecretsEngines::with_engines(adapter.clone(), &self.engines)?;

        info!(
            url = %self.config.url,
            engines = ?secrets.names().collect::<Vec<_>>(),
            "Vault client initialized"
        );

        Ok(Client {
            config: self.config,
            adapter,
            secrets,
        })
    }
}
