// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::ops::Deref;

use vault_core::{ClientBuilder, ClientConfig, SecretsEngines, VaultError};

use crate::openpgp::OpenPgp;

/// Vault client with the OpenPGP engine registered next to the built-in
/// secrets engines.
#[derive(Debug)]
pub struct Client {
    inner: vault_core::Client,
}

impl Client {
    /// Create a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, VaultError> {
        Self::from_builder(vault_core::Client::builder(config))
    }

    /// Finish a base client builder, appending the OpenPGP engine.
    ///
    /// Adapter or session overrides set on `builder` are kept.
    pub fn from_builder(builder: ClientBuilder) -> Result<Self, VaultError> {
        let inner = builder.engine(OpenPgp::factory).build()?;
        Ok(Self { inner })
    }

    /// Registered secrets engines
    pub fn secrets(&self) -> &SecretsEngines {
        self.inner.secrets()
    }

    pub fn into_inner(self) -> vault_core::Client {
        self.inner
    }
}

impl Deref for Client {
    type Target = vault_core::Client;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Access to the OpenPGP engine from the engine registry.
pub trait OpenPgpEngines {
    fn openpgp(&self) -> Result<&OpenPgp, VaultError>;
}

impl OpenPgpEngines for SecretsEngines {
    fn openpgp(&self) -> Result<&OpenPgp, VaultError> {
        self.engine::<OpenPgp>()
    }
}
