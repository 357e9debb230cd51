// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Transit-Secrets-Engine-like API for vault-gpg-plugin
//!
//! Extends the base Vault client with an `openpgp` secrets engine that
//! speaks the transit API shape on top of the GPG plugin. Only key creation
//! is backed by the plugin today; the rest of the transit surface is
//! declared and fails with a not-implemented error.
//!
//! ```ignore
//! use vault_gpg_transit::{Client, ClientConfig, CreateKeyOptions, OpenPgpEngines, TransitApi};
//!
//! let client = Client::new(ClientConfig::new("https://vault:8200").with_token(token))?;
//! let response = client
//!     .secrets()
//!     .openpgp()?
//!     .create_key("release-signing", CreateKeyOptions::with_key_type("rsa-4096"), None)
//!     .await?;
//! ```

pub mod client;
pub mod constants;
pub mod error;
pub mod openpgp;

pub use client::{Client, OpenPgpEngines};
pub use constants::{KeyType, ALLOWED_KEY_TYPES, DEFAULT_MOUNT_POINT};
pub use error::Error;
pub use openpgp::{CreateKeyRequest, OpenPgp};

pub use vault_core::engines::transit::{
    CreateKeyOptions, DataKeyOptions, DecryptOptions, EncryptOptions, HmacOptions,
    KeyConfiguration, RestoreOptions, RewrapOptions, SignOptions, TransitApi, VerifyOptions,
};
pub use vault_core::{ClientConfig, Response, VaultError};
