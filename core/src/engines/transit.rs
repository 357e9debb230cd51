// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Transit API
//!
//! Operation surface of an encryption-as-a-service engine, modelled on
//! Vault's transit secrets engine. Engines that mimic transit implement
//! [`TransitApi`]; operations a backend cannot serve must fail with
//! [`VaultError::NotImplemented`] rather than be left out.
//!
//! Every operation takes an optional mount point as its last argument;
//! `None` selects the implementing engine's default mount.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::VaultError;
use crate::Response;

/// Options accepted when creating a named key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateKeyOptions {
    pub convergent_encryption: Option<bool>,
    pub derived: Option<bool>,
    pub exportable: Option<bool>,
    pub allow_plaintext_backup: Option<bool>,
    /// Key type string, e.g. `aes256-gcm96` or `rsa-4096`
    pub key_type: Option<String>,
}

impl CreateKeyOptions {
    pub fn with_key_type(key_type: impl Into<String>) -> Self {
        Self {
            key_type: Some(key_type.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyConfiguration {
    pub min_decryption_version: Option<u64>,
    pub min_encryption_version: Option<u64>,
    pub deletion_allowed: Option<bool>,
    pub exportable: Option<bool>,
    pub allow_plaintext_backup: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncryptOptions {
    pub context: Option<String>,
    pub key_version: Option<u64>,
    pub nonce: Option<String>,
    pub batch_input: Option<Vec<Value>>,
    pub key_type: Option<String>,
    pub convergent_encryption: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecryptOptions {
    pub context: Option<String>,
    pub nonce: Option<String>,
    pub batch_input: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewrapOptions {
    pub context: Option<String>,
    pub key_version: Option<u64>,
    pub nonce: Option<String>,
    pub batch_input: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataKeyOptions {
    pub context: Option<String>,
    pub nonce: Option<String>,
    pub bits: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HmacOptions {
    pub key_version: Option<u64>,
    pub algorithm: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignOptions {
    pub key_version: Option<u64>,
    pub hash_algorithm: Option<String>,
    pub context: Option<String>,
    pub prehashed: Option<bool>,
    pub signature_algorithm: Option<String>,
    pub marshaling_algorithm: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyOptions {
    pub signature: Option<String>,
    pub hmac: Option<String>,
    pub hash_algorithm: Option<String>,
    pub context: Option<String>,
    pub prehashed: Option<bool>,
    pub signature_algorithm: Option<String>,
    pub marshaling_algorithm: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreOptions {
    pub name: Option<String>,
    pub force: Option<bool>,
}

/// Transit-like secrets engine operations.
#[async_trait]
pub trait TransitApi: Send + Sync {
    type Error: From<VaultError> + std::error::Error + Send + Sync + 'static;

    async fn create_key(
        &self,
        name: &str,
        options: CreateKeyOptions,
        mount_point: Option<&str>,
    ) -> Result<Response, Self::Error>;

    async fn read_key(
        &self,
        name: &str,
        mount_point: Option<&str>,
    ) -> Result<Response, Self::Error>;

    async fn list_keys(&self, mount_point: Option<&str>) -> Result<Response, Self::Error>;

    async fn delete_key(
        &self,
        name: &str,
        mount_point: Option<&str>,
    ) -> Result<Response, Self::Error>;

    async fn update_key_configuration(
        &self,
        name: &str,
        configuration: KeyConfiguration,
        mount_point: Option<&str>,
    ) -> Result<Response, Self::Error>;

    async fn rotate_key(
        &self,
        name: &str,
        mount_point: Option<&str>,
    ) -> Result<Response, Self::Error>;

    async fn export_key(
        &self,
        name: &str,
        key_type: &str,
        version: Option<&str>,
        mount_point: Option<&str>,
    ) -> Result<Response, Self::Error>;

    async fn encrypt_data(
        &self,
        name: &str,
        plaintext: &str,
        options: EncryptOptions,
        mount_point: Option<&str>,
    ) -> Result<Response, Self::Error>;

    async fn decrypt_data(
        &self,
        name: &str,
        ciphertext: &str,
        options: DecryptOptions,
        mount_point: Option<&str>,
    ) -> Result<Response, Self::Error>;

    async fn rewrap_data(
        &self,
        name: &str,
        ciphertext: &str,
        options: RewrapOptions,
        mount_point: Option<&str>,
    ) -> Result<Response, Self::Error>;

    async fn generate_data_key(
        &self,
        name: &str,
        key_type: &str,
        options: DataKeyOptions,
        mount_point: Option<&str>,
    ) -> Result<Response, Self::Error>;

    async fn generate_random_bytes(
        &self,
        n_bytes: Option<u32>,
        output_format: Option<&str>,
        mount_point: Option<&str>,
    ) -> Result<Response, Self::Error>;

    async fn hash_data(
        &self,
        hash_input: &str,
        algorithm: Option<&str>,
        output_format: Option<&str>,
        mount_point: Option<&str>,
    ) -> Result<Response, Self::Error>;

    async fn generate_hmac(
        &self,
        name: &str,
        hash_input: &str,
        options: HmacOptions,
        mount_point: Option<&str>,
    ) -> Result<Response, Self::Error>;

    async fn sign_data(
        &self,
        name: &str,
        hash_input: &str,
        options: SignOptions,
        mount_point: Option<&str>,
    ) -> Result<Response, Self::Error>;

    async fn verify_signed_data(
        &self,
        name: &str,
        hash_input: &str,
        options: VerifyOptions,
        mount_point: Option<&str>,
    ) -> Result<Response, Self::Error>;

    async fn backup_key(
        &self,
        name: &str,
        mount_point: Option<&str>,
    ) -> Result<Response, Self::Error>;

    async fn restore_key(
        &self,
        backup: &str,
        options: RestoreOptions,
        mount_point: Option<&str>,
    ) -> Result<Response, Self::Error>;

    async fn trim_key(
        &self,
        name: &str,
        min_version: u64,
        mount_point: Option<&str>,
    ) -> Result<Response, Self::Error>;
}
