// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! OpenPGP Engine
//!
//! Transit-Secrets-Engine-like API backed by vault-gpg-plugin.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Translate transit-shaped calls into vault-gpg-plugin requests
//!
//! Only [`TransitApi::create_key`] reaches the plugin. Every other transit
//! operation fails with [`VaultError::NotImplemented`] without issuing a
//! request.

use async_trait::async_trait;
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, warn};

use vault_core::engines::transit::{
    CreateKeyOptions, DataKeyOptions, DecryptOptions, EncryptOptions, HmacOptions,
    KeyConfiguration, RestoreOptions, RewrapOptions, SignOptions, TransitApi, VerifyOptions,
};
use vault_core::{Adapter, Response, SecretsEngine, VaultError};

use crate::constants::{KeyType, ALLOWED_KEY_TYPES, DEFAULT_MOUNT_POINT};
use crate::error::Error;

/// Body of a key generation request to the plugin.
///
/// Identity fields are sent empty and the key is never exportable. Only the
/// size of the key type is transmitted; the plugin always generates RSA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateKeyRequest {
    pub comment: String,
    pub email: String,
    pub exportable: bool,
    pub generate: bool,
    pub key_bits: String,
    pub name: String,
    pub real_name: String,
}

impl CreateKeyRequest {
    pub fn new(name: &str, key_type: KeyType) -> Self {
        Self {
            comment: String::new(),
            email: String::new(),
            exportable: false,
            generate: true,
            key_bits: key_type.bits().to_string(),
            name: name.to_string(),
            real_name: String::new(),
        }
    }
}

pub struct OpenPgp {
    adapter: Arc<dyn Adapter>,
}

impl OpenPgp {
    pub const NAME: &'static str = "openpgp";

    pub fn new(adapter: Arc<dyn Adapter>) -> Self {
        Self { adapter }
    }

    pub fn factory(adapter: Arc<dyn Adapter>) -> Arc<dyn SecretsEngine> {
        Arc::new(Self::new(adapter))
    }
}

impl SecretsEngine for OpenPgp {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Reject transit options the plugin cannot honour, in a fixed order.
fn check_unsupported(options: &CreateKeyOptions) -> Result<(), Error> {
    let unsupported = [
        (options.convergent_encryption, "convergent encryption not supported"),
        (options.derived, "key derivation not supported"),
        (options.exportable, "exportable keys not supported"),
        (options.allow_plaintext_backup, "plaintext key backups not supported"),
    ];

    match unsupported
        .into_iter()
        .find(|(flag, _)| flag.unwrap_or(false))
    {
        Some((_, reason)) => Err(Error::unsupported(reason)),
        None => Ok(()),
    }
}

fn parse_key_type(key_type: Option<&str>) -> Result<KeyType, VaultError> {
    key_type
        .and_then(|key_type| key_type.parse::<KeyType>().ok())
        .ok_or_else(|| {
            VaultError::ParamValidation(format!(
                "invalid key_type argument provided \"{}\", supported types: \"{}\"",
                key_type.unwrap_or("None"),
                ALLOWED_KEY_TYPES.join(", "),
            ))
        })
}

fn not_implemented(operation: &'static str) -> Result<Response, Error> {
    warn!(operation, "OpenPGP engine does not implement this transit operation");
    Err(VaultError::not_implemented(operation).into())
}

#[async_trait]
impl TransitApi for OpenPgp {
    type Error = Error;

    async fn create_key(
        &self,
        name: &str,
        options: CreateKeyOptions,
        mount_point: Option<&str>,
    ) -> Result<Response, Error> {
        check_unsupported(&options)?;
        let key_type = parse_key_type(options.key_type.as_deref())?;

        let params = CreateKeyRequest::new(name, key_type);
        let body = serde_json::to_value(&params).map_err(VaultError::from)?;

        // The name is interpolated as given, without escaping.
        let api_path = format!(
            "/v1/{}/keys/{}",
            mount_point.unwrap_or(DEFAULT_MOUNT_POINT),
            name
        );
        debug!(name, key_bits = %params.key_bits, path = %api_path, "Creating OpenPGP key");

        Ok(self.adapter.post(&api_path, &body).await?)
    }

    async fn read_key(&self, _name: &str, _mount_point: Option<&str>) -> Result<Response, Error> {
        not_implemented("read_key")
    }

    async fn list_keys(&self, _mount_point: Option<&str>) -> Result<Response, Error> {
        not_implemented("list_keys")
    }

    async fn delete_key(&self, _name: &str, _mount_point: Option<&str>) -> Result<Response, Error> {
        not_implemented("delete_key")
    }

    async fn update_key_configuration(
        &self,
        _name: &str,
        _configuration: KeyConfiguration,
        _mount_point: Option<&str>,
    ) -> Result<Response, Error> {
        not_implemented("update_key_configuration")
    }

    async fn rotate_key(&self, _name: &str, _mount_point: Option<&str>) -> Result<Response, Error> {
        not_implemented("rotate_key")
    }

    async fn export_key(
        &self,
        _name: &str,
        _key_type: &str,
        _version: Option<&str>,
        _mount_point: Option<&str>,
    ) -> Result<Response, Error> {
        not_implemented("export_key")
    }

    async fn encrypt_data(
        &self,
        _name: &str,
        _plaintext: &str,
        _options: EncryptOptions,
        _mount_point: Option<&str>,
    ) -> Result<Response, Error> {
        not_implemented("encrypt_data")
    }

    async fn decrypt_data(
        &self,
        _name: &str,
        _ciphertext: &str,
        _options: DecryptOptions,
        _mount_point: Option<&str>,
    ) -> Result<Response, Error> {
        not_implemented("decrypt_data")
    }

    async fn rewrap_data(
        &self,
        _name: &str,
        _ciphertext: &str,
        _options: RewrapOptions,
        _mount_point: Option<&str>,
    ) -> Result<Response, Error> {
        not_implemented("rewrap_data")
    }

    async fn generate_data_key(
        &self,
        _name: &str,
        _key_type: &str,
        _options: DataKeyOptions,
        _mount_point: Option<&str>,
    ) -> Result<Response, Error> {
        not_implemented("generate_data_key")
    }

    async fn generate_random_bytes(
        &self,
        _n_bytes: Option<u32>,
        _output_format: Option<&str>,
        _mount_point: Option<&str>,
    ) -> Result<Response, Error> {
        not_implemented("generate_random_bytes")
    }

    async fn hash_data(
        &self,
        _hash_input: &str,
        _algorithm: Option<&str>,
        _output_format: Option<&str>,
        _mount_point: Option<&str>,
    ) -> Result<Response, Error> {
        not_implemented("hash_data")
    }

    async fn generate_hmac(
        &self,
        _name: &str,
        _hash_input: &str,
        _options: HmacOptions,
        _mount_point: Option<&str>,
    ) -> Result<Response, Error> {
        not_implemented("generate_hmac")
    }

    async fn sign_data(
        &self,
        _name: &str,
        _hash_input: &str,
        _options: SignOptions,
        _mount_point: Option<&str>,
    ) -> Result<Response, Error> {
        not_implemented("sign_data")
    }

    async fn verify_signed_data(
        &self,
        _name: &str,
        _hash_input: &str,
        _options: VerifyOptions,
        _mount_point: Option<&str>,
    ) -> Result<Response, Error> {
        not_implemented("verify_signed_data")
    }

    async fn backup_key(&self, _name: &str, _mount_point: Option<&str>) -> Result<Response, Error> {
        not_implemented("backup_key")
    }

    async fn restore_key(
        &self,
        _backup: &str,
        _options: RestoreOptions,
        _mount_point: Option<&str>,
    ) -> Result<Response, Error> {
        not_implemented("restore_key")
    }

    async fn trim_key(
        &self,
        _name: &str,
        _min_version: u64,
        _mount_point: Option<&str>,
    ) -> Result<Response, Error> {
        not_implemented("trim_key")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(f: impl FnOnce(&mut CreateKeyOptions)) -> CreateKeyOptions {
        let mut options = CreateKeyOptions::with_key_type("rsa-2048");
        f(&mut options);
        options
    }

    fn unsupported_reason(options: &CreateKeyOptions) -> Option<String> {
        match check_unsupported(options) {
            Err(Error::UnsupportedParam(reason)) => Some(reason),
            _ => None,
        }
    }

    #[test]
    fn test_request_body_shape() {
        let request = CreateKeyRequest::new("test-key", KeyType::Rsa3072);
        let body = serde_json::to_value(request).unwrap();
        assert_eq!(
            body,
            json!({
                "comment": "",
                "email": "",
                "exportable": false,
                "generate": true,
                "key_bits": "3072",
                "name": "test-key",
                "real_name": ""
            })
        );
    }

    #[test]
    fn test_unsupported_params_checked_in_order() {
        let all = options(|o| {
            o.convergent_encryption = Some(true);
            o.derived = Some(true);
            o.exportable = Some(true);
            o.allow_plaintext_backup = Some(true);
        });
        assert_eq!(
            unsupported_reason(&all).as_deref(),
            Some("convergent encryption not supported")
        );

        let later = options(|o| {
            o.derived = Some(true);
            o.allow_plaintext_backup = Some(true);
        });
        assert_eq!(
            unsupported_reason(&later).as_deref(),
            Some("key derivation not supported")
        );

        let last = options(|o| {
            o.exportable = Some(false);
            o.allow_plaintext_backup = Some(true);
        });
        assert_eq!(
            unsupported_reason(&last).as_deref(),
            Some("plaintext key backups not supported")
        );
    }

    #[test]
    fn test_unsupported_params_checked_without_key_type() {
        let opts = CreateKeyOptions {
            exportable: Some(true),
            ..CreateKeyOptions::default()
        };
        assert_eq!(
            unsupported_reason(&opts).as_deref(),
            Some("exportable keys not supported")
        );
    }

    #[test]
    fn test_explicit_false_is_accepted() {
        let opts = options(|o| {
            o.convergent_encryption = Some(false);
            o.derived = Some(false);
            o.exportable = Some(false);
            o.allow_plaintext_backup = Some(false);
        });
        assert!(check_unsupported(&opts).is_ok());
    }

    #[test]
    fn test_key_type_validation_message() {
        let err = parse_key_type(None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid key_type argument provided \"None\", supported types: \"rsa-2048, rsa-3072, rsa-4096\""
        );

        let err = parse_key_type(Some("rsa-1024")).unwrap_err();
        assert!(
            matches!(err, VaultError::ParamValidation(ref msg) if msg.contains("\"rsa-1024\""))
        );

        assert_eq!(parse_key_type(Some("rsa-4096")).unwrap(), KeyType::Rsa4096);
    }
}
