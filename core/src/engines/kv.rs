// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! KV version 2 secrets engine

use serde_json::{json, Map, Value};
use std::any::Any;
use std::sync::Arc;

use crate::adapter::Adapter;
use crate::engines::SecretsEngine;
use crate::error::VaultError;
use crate::Response;

pub const DEFAULT_MOUNT_POINT: &str = "secret";

pub struct KvV2 {
    adapter: Arc<dyn Adapter>,
}

impl KvV2 {
    pub const NAME: &'static str = "kv";

    pub fn new(adapter: Arc<dyn Adapter>) -> Self {
        Self { adapter }
    }

    pub fn factory(adapter: Arc<dyn Adapter>) -> Arc<dyn SecretsEngine> {
        Arc::new(Self::new(adapter))
    }

    /// Read a secret, optionally at a specific version
    pub async fn read_secret_version(
        &self,
        path: &str,
        version: Option<u64>,
        mount_point: Option<&str>,
    ) -> Result<Response, VaultError> {
        let mut url = format!(
            "/v1/{}/data/{}",
            mount_point.unwrap_or(DEFAULT_MOUNT_POINT),
            path
        );
        if let Some(version) = version {
            url.push_str(&format!("?version={}", version));
        }
        self.adapter.get(&url).await
    }

    /// Write a new version of a secret.
    ///
    /// With `cas` set the write only succeeds if the current version matches.
    pub async fn create_or_update_secret(
        &self,
        path: &str,
        secret: Map<String, Value>,
        cas: Option<u64>,
        mount_point: Option<&str>,
    ) -> Result<Response, VaultError> {
        let mut params = json!({ "data": secret });
        if let Some(cas) = cas {
            params["options"] = json!({ "cas": cas });
        }

        let url = format!(
            "/v1/{}/data/{}",
            mount_point.unwrap_or(DEFAULT_MOUNT_POINT),
            path
        );
        self.adapter.post(&url, &params).await
    }

    pub async fn list_secrets(
        &self,
        path: &str,
        mount_point: Option<&str>,
    ) -> Result<Response, VaultError> {
        let url = format!(
            "/v1/{}/metadata/{}",
            mount_point.unwrap_or(DEFAULT_MOUNT_POINT),
            path
        );
        self.adapter.list(&url).await
    }

    pub async fn delete_metadata_and_all_versions(
        &self,
        path: &str,
        mount_point: Option<&str>,
    ) -> Result<Response, VaultError> {
        let url = format!(
            "/v1/{}/metadata/{}",
            mount_point.unwrap_or(DEFAULT_MOUNT_POINT),
            path
        );
        self.adapter.delete(&url).await
    }
}

impl SecretsEngine for KvV2 {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
