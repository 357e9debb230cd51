// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! HTTP Adapter
//!
//! Transport abstraction shared by every secrets engine. Engines only ever
//! see API paths (`/v1/...`); the adapter owns the base address,
//! authentication headers and the pooled HTTP session.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Issue requests against the Vault API and hand back raw responses

use async_trait::async_trait;
use reqwest::{Certificate, Identity, Method, Proxy, Response};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::VaultError;

pub const TOKEN_HEADER: &str = "X-Vault-Token";
pub const NAMESPACE_HEADER: &str = "X-Vault-Namespace";

/// Transport used by secrets engines.
///
/// Responses are returned as received. Non-2xx statuses are not errors at
/// this level; only transport failures are.
#[async_trait]
pub trait Adapter: Send + Sync {
    async fn request(
        &self,
        method: Method,
        url: &str,
        json: Option<&Value>,
    ) -> Result<Response, VaultError>;

    async fn get(&self, url: &str) -> Result<Response, VaultError> {
        self.request(Method::GET, url, None).await
    }

    async fn post(&self, url: &str, json: &Value) -> Result<Response, VaultError> {
        self.request(Method::POST, url, Some(json)).await
    }

    async fn put(&self, url: &str, json: &Value) -> Result<Response, VaultError> {
        self.request(Method::PUT, url, Some(json)).await
    }

    async fn delete(&self, url: &str) -> Result<Response, VaultError> {
        self.request(Method::DELETE, url, None).await
    }

    /// Vault's LIST verb, sent as `GET ?list=true`
    async fn list(&self, url: &str) -> Result<Response, VaultError> {
        let url = format!("{}?list=true", url);
        self.request(Method::GET, &url, None).await
    }
}

/// Adapter that sends JSON bodies over a shared reqwest session.
#[derive(Debug, Clone)]
pub struct JsonAdapter {
    base_url: String,
    token: Option<String>,
    namespace: Option<String>,
    session: reqwest::Client,
}

impl JsonAdapter {
    /// Build an adapter and its HTTP session from client configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self, VaultError> {
        let session = Self::build_session(config)?;
        Ok(Self::with_session(config, session))
    }

    /// Build an adapter around a caller-supplied session.
    ///
    /// TLS, proxy, timeout and redirect settings in `config` are ignored;
    /// they belong to the session.
    pub fn with_session(config: &ClientConfig, session: reqwest::Client) -> Self {
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            namespace: config.namespace.clone(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_session(config: &ClientConfig) -> Result<reqwest::Client, VaultError> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.verify);

        if !config.allow_redirects {
            builder = builder.redirect(reqwest::redirect::Policy::none());
        }

        if let Some(path) = &config.ca_cert {
            let pem = read_pem(path)?;
            builder = builder.add_root_certificate(Certificate::from_pem(&pem)?);
        }

        if let (Some(cert), Some(key)) = (&config.client_cert, &config.client_key) {
            let mut pem = read_pem(cert)?;
            pem.extend(read_pem(key)?);
            builder = builder.identity(Identity::from_pem(&pem)?);
        }

        for (scheme, url) in &config.proxies {
            let proxy = match scheme.as_str() {
                "http" => Proxy::http(url.as_str())?,
                "https" => Proxy::https(url.as_str())?,
                "all" => Proxy::all(url.as_str())?,
                other => {
                    return Err(VaultError::config(format!("unknown proxy scheme '{}'", other)));
                }
            };
            builder = builder.proxy(proxy);
        }

        Ok(builder.build()?)
    }
}

fn read_pem(path: &Path) -> Result<Vec<u8>, VaultError> {
    std::fs::read(path).map_err(|source| VaultError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[async_trait]
impl Adapter for JsonAdapter {
    async fn request(
        &self,
        method: Method,
        url: &str,
        json: Option<&Value>,
    ) -> Result<Response, VaultError> {
        let full_url = format!("{}{}", self.base_url, url);
        debug!(method = %method, url = %full_url, "Sending Vault request");

        let mut req = self.session.request(method, &full_url);

        if let Some(token) = &self.token {
            req = req.header(TOKEN_HEADER, token);
        }
        if let Some(namespace) = &self.namespace {
            req = req.header(NAMESPACE_HEADER, namespace);
        }
        if let Some(body) = json {
            req = req.json(body);
        }

        let response = req.send().await?;
        debug!(status = %response.status(), "Vault response received");

        Ok(response)
    }
}
