// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use mockito::Matcher;
use reqwest::Method;
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use vault_core::{Adapter, Client, ClientConfig, JsonAdapter, Response, VaultError};

/// Adapter that counts requests before forwarding them.
struct CountingAdapter {
    inner: JsonAdapter,
    calls: AtomicUsize,
}

#[async_trait]
impl Adapter for CountingAdapter {
    async fn request(
        &self,
        method: Method,
        url: &str,
        json: Option<&Value>,
    ) -> Result<Response, VaultError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.request(method, url, json).await
    }
}

#[tokio::test]
async fn test_kv_read_secret_version() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/v1/secret/data/app/db".to_string()))
        .match_query(Matcher::UrlEncoded("version".into(), "3".into()))
        .match_header("x-vault-token", "s.root")
        .with_status(200)
        .with_body(r#"{"data":{"data":{"password":"hunter2"}}}"#)
        .create_async()
        .await;

    let client = Client::new(ClientConfig::new(server.url()).with_token("s.root")).unwrap();
    let response = client
        .secrets()
        .kv()
        .unwrap()
        .read_secret_version("app/db", Some(3), None)
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["data"]["password"], "hunter2");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_kv_create_with_cas_on_custom_mount() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/apps/data/billing")
        .match_body(Matcher::Json(json!({
            "data": {"api_key": "abc"},
            "options": {"cas": 0}
        })))
        .with_status(200)
        .create_async()
        .await;

    let client = Client::new(ClientConfig::new(server.url())).unwrap();
    let mut secret = Map::new();
    secret.insert("api_key".to_string(), json!("abc"));

    client
        .secrets()
        .kv()
        .unwrap()
        .create_or_update_secret("billing", secret, Some(0), Some("apps"))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_kv_delete_returns_raw_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/v1/secret/metadata/gone")
        .with_status(404)
        .create_async()
        .await;

    let client = Client::new(ClientConfig::new(server.url())).unwrap();
    let response = client
        .secrets()
        .kv()
        .unwrap()
        .delete_metadata_and_all_versions("gone", None)
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_adapter_override_is_used_by_engines() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/v1/secret/metadata/".to_string()))
        .with_status(200)
        .create_async()
        .await;

    let config = ClientConfig::new(server.url());
    let adapter = Arc::new(CountingAdapter {
        inner: JsonAdapter::from_config(&config).unwrap(),
        calls: AtomicUsize::new(0),
    });

    let client = Client::builder(config).adapter(adapter.clone()).build().unwrap();
    client
        .secrets()
        .kv()
        .unwrap()
        .list_secrets("", None)
        .await
        .unwrap();

    assert_eq!(adapter.calls.load(Ordering::SeqCst), 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_session_override() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/secret/data/app")
        .match_header("x-vault-namespace", "ops")
        .with_status(200)
        .create_async()
        .await;

    let config = ClientConfig::new(server.url()).with_namespace("ops");
    let client = Client::builder(config)
        .session(reqwest::Client::new())
        .build()
        .unwrap();

    assert_eq!(client.namespace(), Some("ops"));
    client
        .secrets()
        .kv()
        .unwrap()
        .read_secret_version("app", None, None)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = Client::new(ClientConfig::new("not-a-url")).unwrap_err();
    assert!(matches!(err, VaultError::Config(_)));
}
