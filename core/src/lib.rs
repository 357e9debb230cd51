// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Vault Client Core
//!
//! Base client for a Vault-compatible secret store. Extensions build on it
//! by appending secrets engines to the registry.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Configuration, HTTP transport and the secrets engine registry

pub mod adapter;
pub mod client;
pub mod config;
pub mod engines;
pub mod error;

pub use adapter::{Adapter, JsonAdapter};
pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use engines::{EngineFactory, SecretsEngine, SecretsEngines};
pub use error::VaultError;

/// Raw HTTP response handed back to callers without inspection.
pub use reqwest::Response;
