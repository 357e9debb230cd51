// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::path::PathBuf;

/// Errors raised by the base client and its secrets engines.
///
/// HTTP status codes are never mapped onto this type: a non-2xx response is
/// still a successful call and is returned to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("{0}")]
    ParamValidation(String),

    #[error("{operation} is not implemented")]
    NotImplemented { operation: &'static str },

    #[error("secrets engine not registered: {0}")]
    UnknownEngine(String),

    #[error("secrets engine already registered: {0}")]
    DuplicateEngine(String),

    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode request body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl VaultError {
    #[must_use]
    pub fn not_implemented(operation: &'static str) -> Self {
        Self::NotImplemented { operation }
    }

    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
