// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use vault_core::VaultError;

/// Errors raised by the OpenPGP engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transit option the GPG plugin has no equivalent for
    #[error("unsupported parameter: {0}")]
    UnsupportedParam(String),

    #[error(transparent)]
    Vault(#[from] VaultError),
}

impl Error {
    #[must_use]
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedParam(reason.into())
    }

    pub fn is_unsupported_param(&self) -> bool {
        matches!(self, Self::UnsupportedParam(_))
    }

    pub fn is_param_validation(&self) -> bool {
        matches!(self, Self::Vault(VaultError::ParamValidation(_)))
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::Vault(VaultError::NotImplemented { .. }))
    }
}
