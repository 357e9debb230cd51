// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Fixed values understood by vault-gpg-plugin.

use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MOUNT_POINT: &str = "vault-gpg-plugin";

/// Key types accepted by `create_key`, in the order they are reported.
pub const ALLOWED_KEY_TYPES: [&str; 3] = ["rsa-2048", "rsa-3072", "rsa-4096"];

/// The plugin only generates RSA keys of these sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Rsa2048,
    Rsa3072,
    Rsa4096,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Rsa2048 => "rsa-2048",
            KeyType::Rsa3072 => "rsa-3072",
            KeyType::Rsa4096 => "rsa-4096",
        }
    }

    /// Size suffix of the key type string, e.g. `"4096"`
    pub fn bits(&self) -> &'static str {
        // Every variant is `<algorithm>-<bits>`.
        self.as_str()
            .split_once('-')
            .map(|(_, bits)| bits)
            .unwrap_or_default()
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rsa-2048" => Ok(KeyType::Rsa2048),
            "rsa-3072" => Ok(KeyType::Rsa3072),
            "rsa-4096" => Ok(KeyType::Rsa4096),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_key_types_parse() {
        for key_type in ALLOWED_KEY_TYPES {
            let parsed: KeyType = key_type.parse().unwrap();
            assert_eq!(parsed.as_str(), key_type);
        }
    }

    #[test]
    fn test_bits() {
        assert_eq!(KeyType::Rsa2048.bits(), "2048");
        assert_eq!(KeyType::Rsa3072.bits(), "3072");
        assert_eq!(KeyType::Rsa4096.bits(), "4096");
    }

    #[test]
    fn test_rejects_unlisted_types() {
        for key_type in ["rsa-1024", "RSA-2048", "ed25519", "aes256-gcm96", "", "rsa-2048 "] {
            assert!(key_type.parse::<KeyType>().is_err(), "{key_type} should be rejected");
        }
    }
}
