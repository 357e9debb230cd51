// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the vault-gpg CLI

pub mod config;
pub mod engines;
pub mod key;

pub use self::config::ConfigCommand;
pub use self::key::KeyCommand;
