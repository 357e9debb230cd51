// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use anyhow::{Context, Result};
use colored::Colorize;

use vault_gpg_transit::{Client, ClientConfig};

pub fn list(config: ClientConfig) -> Result<()> {
    let client = Client::new(config).context("Failed to create Vault client")?;

    println!("{}", "Registered secrets engines:".bold());
    for (index, name) in client.secrets().names().enumerate() {
        println!("  {}. {}", index + 1, name);
    }

    Ok(())
}
