// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Key commands against the OpenPGP engine

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use tracing::debug;

use vault_gpg_transit::{
    Client, ClientConfig, CreateKeyOptions, OpenPgpEngines, TransitApi, DEFAULT_MOUNT_POINT,
};

#[derive(Subcommand)]
pub enum KeyCommand {
    /// Generate a new key in vault-gpg-plugin
    Create {
        /// Key name
        name: String,

        /// Key type: rsa-2048, rsa-3072 or rsa-4096
        #[arg(short = 't', long)]
        key_type: Option<String>,

        /// Mount point of the plugin
        #[arg(short, long, default_value = DEFAULT_MOUNT_POINT)]
        mount_point: String,
    },
}

pub async fn handle_command(command: KeyCommand, config: ClientConfig) -> Result<()> {
    match command {
        KeyCommand::Create {
            name,
            key_type,
            mount_point,
        } => create(config, &name, key_type, &mount_point).await,
    }
}

async fn create(
    config: ClientConfig,
    name: &str,
    key_type: Option<String>,
    mount_point: &str,
) -> Result<()> {
    let client = Client::new(config).context("Failed to create Vault client")?;

    let options = CreateKeyOptions {
        key_type,
        ..CreateKeyOptions::default()
    };

    let response = client
        .secrets()
        .openpgp()?
        .create_key(name, options, Some(mount_point))
        .await
        .with_context(|| format!("Failed to create key '{}'", name))?;

    let status = response.status();
    debug!(name, mount_point, status = %status, "Key creation response");

    let body = response
        .text()
        .await
        .context("Failed to read Vault response")?;

    if !status.is_success() {
        anyhow::bail!("Vault rejected key '{}' (HTTP {}): {}", name, status, body);
    }

    println!(
        "{} Created key {} at {} (HTTP {})",
        "✓".green(),
        name.bold(),
        mount_point.cyan(),
        status.as_u16()
    );
    if !body.trim().is_empty() {
        println!("{}", body);
    }

    Ok(())
}
