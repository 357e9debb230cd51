// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # vault-gpg CLI
//!
//! Drives the OpenPGP transit-like engine of a Vault server running
//! vault-gpg-plugin.
//!
//! ## Commands
//!
//! - `vault-gpg key create <NAME> --key-type rsa-4096` - Generate a key in the plugin
//! - `vault-gpg engines` - List the secrets engines the client registers
//! - `vault-gpg config show|validate` - Inspect client configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{ConfigCommand, KeyCommand};
use vault_gpg_transit::ClientConfig;

/// Transit-like API for vault-gpg-plugin
#[derive(Parser)]
#[command(name = "vault-gpg")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to client configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "VAULT_GPG_TRANSIT_CONFIG",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Vault server address
    #[arg(long, global = true, env = "VAULT_ADDR")]
    url: Option<String>,

    /// Vault token
    #[arg(long, global = true, env = "VAULT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Vault Enterprise namespace
    #[arg(long, global = true, env = "VAULT_NAMESPACE")]
    namespace: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "VAULT_GPG_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Key operations on the OpenPGP engine
    #[command(name = "key")]
    Key {
        #[command(subcommand)]
        command: KeyCommand,
    },

    /// List registered secrets engines
    #[command(name = "engines")]
    Engines,

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

impl Cli {
    /// Configuration file and environment, then explicit flags on top
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::load_or_default(self.config.clone())
            .context("Failed to load client configuration")?;

        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if let Some(token) = &self.token {
            config.token = Some(token.clone());
        }
        if let Some(namespace) = &self.namespace {
            config.namespace = Some(namespace.clone());
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    let config = cli.client_config()?;

    match cli.command {
        Commands::Key { command } => commands::key::handle_command(command, config).await,
        Commands::Engines => commands::engines::list(config),
        Commands::Config { command } => commands::config::handle_command(command, config),
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    Ok(())
}
