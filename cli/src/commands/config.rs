// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use vault_gpg_transit::ClientConfig;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective client configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate the effective client configuration
    Validate,
}

pub fn handle_command(command: ConfigCommand, config: ClientConfig) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config, paths),
        ConfigCommand::Validate => validate(config),
    }
}

fn show(mut config: ClientConfig, show_paths: bool) -> Result<()> {
    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        println!(
            "  1. VAULT_GPG_TRANSIT_CONFIG: {}",
            std::env::var("VAULT_GPG_TRANSIT_CONFIG")
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  2. ./vault-gpg-transit.yaml");
        println!("  3. ~/.vault-gpg-transit/config.yaml");
        println!();
    }

    if config.token.is_some() {
        config.token = Some("<redacted>".to_string());
    }

    let yaml = serde_yaml::to_string(&config).context("Failed to render configuration")?;
    println!("{}", "Current configuration:".bold());
    println!("{}", yaml);

    Ok(())
}

fn validate(config: ClientConfig) -> Result<()> {
    config.validate().context("Configuration is invalid")?;
    println!("{} Configuration is valid", "✓".green());
    Ok(())
}
