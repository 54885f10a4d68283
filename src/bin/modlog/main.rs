// modlog - write and inspect per-component log files

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use modlog::{LoggerRegistry, LoggerRegistryConfig};
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{execute_ls, execute_size, execute_write};

/// Load registry configuration, format chosen by file extension
fn load_config(path: &Path) -> Result<LoggerRegistryConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => LoggerRegistryConfig::from_yaml(&content),
        Some("toml") => LoggerRegistryConfig::from_toml(&content),
        _ => LoggerRegistryConfig::from_json(&content),
    }
    .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(Path::new(path))?,
        None => LoggerRegistryConfig::default(),
    };
    let registry = LoggerRegistry::new(config)?;

    match &cli.command {
        Commands::Write(args) => execute_write(args, &registry)?,
        Commands::Size(args) => execute_size(args)?,
        Commands::Ls(args) => execute_ls(args, &registry)?,
    }

    registry.dispose_all();
    Ok(())
}
