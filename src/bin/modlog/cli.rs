// CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use modlog::{LogLevel, LoggerStrategy};

#[derive(Parser, Debug)]
#[command(name = "modlog")]
#[command(version = "0.1.0")]
#[command(about = "Write and inspect per-component log files", long_about = None)]
pub struct Cli {
    /// Path to registry config file (yaml, toml or json5, chosen by extension)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Append one record through a named logger
    Write(WriteArgs),
    /// Show the size of a file
    Size(SizeArgs),
    /// List log files in a folder with their sizes
    Ls(LsArgs),
}

#[derive(Args, Debug)]
pub struct WriteArgs {
    /// Logger name
    #[arg(short, long)]
    pub name: String,

    /// Message text
    pub message: String,

    /// Severity: info, warn, debug, error
    #[arg(short, long, default_value = "info")]
    pub level: LogLevel,

    /// Strategy: single-file or multi-file (default from config)
    #[arg(short, long)]
    pub strategy: Option<LoggerStrategy>,

    /// Log folder (default from config)
    #[arg(short, long)]
    pub folder: Option<String>,

    /// Max file size in bytes, 0 uses the configured default
    #[arg(long, default_value = "0")]
    pub max_size: u64,

    /// Attach an error with this type name
    #[arg(long)]
    pub error_type: Option<String>,

    /// Message of the attached error
    #[arg(long, default_value = "")]
    pub error_message: String,
}

#[derive(Args, Debug)]
pub struct SizeArgs {
    /// File path
    pub path: String,

    /// Decimal places in the formatted size
    #[arg(short, long, default_value = "2")]
    pub decimal_places: usize,
}

#[derive(Args, Debug)]
pub struct LsArgs {
    /// Folder to list (default from config)
    pub folder: Option<String>,

    /// Decimal places in the formatted size
    #[arg(short, long, default_value = "2")]
    pub decimal_places: usize,
}
