//! Configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    #[default]
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Command line configuration.
#[derive(Debug, Parser)]
#[command(name = "shopcart", about = "Shop catalog, discounts and cart pricing", long_about = None)]
pub struct Config {
    /// Shop fixture to load
    #[arg(
        short,
        long,
        env = "SHOPCART_FIXTURE",
        default_value = "fixtures/demo.yml",
        global = true
    )]
    pub fixture: PathBuf,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the items the shop sells
    Items,

    /// List the discounts on offer
    Discounts,

    /// Run cart actions and show the resulting cart
    Cart(CartArgs),
}

/// Arguments for the cart command
#[derive(Debug, Args)]
pub struct CartArgs {
    /// Actions to apply in order: add:<item>, inc:<item>, dec:<item>,
    /// discount:<key>, remove-discount:<key>, goto:<shop|discounts|cart>, back, pay
    pub actions: Vec<String>,
}
