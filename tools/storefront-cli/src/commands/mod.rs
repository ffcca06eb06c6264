//! CLI command implementations.

pub mod config;
pub mod product;
pub mod products;
pub mod session;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Free-text search over title, description and category.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show products in this category.
    #[arg(short, long)]
    pub category: Option<String>,

    /// List the categories instead of products.
    #[arg(long, conflicts_with_all = ["search", "category"])]
    pub categories: bool,

    /// Retries after a failed fetch, with linear backoff.
    #[arg(short, long, default_value = "0")]
    pub retries: u32,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: String,
}

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    /// Seed the search box before the first listing.
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// Write JSON instead of TOML.
        #[arg(long)]
        json: bool,
    },
    /// Print the path of the config file in use.
    Path,
}
