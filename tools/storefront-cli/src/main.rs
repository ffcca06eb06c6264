//! Storefront CLI - browse the catalog, fill a cart and check out.
//!
//! Commands:
//! - `shop products` - List or search products
//! - `shop product <ID>` - Show one product
//! - `shop session` - Interactive shopping session
//! - `shop config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConfigArgs, ProductArgs, ProductsArgs, SessionArgs};

/// Storefront CLI - Shop the product catalog from your terminal
#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List and search products
    Products(ProductsArgs),

    /// Show details for one product
    Product(ProductArgs),

    /// Start an interactive shopping session
    Session(SessionArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };
    if let Some(path) = &ctx.config_path {
        ctx.output.debug(&format!("Using config {}", path.display()));
    }

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Session(args) => commands::session::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
