//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, StorefrontConfig, API_URL_ENV};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force, json } => init_config(force, json, ctx),
        ConfigCommand::Path => show_path(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }
    if std::env::var_os(API_URL_ENV).is_some() {
        ctx.output.kv("override", API_URL_ENV);
    }

    let config = &ctx.config;

    ctx.output.info("[api]");
    ctx.output.kv("base_url", &config.api.base_url);
    ctx.output.kv("timeout_secs", &config.api.timeout_secs.to_string());

    ctx.output.info("[retry]");
    ctx.output.kv("base_delay_ms", &config.retry.base_delay_ms.to_string());
    ctx.output.kv("max_backoff_steps", &config.retry.max_backoff_steps.to_string());

    ctx.output.info("[checkout]");
    ctx.output.kv("submit_delay_ms", &config.checkout.submit_delay_ms.to_string());
    ctx.output.kv("currency", &config.checkout.currency);
    ctx.output.kv("tax_rate_bp", &config.checkout.tax_rate_bp.to_string());

    if let Err(e) = config.currency() {
        ctx.output.warn(&format!("{:#}", e));
    }

    Ok(())
}

fn init_config(force: bool, json: bool, ctx: &Context) -> Result<()> {
    let config_path = if json {
        ctx.cwd.join("storefront.json")
    } else {
        ctx.cwd.join("storefront.toml")
    };

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if json {
        StorefrontConfig::default().save(&config_path)?;
    } else {
        std::fs::write(&config_path, generate_default_config())?;
    }

    ctx.output.success(&format!("Created: {}", config_path.display()));
    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    match &ctx.config_path {
        Some(path) => {
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({ "path": path }));
            } else {
                println!("{}", path.display());
            }
            Ok(())
        }
        None => bail!("No config file found. Run `shop config init` to create one."),
    }
}
