//! Configuration management commands.

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    let storefront = &ctx.config.storefront;
    ctx.output.info("[storefront]");
    ctx.output.kv("currency", &storefront.currency);
    ctx.output.kv("shipping_fee", &storefront.shipping_fee.to_string());
    let files = [
        ("catalog", &storefront.catalog),
        ("orders", &storefront.orders),
        ("stores", &storefront.stores),
        ("users", &storefront.users),
    ];
    for (key, path) in files {
        if let Some(path) = path {
            ctx.output.kv(key, path);
        }
    }

    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    ctx.output.kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());

    let access = &ctx.config.access;
    ctx.output.info("[access]");
    ctx.output.kv("protected_routes", &access.protected_routes.join(", "));
    ctx.output.kv("auth_routes", &access.auth_routes.join(", "));
    ctx.output.kv("login_path", &access.login_path);
    ctx.output.kv("home_path", &access.home_path);

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    tokio::fs::write(&config_path, generate_default_config())
        .await
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
