//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { base_url, force } => init_config(&base_url, force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&redacted(&ctx.config));
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    ctx.output.kv("asset_origin", &ctx.config.api.asset_origin);
    if ctx.config.api.token.is_some() {
        ctx.output.kv("token", "(set)");
    }

    ctx.output.info("");
    ctx.output.info("[categories]");
    for (name, id) in &ctx.config.categories {
        ctx.output.kv(name, &id.to_string());
    }

    ctx.output.info("");
    ctx.output.info("[checkout]");
    ctx.output
        .kv("shipping_fee", &ctx.config.checkout.shipping_fee.to_string());

    Ok(())
}

/// The config with the token masked.
fn redacted(config: &CliConfig) -> CliConfig {
    let mut shown = config.clone();
    if shown.api.token.is_some() {
        shown.api.token = Some("***".to_string());
    }
    shown
}

async fn init_config(base_url: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("techmart.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config(base_url))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Collect errors and warnings.
fn check_config(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    for (key, value) in [
        ("api.base_url", &config.api.base_url),
        ("api.asset_origin", &config.api.asset_origin),
    ] {
        if reqwest::Url::parse(value).is_err() {
            errors.push(format!("{} is not a valid URL: '{}'", key, value));
        }
    }

    if !config.api.base_url.trim_end_matches('/').ends_with("/api") {
        warnings.push("api.base_url usually ends with /api".to_string());
    }

    if config.checkout.shipping_fee < 0.0 || !config.checkout.shipping_fee.is_finite() {
        errors.push("checkout.shipping_fee must be a non-negative amount".to_string());
    }

    for (name, id) in &config.categories {
        if *id <= 0 {
            errors.push(format!("categories.{} must be a positive id", name));
        }
        if name.to_lowercase() != *name {
            warnings.push(format!(
                "categories.{} is matched lowercased; rename it to '{}'",
                name,
                name.to_lowercase()
            ));
        }
    }

    (errors, warnings)
}
