//! TechMart CLI - browse and shop the TechMart storefront from a terminal.
//!
//! Commands:
//! - `techmart browse` - List a category as variant groups
//! - `techmart product` - Show a product and its variants
//! - `techmart categories` - Show the category tree
//! - `techmart cart` - Show a user's cart
//! - `techmart orders` - List, inspect and cancel orders
//! - `techmart search` - Save a homepage search for the next browse
//! - `techmart checkout` - Place an order
//! - `techmart config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    BrowseArgs, CartArgs, CategoriesArgs, CheckoutArgs, ConfigArgs, OrdersArgs, ProductArgs,
    SearchArgs,
};

/// TechMart CLI - browse the catalog, carts and orders
#[derive(Parser)]
#[command(name = "techmart")]
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
    /// List a category, one line per variant family
    Browse(BrowseArgs),

    /// Show a product with its variants
    Product(ProductArgs),

    /// Show the category tree
    Categories(CategoriesArgs),

    /// Show a user's cart
    Cart(CartArgs),

    /// Work with orders
    Orders(OrdersArgs),

    /// Save or inspect a pending homepage search
    Search(SearchArgs),

    /// Place an order from the cart or a single product
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Log to stderr. `RUST_LOG` wins; otherwise `warn`, or `debug` for our
/// crates with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,techmart_client=debug,techmart_catalog=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
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
    ctx.output.debug(&format!("Backend: {}", ctx.config.api.base_url));

    // Execute command
    let result = match cli.command {
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Categories(args) => commands::categories::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_browse_with_filters() {
        let cli = Cli::try_parse_from([
            "techmart", "browse", "laptop", "--brand", "asus", "--attr", "RAM=16GB",
            "--max-price", "30000000", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Browse(args) => {
                assert_eq!(args.category, "laptop");
                assert_eq!(args.attributes, vec![("RAM".to_string(), "16GB".to_string())]);
                assert_eq!(args.max_price, Some(30_000_000.0));
                assert_eq!(args.facets, vec!["RAM", "Storage", "Color"]);
            }
            _ => panic!("expected browse"),
        }
    }
}
