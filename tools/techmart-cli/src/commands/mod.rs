//! CLI command implementations.

pub mod browse;
pub mod cart;
pub mod categories;
pub mod checkout;
pub mod config;
pub mod orders;
pub mod product;
pub mod search;

use clap::{Args, Subcommand};

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Category alias from the config (e.g. `laptop`) or numeric id.
    pub category: String,

    /// Brand substring.
    #[arg(short, long)]
    pub brand: Option<String>,

    /// Product name substring.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Lowest price, inclusive.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Highest price, inclusive.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Attribute filter as NAME=VALUE (repeatable).
    #[arg(short, long = "attr", value_parser = parse_key_value)]
    pub attributes: Vec<(String, String)>,

    /// Facets shown per group.
    #[arg(long, value_delimiter = ',', default_value = "RAM,Storage,Color")]
    pub facets: Vec<String>,

    /// Sort order: featured, price-asc, price-desc, name, stock.
    #[arg(long, default_value = "featured")]
    pub sort: String,

    /// List the brand and facet values available in the category.
    #[arg(long)]
    pub options: bool,

    /// Ignore a pending homepage search.
    #[arg(long)]
    pub fresh: bool,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: i64,

    /// Also show reviews.
    #[arg(long)]
    pub reviews: bool,

    /// Also show accessories.
    #[arg(long)]
    pub accessories: bool,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Print the flat list instead of the tree.
    #[arg(long)]
    pub flat: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    /// User id.
    pub user: i64,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List orders.
    List {
        /// Only orders of this user.
        #[arg(short, long)]
        user: Option<i64>,

        /// Only orders with this status (pending, confirmed, shipped, delivered, cancelled).
        #[arg(short, long)]
        status: Option<String>,

        /// Keyword search.
        #[arg(short, long)]
        keyword: Option<String>,
    },
    /// Show one order with its items.
    Show {
        /// Order id.
        id: i64,
    },
    /// Order counts and revenue.
    Stats,
    /// Every ordered product across all orders.
    Report,
    /// Status history of an order.
    History {
        /// Order id.
        id: i64,
    },
    /// Cancel an order.
    Cancel {
        /// Order id.
        id: i64,

        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    #[command(subcommand)]
    pub command: SearchCommand,
}

#[derive(Subcommand)]
pub enum SearchCommand {
    /// Save a homepage search for the next `browse`.
    Put {
        /// Brand substring.
        #[arg(short, long)]
        brand: Option<String>,

        /// Product name substring.
        #[arg(short, long)]
        search: Option<String>,

        /// Lowest price; 0 means no bound.
        #[arg(long)]
        min_price: Option<f64>,

        /// Highest price; 0 means no bound.
        #[arg(long)]
        max_price: Option<f64>,
    },
    /// Show the pending search without consuming it.
    Show,
    /// Discard the pending search.
    Clear,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// User id.
    #[arg(short, long)]
    pub user: i64,

    /// Buy one product now instead of checking out the cart.
    #[arg(long)]
    pub product: Option<i64>,

    /// Quantity for `--product`.
    #[arg(short, long, default_value = "1")]
    pub quantity: i64,

    /// Street and house number.
    #[arg(long)]
    pub street: String,

    /// District.
    #[arg(long)]
    pub district: String,

    /// City or province.
    #[arg(long)]
    pub city: String,

    /// Delivery note.
    #[arg(long)]
    pub note: Option<String>,

    /// Contact phone.
    #[arg(long)]
    pub phone: String,

    /// Contact email.
    #[arg(long)]
    pub email: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
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
        /// Backend base URL.
        #[arg(long, default_value = "http://localhost:8080/api")]
        base_url: String,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    if key.trim().is_empty() {
        return Err(format!("empty attribute name in '{}'", s));
    }
    Ok((key.trim().to_string(), value.trim().to_string()))
}
