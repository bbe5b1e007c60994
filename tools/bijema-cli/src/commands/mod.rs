//! CLI command implementations.

pub mod analytics;
pub mod browse;
pub mod cart;
pub mod config;
pub mod guard;
pub mod query;

use clap::{Args, Subcommand};

/// Arguments for the query command.
#[derive(Args)]
pub struct QueryArgs {
    #[command(subcommand)]
    pub command: QueryCommand,
}

#[derive(Subcommand)]
pub enum QueryCommand {
    /// Decode a query string into its filter state.
    Parse {
        /// Query string, with or without a leading `?`.
        #[arg(default_value = "")]
        query: String,
    },
    /// Flip one value of a multi-valued filter.
    Toggle {
        /// Current query string.
        query: String,
        /// Filter key, e.g. `category`.
        key: String,
        /// Value to add or remove.
        value: String,
    },
    /// Remove one value, or the whole key when no value is given.
    Remove {
        /// Current query string.
        query: String,
        /// Filter key.
        key: String,
        /// Value to remove.
        value: Option<String>,
    },
    /// Merge key/value pairs into the query.
    Set {
        /// Current query string.
        query: String,
        /// `key=value` to set, `key=` to delete. Repeat for several keys.
        #[arg(short, long = "param", required = true)]
        params: Vec<String>,
    },
    /// Drop category, price and sort filters.
    Clear {
        /// Current query string.
        query: String,
    },
}

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Listing query string.
    #[arg(default_value = "")]
    pub query: String,

    /// Products JSON file (default: storefront.catalog).
    #[arg(long)]
    pub catalog: Option<String>,

    /// Show only the first N products.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    /// Cart actions: `add:<id>`, `remove:<id>`, `delete:<id>` or `clear`.
    pub actions: Vec<String>,

    /// Products JSON file (default: storefront.catalog).
    #[arg(long)]
    pub catalog: Option<String>,

    /// Delivery address id; builds the order draft when given.
    #[arg(short, long)]
    pub address: Option<String>,

    /// Payment method: `cod` or `mpesa`.
    #[arg(short, long, default_value = "mpesa")]
    pub payment: String,

    /// Customer id for the order draft.
    #[arg(short, long, default_value = "guest")]
    pub user: String,

    /// Delivery note for the order draft.
    #[arg(long)]
    pub note: Option<String>,
}

/// Arguments for the analytics command.
#[derive(Args)]
pub struct AnalyticsArgs {
    /// Orders JSON file (default: storefront.orders).
    #[arg(long)]
    pub orders: Option<String>,

    /// Stores JSON file (default: storefront.stores).
    #[arg(long)]
    pub stores: Option<String>,

    /// Products JSON file (default: storefront.catalog).
    #[arg(long)]
    pub catalog: Option<String>,

    /// Users JSON file (default: storefront.users).
    #[arg(long)]
    pub users: Option<String>,

    /// Also list orders with this status, e.g. `SHIPPED`.
    #[arg(short, long)]
    pub status: Option<String>,
}

/// Arguments for the guard command.
#[derive(Args)]
pub struct GuardArgs {
    /// Requested path, e.g. `/checkout`.
    pub path: String,

    /// Treat the request as having a session.
    #[arg(long)]
    pub signed_in: bool,
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
    },
}
