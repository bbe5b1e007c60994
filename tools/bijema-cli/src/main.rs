//! Bijema CLI - Command line tool for the Bijema storefront.
//!
//! Commands:
//! - `bijema query` - Parse and transform listing query strings
//! - `bijema browse` - Show the product listing for a query
//! - `bijema cart` - Replay cart actions and price the result
//! - `bijema analytics` - Admin dashboard figures
//! - `bijema guard` - Check a route against the access rules
//! - `bijema config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AnalyticsArgs, BrowseArgs, CartArgs, ConfigArgs, GuardArgs, QueryArgs};

/// Bijema CLI - Inspect storefront filters, carts and analytics
#[derive(Parser)]
#[command(name = "bijema")]
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
    /// Parse or transform a listing query string
    Query(QueryArgs),

    /// Show the product listing for a query string
    Browse(BrowseArgs),

    /// Replay cart actions and print the pricing
    Cart(CartArgs),

    /// Print the admin analytics report
    Analytics(AnalyticsArgs),

    /// Decide whether a route proceeds or redirects
    Guard(GuardArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output).await?;

    logging::init(&ctx.config.logging, cli.verbose);

    // Execute command
    let result = match cli.command {
        Commands::Query(args) => commands::query::run(args, &ctx).await,
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Analytics(args) => commands::analytics::run(args, &ctx).await,
        Commands::Guard(args) => commands::guard::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
