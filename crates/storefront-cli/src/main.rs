use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use storefront_core::filter::{CategoryFilter, SortOrder};
use tracing_subscriber::EnvFilter;

mod app;
mod commands;

use crate::app::bootstrap::{BootstrapOptions, bootstrap};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront CLI - browse the product catalog and build a cart", long_about = None)]
struct Cli {
    /// Use this directory for config and cache instead of the platform directories
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep the catalog cache in memory for this run only
    #[arg(long, global = true)]
    no_cache: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of products
    Products {
        /// Category to show, or "all"
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,

        /// default, price-asc, price-desc, name-asc or name-desc
        #[arg(short, long, default_value_t = SortOrder::Default)]
        sort: SortOrder,

        /// Case-insensitive text matched against title, category and description
        #[arg(short = 'q', long, default_value = "")]
        search: String,

        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Bypass the catalog cache
        #[arg(long)]
        refresh: bool,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// List categories with their product counts
    Categories,
    /// Show one product with its rating and related products
    Product { id: String },
    /// Fetch the catalog from the network, ignoring the cache
    Refresh,
    /// Delete the persisted catalog cache
    ClearCache,
    /// Add products to a cart in order and print the cart
    Cart {
        /// Product ids; repeat an id to add it again
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Interactive search: each stdin line replaces the search term
    Search,
    /// Print the effective configuration
    Config,
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = BootstrapOptions {
        data_dir: cli.data_dir,
        persistent_cache: !cli.no_cache,
    };
    let app = bootstrap(&options).await?;
    let state = &app.app_state;

    match cli.command {
        Commands::Products {
            category,
            sort,
            search,
            page,
            refresh,
            json,
        } => {
            let query = commands::products::ProductQuery {
                category,
                sort,
                search,
                page,
                refresh,
            };
            commands::products::list(state, query, json).await?
        }
        Commands::Categories => commands::categories::list(state).await?,
        Commands::Product { id } => commands::product::show(state, &id).await?,
        Commands::Refresh => commands::refresh::run(state).await?,
        Commands::ClearCache => commands::cache::clear(state).await?,
        Commands::Cart { ids } => commands::cart::add(state, &ids).await?,
        Commands::Search => commands::search::interactive(state).await?,
        Commands::Config => commands::config::show(state)?,
    }

    Ok(())
}
