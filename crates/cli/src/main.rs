//! Product Catalog CLI - schema setup, seeding and lookups.
//!
//! # Usage
//!
//! ```bash
//! # Ensure the catalog schema exists
//! catalog-cli migrate
//!
//! # Insert 25 random products
//! catalog-cli seed --count 25
//!
//! # Print products as JSON lines
//! catalog-cli list
//! catalog-cli list --category FOOD
//! catalog-cli list --available false
//! catalog-cli list --price 12.50
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//! - `RUST_LOG` - Log filter (default: `product_catalog=info`)
//! - `LOG_FORMAT` - Set to `json` for structured log output

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{ArgGroup, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(author, version, about = "Product catalog CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the catalog schema if it does not exist
    Migrate,
    /// Insert randomly generated products
    Seed {
        /// Number of products to create
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
    /// Print stored products, optionally filtered by one attribute
    #[command(group(ArgGroup::new("filter").args(["name", "available", "category", "price"])))]
    List {
        /// Exact product name
        #[arg(long)]
        name: Option<String>,

        /// Availability flag (`true` or `false`)
        #[arg(long)]
        available: Option<bool>,

        /// Category name (e.g. `FOOD`, `TOOLS`)
        #[arg(long)]
        category: Option<String>,

        /// Exact price (e.g. `12.50`)
        #[arg(long)]
        price: Option<String>,
    },
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "product_catalog=info,product_catalog_cli=info".into());

    // JSON for log shippers, text for terminals
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { count } => commands::seed::run(count).await?,
        Commands::List {
            name,
            available,
            category,
            price,
        } => {
            let filter = commands::list::parse_filter(name, available, category, price)?;
            commands::list::run(filter).await?;
        }
    }
    Ok(())
}
