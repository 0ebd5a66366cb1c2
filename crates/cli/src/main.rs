//! Online store CLI - Database migrations and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! os-cli migrate
//!
//! # Load clients, categories and products from a YAML catalog
//! os-cli seed --file crates/cli/catalog.yaml
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the catalog from a YAML file

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "os-cli")]
#[command(author, version, about = "Online store CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed clients and the product catalog
    Seed {
        /// Path to the YAML catalog file
        #[arg(short, long, default_value = "crates/cli/catalog.yaml")]
        file: String,

        /// Validate the file without touching the database
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

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
        Commands::Seed { file, dry_run } => {
            let summary = commands::seed::catalog(&file, dry_run).await?;
            tracing::info!(
                clients = summary.clients,
                categories = summary.categories,
                products = summary.products,
                dry_run,
                "Seeding complete"
            );
        }
    }
    Ok(())
}
