//! O'Plaisir CLI - database migrations and content management.
//!
//! # Usage
//!
//! ```bash
//! # Create or update the documents table
//! oplaisir-cli migrate
//!
//! # Insert starter products and testimonials into empty collections
//! oplaisir-cli seed
//!
//! # List collections with their document counts
//! oplaisir-cli collections
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string (required)
//! - `DATABASE_MAX_CONNECTIONS` - Pool size (default 5)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "oplaisir-cli")]
#[command(author, version, about = "O'Plaisir API CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed starter products and testimonials into empty collections
    Seed,
    /// List collections and their document counts
    Collections,
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "oplaisir_cli=info,oplaisir_api=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed => commands::seed::run().await,
        Commands::Collections => commands::collections::run().await,
    }
}
