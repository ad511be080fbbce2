//! CLI administration tool for the URL shortener gateway.
//!
//! Talks to the remote URL storage service through the same gateway the HTTP
//! server uses, so retries and timeouts follow the service configuration.
//!
//! # Usage
//!
//! ```bash
//! # Store a URL under a generated alias
//! cargo run --bin admin -- save https://example.com
//!
//! # Store a URL under a chosen alias without prompting
//! cargo run --bin admin -- save https://example.com --alias docs --yes
//!
//! # Look up an alias
//! cargo run --bin admin -- resolve docs
//!
//! # Check the storage connection
//! cargo run --bin admin -- check
//! ```
//!
//! # Environment Variables
//!
//! - `URL_STORAGE_ADDRESS` (required): storage service address
//! - `URL_STORAGE_TIMEOUT_MS`, `URL_STORAGE_RETRIES`, `URL_STORAGE_RETRY_BACKOFF_MS`

use url_shortener_gateway::api::dto::save_url::SaveUrlRequest;
use url_shortener_gateway::application::services::UrlService;
use url_shortener_gateway::config::UrlStorageConfig;
use url_shortener_gateway::domain::CallContext;
use url_shortener_gateway::error::AppError;
use url_shortener_gateway::infrastructure::url_storage::{GrpcTransport, StorageGateway};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;
use validator::Validate;

/// CLI tool for the URL shortener gateway.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a URL under an alias
    Save {
        /// Destination URL (absolute)
        url: String,

        /// Alias to use (generated if not provided)
        #[arg(short, long)]
        alias: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print the URL stored under an alias
    Resolve {
        alias: String,
    },

    /// Check the storage connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let storage = UrlStorageConfig::from_env()?;
    storage.validate()?;

    match cli.command {
        Commands::Save { url, alias, yes } => save(&storage, url, alias, yes).await?,
        Commands::Resolve { alias } => resolve(&storage, &alias).await?,
        Commands::Check => check(&storage).await?,
    }

    Ok(())
}

async fn connect(storage: &UrlStorageConfig) -> Result<UrlService> {
    let gateway = StorageGateway::connect_with_policy(
        &storage.address,
        storage.timeout(),
        storage.retry_policy()?,
    )
    .await
    .context("Failed to connect to url storage")?;

    let gateway = Arc::new(gateway);
    Ok(UrlService::new(gateway.clone(), gateway))
}

/// Stores a URL with an interactive confirmation.
///
/// # Flow
///
/// 1. Validate the URL
/// 2. Confirm (unless `--yes` flag)
/// 3. Save through the gateway, generating an alias when none is given
///
/// Fails when the alias is already taken.
async fn save(
    storage: &UrlStorageConfig,
    url: String,
    alias: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Save URL".bright_blue().bold());
    println!();

    let request = SaveUrlRequest { url, alias };
    if let Err(e) = request.validate() {
        anyhow::bail!("{}", AppError::from(e));
    }

    println!("  URL:   {}", request.url.cyan());
    match request.alias.as_deref().filter(|a| !a.is_empty()) {
        Some(alias) => println!("  Alias: {}", alias.bright_yellow().bold()),
        None => println!("  Alias: {}", "(generated)".bright_black()),
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Save this URL?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = connect(storage).await?;

    let alias = service
        .shorten(&CallContext::background(), &request.url, request.alias)
        .await
        .context("Failed to save url")?;

    println!("{}", "✅ URL saved successfully!".green().bold());
    println!("  Alias: {}", alias.bright_yellow());
    println!();

    Ok(())
}

async fn resolve(storage: &UrlStorageConfig, alias: &str) -> Result<()> {
    let service = connect(storage).await?;

    match service.resolve(&CallContext::background(), alias).await {
        Ok(url) => println!("{} → {}", alias.cyan(), url.bright_white()),
        Err(AppError::NotFound { .. }) => println!("{}", "not found".yellow()),
        Err(e) => return Err(e).context("Failed to resolve alias"),
    }

    Ok(())
}

async fn check(storage: &UrlStorageConfig) -> Result<()> {
    println!(
        "{} {}",
        "🔍 Checking url storage connection:".bright_blue(),
        storage.address
    );

    GrpcTransport::connect(&storage.address, storage.timeout()).await?;

    println!("{}", "✅ URL storage connection OK".green().bold());

    Ok(())
}
