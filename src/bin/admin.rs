//! CLI administration tool for linkpulse.
//!
//! Reads the PostgreSQL store directly, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Totals
//! cargo run --bin admin -- stats
//!
//! # Newest short URLs
//! cargo run --bin admin -- urls list --limit 20
//!
//! # One short URL
//! cargo run --bin admin -- urls show xY3kP2
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_HOST`, `DB_USER`, ...): PostgreSQL connection
//! - `BASE_URL` (optional): prefix used to print short URLs

use linkpulse::api::dto::pagination::MAX_LIMIT;
use linkpulse::application::services::RedirectService;
use linkpulse::config::{Config, mask_connection_string};
use linkpulse::domain::entities::UrlMapping;
use linkpulse::infrastructure::persistence::PgUrlRepository;
use linkpulse::infrastructure::realtime::NullNotifier;
use linkpulse::utils::short_url::build_short_url;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing linkpulse.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show total URLs and clicks
    Stats,

    /// Inspect short URLs
    Urls {
        #[command(subcommand)]
        action: UrlsAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UrlsAction {
    /// List short URLs, newest first
    List {
        /// Maximum number of rows to print (1-1000)
        #[arg(
            short,
            long,
            default_value_t = 20,
            value_parser = clap::value_parser!(i64).range(1..=MAX_LIMIT)
        )]
        limit: i64,
    },

    /// Show one short URL
    Show {
        /// Short code
        code: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url().context("DATABASE_URL must be set")?;
    let base_url =
        std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    let service = RedirectService::new(
        Arc::new(PgUrlRepository::new(Arc::new(pool.clone()))),
        Arc::new(NullNotifier),
    );

    match cli.command {
        Commands::Stats => handle_stats(&service).await?,
        Commands::Urls { action } => handle_urls_action(action, &service, &base_url).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_stats(service: &RedirectService) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (total_urls, total_clicks) = service.summary().await?;

    println!(
        "  URLs:   {}",
        total_urls.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        total_clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_urls_action(
    action: UrlsAction,
    service: &RedirectService,
    base_url: &str,
) -> Result<()> {
    match action {
        UrlsAction::List { limit } => {
            let mappings = service.list(0, Some(limit)).await?;

            if mappings.is_empty() {
                println!("{}", "No short URLs yet".yellow());
                return Ok(());
            }

            println!("{}", "🔗 Short URLs".bright_blue().bold());
            println!();
            println!(
                "  {:<10} {:>8}  {:<20}  {}",
                "CODE".bold(),
                "CLICKS".bold(),
                "CREATED".bold(),
                "URL".bold()
            );

            for mapping in &mappings {
                println!(
                    "  {:<10} {:>8}  {:<20}  {}",
                    code_label(mapping),
                    mapping.clicks,
                    mapping.created_at.format("%Y-%m-%d %H:%M:%S"),
                    mapping.original_url
                );
            }
            println!();
        }
        UrlsAction::Show { code } => {
            let mapping = match service.get_stats(&code).await {
                Ok(mapping) => mapping,
                Err(linkpulse::AppError::NotFound { .. }) => {
                    println!("{}", format!("❌ Short code '{}' not found", code).red());
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            println!("{}", "🔗 Short URL".bright_blue().bold());
            println!();
            println!("  Code:      {}", mapping.short_code.bright_white().bold());
            println!(
                "  Short URL: {}",
                build_short_url(base_url, &mapping.short_code)
            );
            println!("  Target:    {}", mapping.original_url);
            println!(
                "  Clicks:    {}",
                mapping.clicks.to_string().bright_green().bold()
            );
            println!("  Created:   {}", mapping.created_at.to_rfc3339());

            match mapping.expires_at {
                Some(expiry) if mapping.is_expired_at(Utc::now()) => {
                    println!("  Expires:   {} {}", expiry.to_rfc3339(), "(expired)".red());
                }
                Some(expiry) => println!("  Expires:   {}", expiry.to_rfc3339()),
                None => println!("  Expires:   {}", "never".dimmed()),
            }
            println!();
        }
    }

    Ok(())
}

fn code_label(mapping: &UrlMapping) -> ColoredString {
    if mapping.is_expired_at(Utc::now()) {
        mapping.short_code.as_str().dimmed()
    } else {
        mapping.short_code.as_str().normal()
    }
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations);
            println!();
        }
    }

    Ok(())
}
