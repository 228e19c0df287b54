// ABOUTME: Demo data seeder for local development of the recommendation API
// ABOUTME: Creates the schema if needed and loads an idempotent demo catalog and users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

//! Demo data seeder for Pantry Chef.
//!
//! Usage:
//! ```bash
//! # Seed the database named by DATABASE_URL (or the default path)
//! cargo run --bin seed-demo-data
//!
//! # Seed a specific database with verbose output
//! cargo run --bin seed-demo-data -- --database-url sqlite:./data/dev.db -v
//! ```

use anyhow::Result;
use clap::Parser;
use pantry_chef_server::config::{DatabaseConfig, DatabaseUrl};
use pantry_chef_server::database::{seed::seed_demo_data, Database};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "Pantry Chef Demo Data Seeder",
    long_about = "Populate the database with demo lifestyles, tiers, ingredients, recipes, and users"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("=== Pantry Chef Demo Data Seeder ===");

    let mut config = DatabaseConfig::from_env()?;
    if let Some(database_url) = args.database_url.as_deref() {
        config.url = DatabaseUrl::parse_url(database_url)?;
    }

    info!("Connecting to database: {}", config.url);
    let database = Database::new(&config).await?;
    let summary = seed_demo_data(&database).await?;

    info!(
        "Seeding complete: {} ingredients, {} new recipes, {} demo users",
        summary.ingredients, summary.recipes_created, summary.users
    );
    Ok(())
}
