// ABOUTME: Server binary for the Pantry Chef recommendation API
// ABOUTME: Loads configuration, opens the store, and serves HTTP until a shutdown signal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

//! # Pantry Chef Server Binary
//!
//! Starts the HTTP API. Configuration comes from the environment; the flags
//! below override individual values.

use anyhow::{anyhow, Result};
use clap::Parser;
use pantry_chef_server::{
    config::{environment::ServerConfig, DatabaseUrl},
    database::Database,
    logging,
    resources::ServerResourcesBuilder,
    server,
};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pantry-chef-server")]
#[command(about = "Pantry Chef - recipe recommendations that use up expiring ingredients")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (`sqlite:<path>` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(database_url)?;
    }
    config.validate()?;

    info!("Starting Pantry Chef server");
    info!("{}", config.summary());

    let database = Database::new(&config.database).await?;
    info!("Database initialized: {}", config.database.url);

    let resources = ServerResourcesBuilder::new()
        .with_database(database)
        .with_config(Arc::new(config.clone()))
        .build_arc()
        .map_err(|e| anyhow!(e))?;

    display_available_endpoints(&config);

    if let Err(e) = server::serve(resources, shutdown_signal()).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}

/// Display all available API endpoints
fn display_available_endpoints(config: &ServerConfig) {
    let host = &config.host;
    let port = config.http_port;

    info!("=== Available API Endpoints ===");
    info!("   Recommend:  POST http://{host}:{port}/api/recommendations");
    info!("   History:    GET  http://{host}:{port}/api/users/{{user_id}}/recommendations");
    info!("   Allergies:  POST http://{host}:{port}/api/users/{{user_id}}/allergies");
    info!("   Health:     GET  http://{host}:{port}/health");
    info!("   Readiness:  GET  http://{host}:{port}/ready");
    info!("=== End of Endpoint List ===");
}
