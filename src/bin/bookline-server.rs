// ABOUTME: Server binary for the Bookline scheduling backend
// ABOUTME: Loads config, wires shared resources, and serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! # Bookline Server Binary
//!
//! Starts the multi-tenant scheduling API with JWT authentication and
//! SQLite-backed storage.

use anyhow::Result;
use bookline::{
    auth::AuthManager, config::ServerConfig, context::ServerResources, database::Database,
    logging, notifications::EmailNotifier, routes,
};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "bookline-server")]
#[command(about = "Bookline - Multi-tenant scheduling API for small service businesses")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Bookline scheduling API");
    info!("{}", config.summary());

    let database = Database::new(&config.database_url.to_connection_string()).await?;
    info!("Database initialized: {}", config.database_url.to_connection_string());

    let auth_manager = AuthManager::new(
        config.auth.jwt_secret.as_bytes().to_vec(),
        config.auth.jwt_expiry_hours,
    );
    info!("Authentication manager initialized");

    let notifier = EmailNotifier::new(config.smtp.clone());
    if notifier.is_enabled() {
        info!("Email notifications enabled via {}", config.smtp.host.as_deref().unwrap_or(""));
    } else {
        info!("Email notifications disabled (no SMTP_HOST)");
    }

    let http_port = config.http_port;
    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        notifier,
        config,
    ));

    let app = routes::router(resources);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
