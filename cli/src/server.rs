// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! HTTP server bootstrap
//!
//! Builds the repositories for the configured backend, wires the services
//! into the router and serves until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use cuboid_core::application::{create_repositories, StandardBagService, StandardCuboidService};
use cuboid_core::domain::service_config::ServiceConfigManifest;
use cuboid_core::presentation::api::app;

pub async fn start_server(config: ServiceConfigManifest) -> Result<()> {
    config
        .validate()
        .context("Configuration validation failed")?;

    info!(
        "Cuboid service starting: name={}, backend={:?}",
        config.metadata.name, config.spec.database.backend
    );

    let repositories = create_repositories(&config.storage_backend())
        .await
        .context("Failed to initialize storage")?;

    let cuboid_service = Arc::new(StandardCuboidService::new(
        repositories.bags.clone(),
        repositories.cuboids.clone(),
    ));
    let bag_service = Arc::new(StandardBagService::new(repositories.bags.clone()));

    let router = app(cuboid_service, bag_service);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Cuboid service shutting down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
