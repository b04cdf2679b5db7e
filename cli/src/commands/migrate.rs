// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Database Migrate Command
//!
//! Applies pending schema migrations to the configured PostgreSQL database.
//!
//! # Usage
//!
//! ```bash
//! # Apply all pending migrations
//! cuboid migrate
//!
//! # Preview migrations without applying
//! cuboid migrate --dry-run
//! ```
//!
//! The database URL comes from `spec.database.url` or `CUBOID_DATABASE_URL`.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use sqlx::postgres::PgPoolOptions;

use cuboid_core::domain::service_config::ServiceConfigManifest;
use cuboid_core::infrastructure::db::MIGRATOR;

#[derive(Args)]
pub struct MigrateCommand {
    /// List pending migrations without applying them
    #[arg(long)]
    dry_run: bool,
}

pub async fn execute(cmd: MigrateCommand, config: &ServiceConfigManifest) -> Result<()> {
    println!("{}", "Cuboid Migrate".bold().green());

    let database_url = config
        .spec
        .database
        .url
        .as_deref()
        .filter(|url| !url.is_empty())
        .context("No database URL configured. Set spec.database.url or CUBOID_DATABASE_URL.")?;

    println!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    // The tracking table does not exist before the first run
    let applied_count = sqlx::query("SELECT version FROM _sqlx_migrations")
        .fetch_all(&pool)
        .await
        .map(|rows| rows.len())
        .unwrap_or(0);

    let total_migrations = MIGRATOR.iter().count();

    println!(
        "Migration status: {} applied, {} total available.",
        applied_count, total_migrations
    );

    if applied_count >= total_migrations {
        println!("{}", "✓ Database is up to date.".green());
        return Ok(());
    }

    if cmd.dry_run {
        println!("Pending migrations:");
        for migration in MIGRATOR.iter().skip(applied_count) {
            println!(" - {} {}", migration.version, migration.description);
        }
        println!("{}", "Skipping application due to --dry-run".yellow());
        return Ok(());
    }

    println!("Applying pending migrations...");
    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;
    println!("{}", "✓ Database updated successfully.".green());

    Ok(())
}
