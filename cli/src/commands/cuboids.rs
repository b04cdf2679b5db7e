// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use cuboid_sdk::{CuboidClient, CuboidRequest, CuboidResponse};

#[derive(Subcommand)]
pub enum CuboidsCommand {
    /// List all cuboids
    List {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one cuboid
    Show {
        #[arg(value_name = "CUBOID_ID")]
        id: i64,
    },

    /// Put a new cuboid into a bag
    Create {
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
        #[arg(long)]
        depth: f64,
        #[arg(long = "bag", value_name = "BAG_ID")]
        bag_id: i64,
    },

    /// Change a cuboid's dimensions or move it to another bag
    Update {
        #[arg(value_name = "CUBOID_ID")]
        id: i64,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
        #[arg(long)]
        depth: f64,
        #[arg(long = "bag", value_name = "BAG_ID")]
        bag_id: i64,
    },

    /// Remove a cuboid
    Delete {
        #[arg(value_name = "CUBOID_ID")]
        id: i64,
    },
}

pub async fn handle_command(command: CuboidsCommand, client: CuboidClient) -> Result<()> {
    match command {
        CuboidsCommand::List { json } => list(&client, json).await,
        CuboidsCommand::Show { id } => {
            let cuboid = client
                .get_cuboid(id)
                .await
                .with_context(|| format!("Failed to fetch cuboid {}", id))?;
            print_table(&[cuboid]);
            Ok(())
        }
        CuboidsCommand::Create { width, height, depth, bag_id } => {
            let cuboid = client
                .create_cuboid(&CuboidRequest::new(width, height, depth, bag_id))
                .await
                .context("Failed to create cuboid")?;
            println!(
                "{}",
                format!("✓ Cuboid {} created in bag {} (volume {})", cuboid.id, cuboid.bag_id, cuboid.volume)
                    .green()
            );
            Ok(())
        }
        CuboidsCommand::Update { id, width, height, depth, bag_id } => {
            let cuboid = client
                .update_cuboid(id, &CuboidRequest::new(width, height, depth, bag_id))
                .await
                .with_context(|| format!("Failed to update cuboid {}", id))?;
            println!(
                "{}",
                format!("✓ Cuboid {} updated (volume {})", cuboid.id, cuboid.volume).green()
            );
            Ok(())
        }
        CuboidsCommand::Delete { id } => {
            client
                .delete_cuboid(id)
                .await
                .with_context(|| format!("Failed to delete cuboid {}", id))?;
            println!("{}", format!("✓ Cuboid {} deleted", id).green());
            Ok(())
        }
    }
}

async fn list(client: &CuboidClient, json: bool) -> Result<()> {
    let cuboids = client.list_cuboids().await.context("Failed to list cuboids")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&cuboids)?);
        return Ok(());
    }

    if cuboids.is_empty() {
        println!("{}", "No cuboids found".yellow());
        return Ok(());
    }

    println!("{} cuboids found:", cuboids.len());
    print_table(&cuboids);
    Ok(())
}

pub(crate) fn print_table(cuboids: &[CuboidResponse]) {
    println!(
        "{:<8} {:>10} {:>10} {:>10} {:>12} {:>8}",
        "ID", "WIDTH", "HEIGHT", "DEPTH", "VOLUME", "BAG"
    );
    for c in cuboids {
        println!(
            "{:<8} {:>10} {:>10} {:>10} {:>12} {:>8}",
            c.id.to_string().bold(),
            c.width,
            c.height,
            c.depth,
            c.volume,
            c.bag_id
        );
    }
}
