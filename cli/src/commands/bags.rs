// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use cuboid_sdk::{BagRequest, CuboidClient};

use super::cuboids::print_table;

#[derive(Subcommand)]
pub enum BagsCommand {
    /// List all bags with their remaining capacity
    List {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a bag and the cuboids it holds
    Show {
        #[arg(value_name = "BAG_ID")]
        id: i64,
    },

    /// Create an empty bag
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        volume: f64,
    },

    /// Delete a bag together with its cuboids
    Delete {
        #[arg(value_name = "BAG_ID")]
        id: i64,
    },
}

pub async fn handle_command(command: BagsCommand, client: CuboidClient) -> Result<()> {
    match command {
        BagsCommand::List { json } => {
            let bags = client.list_bags().await.context("Failed to list bags")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&bags)?);
                return Ok(());
            }
            if bags.is_empty() {
                println!("{}", "No bags found".yellow());
                return Ok(());
            }

            println!("{} bags found:", bags.len());
            println!(
                "{:<8} {:<24} {:>10} {:>10} {:>10} {:>8}",
                "ID", "TITLE", "VOLUME", "PAYLOAD", "AVAILABLE", "CUBOIDS"
            );
            for bag in bags {
                println!(
                    "{:<8} {:<24} {:>10} {:>10} {:>10} {:>8}",
                    bag.id,
                    bag.title.bold(),
                    bag.volume,
                    bag.payload_volume,
                    bag.available_volume,
                    bag.cuboids.len()
                );
            }
            Ok(())
        }
        BagsCommand::Show { id } => {
            let bag = client
                .get_bag(id)
                .await
                .with_context(|| format!("Failed to fetch bag {}", id))?;

            println!("{} {}", "Bag".bold(), bag.title.bold());
            println!("  ID: {}", bag.id);
            println!("  Volume: {}", bag.volume);
            println!("  Payload: {}", bag.payload_volume);
            println!("  Available: {}", bag.available_volume);
            println!();
            if bag.cuboids.is_empty() {
                println!("{}", "  (empty)".dimmed());
            } else {
                print_table(&bag.cuboids);
            }
            Ok(())
        }
        BagsCommand::Create { title, volume } => {
            let bag = client
                .create_bag(&BagRequest::new(title, volume))
                .await
                .context("Failed to create bag")?;
            println!(
                "{}",
                format!("✓ Bag {} '{}' created (volume {})", bag.id, bag.title, bag.volume).green()
            );
            Ok(())
        }
        BagsCommand::Delete { id } => {
            client
                .delete_bag(id)
                .await
                .with_context(|| format!("Failed to delete bag {}", id))?;
            println!("{}", format!("✓ Bag {} deleted", id).green());
            Ok(())
        }
    }
}
