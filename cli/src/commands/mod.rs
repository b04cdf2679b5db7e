// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the cuboid CLI

pub mod bags;
pub mod config;
pub mod cuboids;
pub mod migrate;

pub use self::bags::BagsCommand;
pub use self::config::ConfigCommand;
pub use self::cuboids::CuboidsCommand;
pub use self::migrate::MigrateCommand;
