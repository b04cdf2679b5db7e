// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Cuboid Service Rust SDK
//!
//! Typed HTTP client for managing bags and the cuboids they hold.

pub mod client;
pub mod types;

pub use client::{ClientError, CuboidClient};
pub use types::*;
