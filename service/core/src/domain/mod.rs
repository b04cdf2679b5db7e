// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain Layer
//!
//! Bag and cuboid model, repository contracts and service configuration.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Entities, value objects and repository contracts

pub mod bag;
pub mod cuboid;
pub mod repository;
pub mod service_config;
