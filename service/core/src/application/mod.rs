// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod error;
pub mod cuboid_service;
pub mod bag_service;
pub mod repository_factory;

// Re-export services for convenience
pub use error::{Entity, ServiceError};
pub use cuboid_service::{CuboidInput, CuboidService, StandardCuboidService};
pub use bag_service::{BagService, StandardBagService};
pub use repository_factory::{create_repositories, Repositories};
