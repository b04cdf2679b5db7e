// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! Persistence contracts for each aggregate root, following the DDD Repository
//! pattern: one repository per aggregate, interface defined in the domain layer,
//! implemented in `crate::infrastructure::repositories`.
//!
//! | Trait | Aggregate | Implementations |
//! |-------|-----------|----------------|
//! | `BagRepository` | `Bag` | `InMemoryBagRepository`, `PostgresBagRepository` |
//! | `CuboidRepository` | `Cuboid` | `InMemoryCuboidRepository`, `PostgresCuboidRepository` |
//!
//! ## Storage Backend Abstraction
//!
//! Concrete implementations are selected at startup based on configuration
//! (`cuboid-config.yaml`). In-memory implementations are used for development
//! and testing; PostgreSQL implementations for production.

use async_trait::async_trait;
use crate::domain::bag::{Bag, BagId, NewBag};
use crate::domain::cuboid::{Cuboid, CuboidId, NewCuboid};

/// Storage backend enum for pluggable persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    InMemory,
    PostgreSQL(PostgresConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    pub connection_string: String,
    pub max_connections: u32,
}

/// Repository interface for Bag aggregates
#[async_trait]
pub trait BagRepository: Send + Sync {
    /// Persist a new bag and return it with its generated id
    async fn insert(&self, bag: NewBag) -> Result<Bag, RepositoryError>;

    /// Find bag by ID, with its cuboids loaded
    async fn find_by_id(&self, id: BagId) -> Result<Option<Bag>, RepositoryError>;

    /// List all bags ordered by id
    async fn list_all(&self) -> Result<Vec<Bag>, RepositoryError>;

    /// Delete bag by ID together with every cuboid it owns
    async fn delete(&self, id: BagId) -> Result<(), RepositoryError>;
}

/// Repository interface for Cuboid entities
#[async_trait]
pub trait CuboidRepository: Send + Sync {
    /// Persist a new cuboid and return it with its generated id
    async fn insert(&self, cuboid: NewCuboid) -> Result<Cuboid, RepositoryError>;

    /// Overwrite an existing cuboid
    async fn save(&self, cuboid: &Cuboid) -> Result<(), RepositoryError>;

    /// Find cuboid by ID
    async fn find_by_id(&self, id: CuboidId) -> Result<Option<Cuboid>, RepositoryError>;

    /// Find every cuboid owned by a bag
    async fn find_by_bag(&self, bag_id: BagId) -> Result<Vec<Cuboid>, RepositoryError>;

    /// List all cuboids ordered by id
    async fn list_all(&self) -> Result<Vec<Cuboid>, RepositoryError>;

    /// Delete cuboid by ID
    async fn delete(&self, id: CuboidId) -> Result<(), RepositoryError>;
}

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound("Row not found".to_string()),
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                RepositoryError::Conflict(db_err.message().to_string())
            }
            _ => RepositoryError::Database(err.to_string()),
        }
    }
}
