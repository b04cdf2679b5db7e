// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Repository Factory - Application Layer
//!
//! Creates concrete repository implementations based on storage backend configuration,
//! keeping the Domain Layer free of infrastructure dependencies.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Wire bag and cuboid repositories to one backing store

use std::sync::Arc;
use anyhow::Result;
use tracing::info;

use crate::domain::repository::{BagRepository, CuboidRepository, StorageBackend};
use crate::infrastructure::db::Database;
use crate::infrastructure::repositories::{
    InMemoryBagRepository, InMemoryCuboidRepository, InMemoryStore,
    PostgresBagRepository, PostgresCuboidRepository,
};

/// Bag and cuboid repositories sharing one backing store
#[derive(Clone)]
pub struct Repositories {
    pub bags: Arc<dyn BagRepository>,
    pub cuboids: Arc<dyn CuboidRepository>,
}

impl Repositories {
    pub fn in_memory(store: InMemoryStore) -> Self {
        Self {
            bags: Arc::new(InMemoryBagRepository::new(store.clone())),
            cuboids: Arc::new(InMemoryCuboidRepository::new(store)),
        }
    }

    pub fn postgres(database: &Database) -> Self {
        let pool = database.get_pool().clone();
        Self {
            bags: Arc::new(PostgresBagRepository::new(pool.clone())),
            cuboids: Arc::new(PostgresCuboidRepository::new(pool)),
        }
    }
}

/// Creates the repositories for the configured backend.
///
/// PostgreSQL schemas are migrated before the repositories are returned.
pub async fn create_repositories(backend: &StorageBackend) -> Result<Repositories> {
    match backend {
        StorageBackend::InMemory => {
            info!("Using in-memory storage; data is lost on shutdown");
            Ok(Repositories::in_memory(InMemoryStore::new()))
        }
        StorageBackend::PostgreSQL(config) => {
            let database = Database::new(config).await?;
            database.migrate().await?;
            info!("Using PostgreSQL storage (max_connections={})", config.max_connections);
            Ok(Repositories::postgres(&database))
        }
    }
}
