// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Repository Implementations
//!
//! Infrastructure implementations of the repository abstractions defined in
//! the domain layer.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Persist and retrieve bags and cuboids
//! - **Pattern:** Repository (DDD), Adapter (Hexagonal Architecture)
//!
//! # Available Implementations
//!
//! ## PostgreSQL Repositories
//!
//! - **PostgresBagRepository** - Bags with cascading delete
//! - **PostgresCuboidRepository** - Cuboids referencing their bag
//!
//! ## In-Memory Repositories
//!
//! Both in-memory repositories read and write one shared [`InMemoryStore`],
//! so a bag loaded through `InMemoryBagRepository` sees the cuboids written
//! through `InMemoryCuboidRepository`.

pub mod postgres_bag;
pub mod postgres_cuboid;

use std::collections::BTreeMap;
use std::sync::Arc;
use async_trait::async_trait;
use parking_lot::RwLock;
use crate::domain::bag::{Bag, BagId, NewBag};
use crate::domain::cuboid::{Cuboid, CuboidId, NewCuboid};
use crate::domain::repository::{BagRepository, CuboidRepository, RepositoryError};

pub use postgres_bag::PostgresBagRepository;
pub use postgres_cuboid::PostgresCuboidRepository;

#[derive(Debug, Clone)]
struct BagRecord {
    title: String,
    volume: f64,
}

#[derive(Default)]
struct StoreState {
    bags: BTreeMap<BagId, BagRecord>,
    cuboids: BTreeMap<CuboidId, Cuboid>,
    next_bag_id: i64,
    next_cuboid_id: i64,
}

impl StoreState {
    fn load_bag(&self, id: BagId) -> Option<Bag> {
        let record = self.bags.get(&id)?;
        let cuboids = self
            .cuboids
            .values()
            .filter(|c| c.bag_id == id)
            .cloned()
            .collect();
        Some(Bag::restore(id, record.title.clone(), record.volume, cuboids))
    }
}

/// Shared backing store for the in-memory repositories
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Clone)]
pub struct InMemoryBagRepository {
    store: InMemoryStore,
}

impl InMemoryBagRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BagRepository for InMemoryBagRepository {
    async fn insert(&self, bag: NewBag) -> Result<Bag, RepositoryError> {
        let mut state = self.store.state.write();
        state.next_bag_id += 1;
        let id = BagId(state.next_bag_id);
        state.bags.insert(id, BagRecord { title: bag.title.clone(), volume: bag.volume });
        Ok(Bag::restore(id, bag.title, bag.volume, Vec::new()))
    }

    async fn find_by_id(&self, id: BagId) -> Result<Option<Bag>, RepositoryError> {
        let state = self.store.state.read();
        Ok(state.load_bag(id))
    }

    async fn list_all(&self) -> Result<Vec<Bag>, RepositoryError> {
        let state = self.store.state.read();
        Ok(state.bags.keys().filter_map(|id| state.load_bag(*id)).collect())
    }

    async fn delete(&self, id: BagId) -> Result<(), RepositoryError> {
        let mut state = self.store.state.write();
        if state.bags.remove(&id).is_none() {
            return Err(RepositoryError::NotFound(format!("Bag {} not found", id)));
        }
        state.cuboids.retain(|_, c| c.bag_id != id);
        Ok(())
    }
}

#[derive(Clone)]
pub struct InMemoryCuboidRepository {
    store: InMemoryStore,
}

impl InMemoryCuboidRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CuboidRepository for InMemoryCuboidRepository {
    async fn insert(&self, cuboid: NewCuboid) -> Result<Cuboid, RepositoryError> {
        let mut state = self.store.state.write();
        if !state.bags.contains_key(&cuboid.bag_id) {
            return Err(RepositoryError::Conflict(format!(
                "Bag {} does not exist",
                cuboid.bag_id
            )));
        }
        state.next_cuboid_id += 1;
        let created = Cuboid::new(CuboidId(state.next_cuboid_id), cuboid.dimensions, cuboid.bag_id);
        state.cuboids.insert(created.id, created.clone());
        Ok(created)
    }

    async fn save(&self, cuboid: &Cuboid) -> Result<(), RepositoryError> {
        let mut state = self.store.state.write();
        if !state.bags.contains_key(&cuboid.bag_id) {
            return Err(RepositoryError::Conflict(format!(
                "Bag {} does not exist",
                cuboid.bag_id
            )));
        }
        match state.cuboids.get_mut(&cuboid.id) {
            Some(existing) => {
                *existing = cuboid.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(format!("Cuboid {} not found", cuboid.id))),
        }
    }

    async fn find_by_id(&self, id: CuboidId) -> Result<Option<Cuboid>, RepositoryError> {
        let state = self.store.state.read();
        Ok(state.cuboids.get(&id).cloned())
    }

    async fn find_by_bag(&self, bag_id: BagId) -> Result<Vec<Cuboid>, RepositoryError> {
        let state = self.store.state.read();
        Ok(state
            .cuboids
            .values()
            .filter(|c| c.bag_id == bag_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Cuboid>, RepositoryError> {
        let state = self.store.state.read();
        Ok(state.cuboids.values().cloned().collect())
    }

    async fn delete(&self, id: CuboidId) -> Result<(), RepositoryError> {
        let mut state = self.store.state.write();
        match state.cuboids.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound(format!("Cuboid {} not found", id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cuboid::Dimensions;

    fn repositories() -> (InMemoryBagRepository, InMemoryCuboidRepository) {
        let store = InMemoryStore::new();
        (InMemoryBagRepository::new(store.clone()), InMemoryCuboidRepository::new(store))
    }

    fn new_cuboid(bag_id: BagId, w: f64, h: f64, d: f64) -> NewCuboid {
        NewCuboid::new(Dimensions::new(w, h, d).unwrap(), bag_id)
    }

    #[tokio::test]
    async fn test_ids_are_generated_sequentially() {
        let (bags, cuboids) = repositories();

        let first = bags.insert(NewBag::new("first", 10.0).unwrap()).await.unwrap();
        let second = bags.insert(NewBag::new("second", 20.0).unwrap()).await.unwrap();
        assert_eq!(first.id, BagId(1));
        assert_eq!(second.id, BagId(2));

        let cuboid = cuboids.insert(new_cuboid(second.id, 1.0, 1.0, 1.0)).await.unwrap();
        assert_eq!(cuboid.id, CuboidId(1));
    }

    #[tokio::test]
    async fn test_bag_loads_its_cuboids() {
        let (bags, cuboids) = repositories();
        let bag = bags.insert(NewBag::new("bag", 100.0).unwrap()).await.unwrap();
        let other = bags.insert(NewBag::new("other", 100.0).unwrap()).await.unwrap();

        cuboids.insert(new_cuboid(bag.id, 2.0, 3.0, 2.0)).await.unwrap();
        cuboids.insert(new_cuboid(other.id, 1.0, 1.0, 1.0)).await.unwrap();
        cuboids.insert(new_cuboid(bag.id, 3.0, 3.0, 3.0)).await.unwrap();

        let loaded = bags.find_by_id(bag.id).await.unwrap().unwrap();
        assert_eq!(loaded.cuboid_count(), 2);
        assert_eq!(loaded.payload_volume(), 39.0);
        assert_eq!(cuboids.find_by_bag(other.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_cuboid_requires_existing_bag() {
        let (_bags, cuboids) = repositories();
        let result = cuboids.insert(new_cuboid(BagId(42), 1.0, 1.0, 1.0)).await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_bag_cascades() {
        let (bags, cuboids) = repositories();
        let bag = bags.insert(NewBag::new("doomed", 100.0).unwrap()).await.unwrap();
        let keep = bags.insert(NewBag::new("kept", 100.0).unwrap()).await.unwrap();
        let gone = cuboids.insert(new_cuboid(bag.id, 1.0, 1.0, 1.0)).await.unwrap();
        let kept = cuboids.insert(new_cuboid(keep.id, 1.0, 1.0, 1.0)).await.unwrap();

        bags.delete(bag.id).await.unwrap();

        assert!(bags.find_by_id(bag.id).await.unwrap().is_none());
        assert!(cuboids.find_by_id(gone.id).await.unwrap().is_none());
        assert!(cuboids.find_by_id(kept.id).await.unwrap().is_some());
        assert!(matches!(bags.delete(bag.id).await, Err(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_save_and_delete_cuboid() {
        let (bags, cuboids) = repositories();
        let bag = bags.insert(NewBag::new("bag", 100.0).unwrap()).await.unwrap();
        let mut cuboid = cuboids.insert(new_cuboid(bag.id, 1.0, 1.0, 1.0)).await.unwrap();

        cuboid.reshape(Dimensions::new(2.0, 2.0, 2.0).unwrap(), bag.id);
        cuboids.save(&cuboid).await.unwrap();
        let stored = cuboids.find_by_id(cuboid.id).await.unwrap().unwrap();
        assert_eq!(stored.volume(), 8.0);

        cuboids.delete(cuboid.id).await.unwrap();
        assert!(cuboids.list_all().await.unwrap().is_empty());
        assert!(matches!(cuboids.delete(cuboid.id).await, Err(RepositoryError::NotFound(_))));
    }
}
