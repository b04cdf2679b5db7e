// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Bag Application Service
//!
//! Creates, reads and deletes bags. Deleting a bag removes every cuboid it
//! owns in the same storage transaction.

use crate::application::error::{Entity, ServiceError};
use crate::domain::bag::{Bag, BagId, NewBag};
use crate::domain::repository::{BagRepository, RepositoryError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

#[async_trait]
pub trait BagService: Send + Sync {
    async fn create(&self, title: String, volume: f64) -> Result<Bag, ServiceError>;
    async fn get(&self, id: BagId) -> Result<Bag, ServiceError>;
    async fn get_all(&self) -> Result<Vec<Bag>, ServiceError>;
    async fn delete(&self, id: BagId) -> Result<(), ServiceError>;
}

pub struct StandardBagService {
    repository: Arc<dyn BagRepository>,
}

impl StandardBagService {
    pub fn new(repository: Arc<dyn BagRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl BagService for StandardBagService {
    async fn create(&self, title: String, volume: f64) -> Result<Bag, ServiceError> {
        let bag = self.repository.insert(NewBag::new(title, volume)?).await?;
        info!("Bag {} '{}' created with volume {}", bag.id, bag.title, bag.volume);
        Ok(bag)
    }

    async fn get(&self, id: BagId) -> Result<Bag, ServiceError> {
        debug!("Fetching bag {}", id);
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(Entity::Bag))
    }

    async fn get_all(&self) -> Result<Vec<Bag>, ServiceError> {
        debug!("Listing all bags");
        Ok(self.repository.list_all().await?)
    }

    async fn delete(&self, id: BagId) -> Result<(), ServiceError> {
        match self.repository.delete(id).await {
            Ok(()) => {
                info!("Bag {} deleted with its cuboids", id);
                Ok(())
            }
            Err(RepositoryError::NotFound(_)) => Err(ServiceError::NotFound(Entity::Bag)),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::cuboid_service::{CuboidInput, CuboidService, StandardCuboidService};
    use crate::domain::cuboid::Dimensions;
    use crate::infrastructure::repositories::{
        InMemoryBagRepository, InMemoryCuboidRepository, InMemoryStore,
    };

    fn create_services() -> (StandardBagService, StandardCuboidService) {
        let store = InMemoryStore::new();
        let bags = Arc::new(InMemoryBagRepository::new(store.clone()));
        let cuboids = Arc::new(InMemoryCuboidRepository::new(store));
        (
            StandardBagService::new(bags.clone()),
            StandardCuboidService::new(bags, cuboids),
        )
    }

    #[tokio::test]
    async fn test_create_and_get_bag() {
        let (service, _) = create_services();

        let bag = service.create("travel".to_string(), 75.0).await.unwrap();
        let fetched = service.get(bag.id).await.unwrap();

        assert_eq!(fetched.title, "travel");
        assert_eq!(fetched.available_volume(), 75.0);
    }

    #[tokio::test]
    async fn test_create_invalid_bag() {
        let (service, _) = create_services();

        let result = service.create("x".repeat(101), 10.0).await;
        assert!(matches!(result, Err(ServiceError::Invalid(_))));

        let result = service.create("bag".to_string(), -5.0).await;
        assert!(matches!(result, Err(ServiceError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_get_unknown_bag() {
        let (service, _) = create_services();
        let err = service.get(BagId(7)).await.unwrap_err();
        assert_eq!(err.to_string(), "Object Bag not found!");
    }

    #[tokio::test]
    async fn test_bag_reports_contents() {
        let (bags, cuboids) = create_services();
        let bag = bags.create("bag".to_string(), 100.0).await.unwrap();

        for size in [2.0, 3.0] {
            cuboids
                .create(CuboidInput {
                    dimensions: Dimensions::new(size, size, size).unwrap(),
                    bag_id: bag.id,
                })
                .await
                .unwrap();
        }

        let bag = bags.get(bag.id).await.unwrap();
        assert_eq!(bag.cuboid_count(), 2);
        assert_eq!(bag.payload_volume(), 35.0);
        assert_eq!(bag.available_volume(), 65.0);
    }

    #[tokio::test]
    async fn test_delete_bag_removes_cuboids() {
        let (bags, cuboids) = create_services();
        let bag = bags.create("bag".to_string(), 100.0).await.unwrap();
        let cuboid = cuboids
            .create(CuboidInput {
                dimensions: Dimensions::new(1.0, 2.0, 3.0).unwrap(),
                bag_id: bag.id,
            })
            .await
            .unwrap();

        bags.delete(bag.id).await.unwrap();

        assert!(bags.get(bag.id).await.unwrap_err().is_not_found());
        assert!(cuboids.get(cuboid.id).await.unwrap_err().is_not_found());
        assert!(bags.delete(bag.id).await.unwrap_err().is_not_found());
    }
}
