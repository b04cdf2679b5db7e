// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Cuboid Application Service
//!
//! The only component that creates, updates or deletes cuboids, and the one
//! place the bag capacity rule is enforced. A request is accepted when the
//! cuboid volume fits in the target bag's currently available volume.
//!
//! Update and delete normalize storage failures into a stable
//! `Unprocessable` outcome; the underlying cause is logged, not returned.

use crate::application::error::{Entity, ServiceError, DELETE_FAILED, UPDATE_FAILED};
use crate::domain::bag::{Bag, BagId};
use crate::domain::cuboid::{Cuboid, CuboidId, Dimensions, NewCuboid};
use crate::domain::repository::{BagRepository, CuboidRepository};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Dimensions and target bag for a create or update request
#[derive(Debug, Clone, PartialEq)]
pub struct CuboidInput {
    pub dimensions: Dimensions,
    pub bag_id: BagId,
}

#[async_trait]
pub trait CuboidService: Send + Sync {
    async fn create(&self, input: CuboidInput) -> Result<Cuboid, ServiceError>;
    async fn get(&self, id: CuboidId) -> Result<Cuboid, ServiceError>;
    async fn get_all(&self) -> Result<Vec<Cuboid>, ServiceError>;
    async fn update(&self, id: CuboidId, input: CuboidInput) -> Result<Cuboid, ServiceError>;
    async fn delete(&self, id: CuboidId) -> Result<(), ServiceError>;
}

pub struct StandardCuboidService {
    bags: Arc<dyn BagRepository>,
    cuboids: Arc<dyn CuboidRepository>,
}

impl StandardCuboidService {
    pub fn new(bags: Arc<dyn BagRepository>, cuboids: Arc<dyn CuboidRepository>) -> Self {
        Self { bags, cuboids }
    }

    async fn bag(&self, id: BagId) -> Result<Bag, ServiceError> {
        self.bags
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(Entity::Bag))
    }

    async fn cuboid(&self, id: CuboidId) -> Result<Cuboid, ServiceError> {
        self.cuboids
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(Entity::Cuboid))
    }

    async fn try_update(&self, id: CuboidId, input: CuboidInput) -> Result<Cuboid, ServiceError> {
        let mut cuboid = self.cuboid(id).await?;
        let bag = self.bag(input.bag_id).await?;

        let requested = input.dimensions.volume();
        if let Err(e) = bag.ensure_capacity_for(cuboid.id, requested) {
            warn!(
                "Rejected update of cuboid {}: volume {} does not fit in bag {} (available {})",
                id,
                requested,
                bag.id,
                bag.available_volume_for(cuboid.id)
            );
            return Err(e.into());
        }

        cuboid.reshape(input.dimensions, input.bag_id);
        self.cuboids.save(&cuboid).await?;
        Ok(cuboid)
    }

    async fn try_delete(&self, id: CuboidId) -> Result<(), ServiceError> {
        self.cuboid(id).await?;
        self.cuboids.delete(id).await?;
        Ok(())
    }
}

/// Keep intentional outcomes, replace anything else with `message`.
fn normalize(err: ServiceError, message: &str) -> ServiceError {
    match err {
        ServiceError::NotFound(_)
        | ServiceError::CapacityExceeded { .. }
        | ServiceError::Invalid(_)
        | ServiceError::Unprocessable(_) => err,
        ServiceError::Repository(cause) => {
            error!("{} Cause: {}", message, cause);
            ServiceError::Unprocessable(message.to_string())
        }
    }
}

#[async_trait]
impl CuboidService for StandardCuboidService {
    async fn create(&self, input: CuboidInput) -> Result<Cuboid, ServiceError> {
        let mut bag = self.bag(input.bag_id).await?;

        let requested = input.dimensions.volume();
        if let Err(e) = bag.ensure_capacity(requested) {
            warn!(
                "Rejected cuboid of volume {} for bag {} (available {})",
                requested,
                bag.id,
                bag.available_volume()
            );
            return Err(e.into());
        }

        let cuboid = self
            .cuboids
            .insert(NewCuboid::new(input.dimensions, input.bag_id))
            .await?;
        bag.add_cuboid(cuboid.clone());

        info!(
            "Cuboid {} created in bag {} (volume {}, bag payload {}/{})",
            cuboid.id,
            bag.id,
            cuboid.volume(),
            bag.payload_volume(),
            bag.volume
        );

        Ok(cuboid)
    }

    async fn get(&self, id: CuboidId) -> Result<Cuboid, ServiceError> {
        debug!("Fetching cuboid {}", id);
        self.cuboid(id).await
    }

    async fn get_all(&self) -> Result<Vec<Cuboid>, ServiceError> {
        debug!("Listing all cuboids");
        Ok(self.cuboids.list_all().await?)
    }

    async fn update(&self, id: CuboidId, input: CuboidInput) -> Result<Cuboid, ServiceError> {
        let cuboid = self
            .try_update(id, input)
            .await
            .map_err(|e| normalize(e, UPDATE_FAILED))?;

        info!("Cuboid {} updated (bag {}, volume {})", cuboid.id, cuboid.bag_id, cuboid.volume());
        Ok(cuboid)
    }

    async fn delete(&self, id: CuboidId) -> Result<(), ServiceError> {
        self.try_delete(id)
            .await
            .map_err(|e| normalize(e, DELETE_FAILED))?;

        info!("Cuboid {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bag::NewBag;
    use crate::domain::repository::RepositoryError;
    use crate::infrastructure::repositories::{
        InMemoryBagRepository, InMemoryCuboidRepository, InMemoryStore,
    };

    fn create_test_service() -> (StandardCuboidService, Arc<InMemoryBagRepository>) {
        let store = InMemoryStore::new();
        let bags = Arc::new(InMemoryBagRepository::new(store.clone()));
        let cuboids = Arc::new(InMemoryCuboidRepository::new(store));
        (StandardCuboidService::new(bags.clone(), cuboids), bags)
    }

    async fn add_bag(bags: &InMemoryBagRepository, volume: f64) -> BagId {
        bags.insert(NewBag::new("test bag", volume).unwrap()).await.unwrap().id
    }

    fn input(w: f64, h: f64, d: f64, bag_id: BagId) -> CuboidInput {
        CuboidInput {
            dimensions: Dimensions::new(w, h, d).unwrap(),
            bag_id,
        }
    }

    #[tokio::test]
    async fn test_create_cuboid() {
        let (service, bags) = create_test_service();
        let bag_id = add_bag(&bags, 100.0).await;

        let cuboid = service.create(input(2.0, 3.0, 2.0, bag_id)).await.expect("Failed to create cuboid");

        assert_eq!(cuboid.volume(), 12.0);
        assert_eq!(cuboid.bag_id, bag_id);
        let bag = bags.find_by_id(bag_id).await.unwrap().unwrap();
        assert_eq!(bag.payload_volume(), 12.0);
    }

    #[tokio::test]
    async fn test_create_in_unknown_bag_is_not_found() {
        let (service, _bags) = create_test_service();

        // Also far too large for any bag: lookup must fail first
        let result = service.create(input(100.0, 100.0, 100.0, BagId(999))).await;
        assert!(matches!(result, Err(ServiceError::NotFound(Entity::Bag))));
    }

    #[tokio::test]
    async fn test_create_exceeding_declared_volume() {
        let (service, bags) = create_test_service();
        let bag_id = add_bag(&bags, 50.0).await;

        let result = service.create(input(20.0, 5.0, 5.0, bag_id)).await;
        assert!(matches!(
            result,
            Err(ServiceError::CapacityExceeded { requested, .. }) if requested == 500.0
        ));
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_checks_available_volume() {
        let (service, bags) = create_test_service();
        let bag_id = add_bag(&bags, 50.0).await;

        service.create(input(5.0, 2.0, 2.0, bag_id)).await.unwrap();
        service.create(input(5.0, 2.0, 2.0, bag_id)).await.unwrap();

        // 40 of 50 used: 12 no longer fits, 10 still does
        let result = service.create(input(2.0, 3.0, 2.0, bag_id)).await;
        assert!(matches!(result, Err(ServiceError::CapacityExceeded { available, .. }) if available == 10.0));
        assert!(service.create(input(5.0, 2.0, 1.0, bag_id)).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_all_lists_every_cuboid() {
        let (service, bags) = create_test_service();
        let first = add_bag(&bags, 100.0).await;
        let second = add_bag(&bags, 100.0).await;

        service.create(input(1.0, 1.0, 1.0, first)).await.unwrap();
        service.create(input(3.0, 3.0, 3.0, second)).await.unwrap();

        let all = service.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].bag_id, second);
        assert_eq!(all[1].volume(), 27.0);
    }

    #[tokio::test]
    async fn test_update_unknown_cuboid_is_not_found() {
        let (service, bags) = create_test_service();
        let bag_id = add_bag(&bags, 1.0).await;

        // Would also violate capacity: the cuboid lookup must win
        let result = service.update(CuboidId(100), input(10.0, 10.0, 10.0, bag_id)).await;
        assert!(matches!(result, Err(ServiceError::NotFound(Entity::Cuboid))));
    }

    #[tokio::test]
    async fn test_update_with_unknown_bag_is_not_found() {
        let (service, bags) = create_test_service();
        let bag_id = add_bag(&bags, 100.0).await;
        let cuboid = service.create(input(1.0, 1.0, 1.0, bag_id)).await.unwrap();

        let result = service.update(cuboid.id, input(1.0, 1.0, 1.0, BagId(100))).await;
        assert!(matches!(result, Err(ServiceError::NotFound(Entity::Bag))));
    }

    #[tokio::test]
    async fn test_update_resizes_within_same_bag() {
        let (service, bags) = create_test_service();
        let bag_id = add_bag(&bags, 30.0).await;
        let cuboid = service.create(input(2.0, 2.0, 5.0, bag_id)).await.unwrap();

        // The cuboid's own 20 units do not count against its new size
        let updated = service.update(cuboid.id, input(3.0, 2.0, 5.0, bag_id)).await.unwrap();
        assert_eq!(updated.volume(), 30.0);

        let result = service.update(cuboid.id, input(2.0, 30.0, 2.0, bag_id)).await;
        assert!(matches!(result, Err(ServiceError::CapacityExceeded { .. })));

        let stored = service.get(cuboid.id).await.unwrap();
        assert_eq!(stored.volume(), 30.0);
    }

    #[tokio::test]
    async fn test_update_moves_cuboid_to_other_bag() {
        let (service, bags) = create_test_service();
        let source = add_bag(&bags, 100.0).await;
        let target = add_bag(&bags, 100.0).await;
        let cuboid = service.create(input(2.0, 3.0, 2.0, source)).await.unwrap();

        let moved = service.update(cuboid.id, input(3.0, 3.0, 3.0, target)).await.unwrap();
        assert_eq!(moved.bag_id, target);

        assert_eq!(bags.find_by_id(source).await.unwrap().unwrap().payload_volume(), 0.0);
        assert_eq!(bags.find_by_id(target).await.unwrap().unwrap().payload_volume(), 27.0);
    }

    #[tokio::test]
    async fn test_delete_cuboid() {
        let (service, bags) = create_test_service();
        let bag_id = add_bag(&bags, 100.0).await;
        let cuboid = service.create(input(1.0, 1.0, 1.0, bag_id)).await.unwrap();

        service.delete(cuboid.id).await.expect("Failed to delete cuboid");

        let result = service.get(cuboid.id).await;
        assert!(matches!(result, Err(ServiceError::NotFound(Entity::Cuboid))));
    }

    #[tokio::test]
    async fn test_delete_unknown_cuboid_is_not_found() {
        let (service, _bags) = create_test_service();
        let err = service.delete(CuboidId(100)).await.unwrap_err();
        assert_eq!(err.to_string(), "Object Cuboid not found!");
    }

    #[test]
    fn test_normalize_hides_storage_failures() {
        let err = normalize(
            ServiceError::Repository(RepositoryError::Database("connection reset".to_string())),
            UPDATE_FAILED,
        );
        assert!(matches!(err, ServiceError::Unprocessable(ref m) if m == UPDATE_FAILED));

        let err = normalize(ServiceError::NotFound(Entity::Cuboid), DELETE_FAILED);
        assert!(err.is_not_found());
    }

    /// Reads go to the in-memory store; every write after insert fails.
    struct FailingWritesCuboidRepository {
        inner: InMemoryCuboidRepository,
    }

    #[async_trait]
    impl CuboidRepository for FailingWritesCuboidRepository {
        async fn insert(&self, cuboid: NewCuboid) -> Result<Cuboid, RepositoryError> {
            self.inner.insert(cuboid).await
        }

        async fn save(&self, _cuboid: &Cuboid) -> Result<(), RepositoryError> {
            Err(RepositoryError::Database("connection reset".to_string()))
        }

        async fn find_by_id(&self, id: CuboidId) -> Result<Option<Cuboid>, RepositoryError> {
            self.inner.find_by_id(id).await
        }

        async fn find_by_bag(&self, bag_id: BagId) -> Result<Vec<Cuboid>, RepositoryError> {
            self.inner.find_by_bag(bag_id).await
        }

        async fn list_all(&self) -> Result<Vec<Cuboid>, RepositoryError> {
            self.inner.list_all().await
        }

        async fn delete(&self, _id: CuboidId) -> Result<(), RepositoryError> {
            Err(RepositoryError::Database("connection reset".to_string()))
        }
    }

    #[tokio::test]
    async fn test_storage_failures_on_update_and_delete_are_unprocessable() {
        let store = InMemoryStore::new();
        let bags = Arc::new(InMemoryBagRepository::new(store.clone()));
        let cuboids = Arc::new(FailingWritesCuboidRepository {
            inner: InMemoryCuboidRepository::new(store),
        });
        let service = StandardCuboidService::new(bags.clone(), cuboids);

        let bag_id = add_bag(&bags, 100.0).await;
        let cuboid = service.create(input(1.0, 2.0, 3.0, bag_id)).await.unwrap();

        let err = service.update(cuboid.id, input(2.0, 2.0, 2.0, bag_id)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unprocessable(ref m) if m == UPDATE_FAILED));
        assert_eq!(err.to_string(), UPDATE_FAILED);

        let err = service.delete(cuboid.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unprocessable(ref m) if m == DELETE_FAILED));

        // Lookups still run first, so unknown ids stay NotFound
        let err = service.delete(CuboidId(999)).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
