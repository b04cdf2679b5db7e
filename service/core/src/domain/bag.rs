// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Bag aggregate
//!
//! A bag is a container with a fixed volume capacity that owns a collection
//! of cuboids. Payload and available volume are derived from the owned
//! cuboids on every read, so they cannot drift from the actual contents.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Capacity accounting for bags

use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::domain::cuboid::{Cuboid, CuboidId};

/// Storage-generated identifier for a bag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BagId(pub i64);

impl std::fmt::Display for BagId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bag that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewBag {
    pub title: String,
    pub volume: f64,
}

impl NewBag {
    pub fn new(title: impl Into<String>, volume: f64) -> Result<Self, BagError> {
        let title = title.into();

        if title.trim().is_empty() {
            return Err(BagError::InvalidTitle("title cannot be empty".to_string()));
        }

        let length = title.chars().count();
        if length > Bag::TITLE_MAX_SIZE {
            return Err(BagError::InvalidTitle(format!(
                "title is {} characters long, maximum is {}",
                length,
                Bag::TITLE_MAX_SIZE
            )));
        }

        if !volume.is_finite() || volume < 0.0 {
            return Err(BagError::InvalidVolume(volume));
        }

        Ok(Self { title, volume })
    }
}

/// Bag aggregate root
#[derive(Debug, Clone, PartialEq)]
pub struct Bag {
    pub id: BagId,
    pub title: String,
    pub volume: f64,
    cuboids: Vec<Cuboid>,
}

impl Bag {
    pub const TITLE_MAX_SIZE: usize = 100;

    /// Rebuild a bag from stored state.
    pub fn restore(id: BagId, title: String, volume: f64, cuboids: Vec<Cuboid>) -> Self {
        Self { id, title, volume, cuboids }
    }

    /// Record a cuboid as part of this bag.
    ///
    /// Capacity is NOT checked here; callers run `ensure_capacity` first.
    pub fn add_cuboid(&mut self, cuboid: Cuboid) {
        self.cuboids.push(cuboid);
    }

    /// Copy of the owned cuboids. Mutating the returned vector never affects the bag.
    pub fn cuboids(&self) -> Vec<Cuboid> {
        self.cuboids.clone()
    }

    pub fn cuboid_count(&self) -> usize {
        self.cuboids.len()
    }

    /// Sum of the volumes of all contained cuboids
    pub fn payload_volume(&self) -> f64 {
        self.cuboids.iter().map(Cuboid::volume).sum()
    }

    /// Declared volume minus payload volume. Negative when the bag is overfilled.
    pub fn available_volume(&self) -> f64 {
        self.volume - self.payload_volume()
    }

    /// Available volume as if `cuboid_id` were not in the bag.
    pub fn available_volume_for(&self, cuboid_id: CuboidId) -> f64 {
        let others: f64 = self
            .cuboids
            .iter()
            .filter(|c| c.id != cuboid_id)
            .map(Cuboid::volume)
            .sum();
        self.volume - others
    }

    pub fn can_hold(&self, volume: f64) -> bool {
        check_capacity(volume, self.available_volume()).is_ok()
    }

    pub fn ensure_capacity(&self, requested: f64) -> Result<(), BagError> {
        check_capacity(requested, self.available_volume())
    }

    /// Capacity check for re-validating `cuboid_id` with a new volume.
    pub fn ensure_capacity_for(&self, cuboid_id: CuboidId, requested: f64) -> Result<(), BagError> {
        check_capacity(requested, self.available_volume_for(cuboid_id))
    }
}

/// Relative slack absorbing rounding in the recomputed payload sum
const CAPACITY_TOLERANCE: f64 = 1e-9;

fn check_capacity(requested: f64, available: f64) -> Result<(), BagError> {
    let slack = CAPACITY_TOLERANCE * requested.abs().max(available.abs()).max(1.0);
    if requested > available + slack {
        return Err(BagError::CapacityExceeded { requested, available });
    }
    Ok(())
}

#[derive(Debug, Error, PartialEq)]
pub enum BagError {
    #[error("Invalid bag title: {0}")]
    InvalidTitle(String),

    #[error("Invalid bag volume: {0} (must be a finite, non-negative number)")]
    InvalidVolume(f64),

    #[error("Bag capacity is not enough! (requested {requested}, available {available})")]
    CapacityExceeded { requested: f64, available: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cuboid::Dimensions;

    fn cuboid(id: i64, w: f64, h: f64, d: f64) -> Cuboid {
        Cuboid::new(CuboidId(id), Dimensions::new(w, h, d).unwrap(), BagId(1))
    }

    #[test]
    fn test_new_bag_validation() {
        assert!(NewBag::new("groceries", 50.0).is_ok());
        assert!(NewBag::new("   ", 50.0).is_err());
        assert!(NewBag::new("x".repeat(Bag::TITLE_MAX_SIZE), 50.0).is_ok());
        assert!(matches!(
            NewBag::new("x".repeat(Bag::TITLE_MAX_SIZE + 1), 50.0),
            Err(BagError::InvalidTitle(_))
        ));
        assert_eq!(NewBag::new("bag", -1.0), Err(BagError::InvalidVolume(-1.0)));
    }

    #[test]
    fn test_empty_bag_volumes() {
        let bag = Bag::restore(BagId(1), "empty".to_string(), 100.0, vec![]);
        assert_eq!(bag.payload_volume(), 0.0);
        assert_eq!(bag.available_volume(), 100.0);
        assert!(bag.can_hold(100.0));
        assert!(!bag.can_hold(100.5));
    }

    #[test]
    fn test_add_cuboid_updates_derived_volumes() {
        let mut bag = Bag::restore(BagId(1), "bag".to_string(), 100.0, vec![]);
        bag.add_cuboid(cuboid(1, 2.0, 3.0, 2.0));
        bag.add_cuboid(cuboid(2, 3.0, 3.0, 3.0));

        assert_eq!(bag.payload_volume(), 39.0);
        assert_eq!(bag.available_volume(), 61.0);
        assert_eq!(bag.cuboid_count(), 2);
    }

    #[test]
    fn test_add_cuboid_does_not_block_overflow() {
        let mut bag = Bag::restore(BagId(1), "small".to_string(), 10.0, vec![]);
        bag.add_cuboid(cuboid(1, 5.0, 5.0, 5.0));

        assert_eq!(bag.available_volume(), -115.0);
        assert!(bag.ensure_capacity(0.0).is_err());
    }

    #[test]
    fn test_cuboids_returns_snapshot() {
        let bag = Bag::restore(BagId(1), "bag".to_string(), 100.0, vec![cuboid(1, 1.0, 1.0, 1.0)]);

        let mut snapshot = bag.cuboids();
        snapshot.clear();
        snapshot.push(cuboid(9, 4.0, 4.0, 4.0));

        assert_eq!(bag.cuboid_count(), 1);
        assert_eq!(bag.cuboids()[0].id, CuboidId(1));
        assert_eq!(bag.payload_volume(), 1.0);
    }

    #[test]
    fn test_capacity_checks() {
        let bag = Bag::restore(BagId(1), "bag".to_string(), 50.0, vec![cuboid(1, 2.0, 2.0, 10.0)]);

        assert!(bag.ensure_capacity(10.0).is_ok());
        assert_eq!(
            bag.ensure_capacity(500.0),
            Err(BagError::CapacityExceeded { requested: 500.0, available: 10.0 })
        );

        // Growing the existing cuboid only competes with the rest of the bag
        assert!(bag.ensure_capacity_for(CuboidId(1), 50.0).is_ok());
        assert!(bag.ensure_capacity_for(CuboidId(1), 51.0).is_err());
    }

    #[test]
    fn test_exact_fill_despite_rounding() {
        let bag = Bag::restore(
            BagId(1),
            "small".to_string(),
            0.6,
            vec![cuboid(1, 0.1, 1.0, 1.0), cuboid(2, 0.2, 1.0, 1.0)],
        );

        assert!(bag.can_hold(0.3));
        assert!(bag.ensure_capacity(0.3).is_ok());
        assert!(bag.ensure_capacity(0.3001).is_err());
    }
}
