// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::domain::bag::BagId;

// ============================================================================
// Value Objects
// ============================================================================

/// Storage-generated identifier for a cuboid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuboidId(pub i64);

impl std::fmt::Display for CuboidId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Width, height and depth of a box-shaped item.
///
/// The volume is never stored; it is always `width * height * depth`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    width: f64,
    height: f64,
    depth: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64, depth: f64) -> Result<Self, CuboidError> {
        for (name, value) in [("width", width), ("height", height), ("depth", depth)] {
            if !value.is_finite() {
                return Err(CuboidError::InvalidDimension {
                    name,
                    reason: "must be a finite number".to_string(),
                });
            }
            if value < 0.0 {
                return Err(CuboidError::InvalidDimension {
                    name,
                    reason: format!("must not be negative (got {})", value),
                });
            }
        }

        Ok(Self { width, height, depth })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }
}

// ============================================================================
// Entities
// ============================================================================

/// A cuboid that has not been persisted yet; storage assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCuboid {
    pub dimensions: Dimensions,
    pub bag_id: BagId,
}

impl NewCuboid {
    pub fn new(dimensions: Dimensions, bag_id: BagId) -> Self {
        Self { dimensions, bag_id }
    }

    pub fn volume(&self) -> f64 {
        self.dimensions.volume()
    }
}

/// Box-shaped item owned by exactly one bag
#[derive(Debug, Clone, PartialEq)]
pub struct Cuboid {
    pub id: CuboidId,
    pub dimensions: Dimensions,
    pub bag_id: BagId,
}

impl Cuboid {
    pub fn new(id: CuboidId, dimensions: Dimensions, bag_id: BagId) -> Self {
        Self { id, dimensions, bag_id }
    }

    pub fn volume(&self) -> f64 {
        self.dimensions.volume()
    }

    /// Replace the dimensions and the owning bag in one step.
    pub fn reshape(&mut self, dimensions: Dimensions, bag_id: BagId) {
        self.dimensions = dimensions;
        self.bag_id = bag_id;
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error, PartialEq)]
pub enum CuboidError {
    #[error("Invalid cuboid {name}: {reason}")]
    InvalidDimension { name: &'static str, reason: String },
}
