// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Service Errors
//!
//! Every application service operation returns either its value or one of
//! these outcomes. The presentation layer maps each variant to a status code.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Tagged outcomes for bag and cuboid operations

use thiserror::Error;
use crate::domain::bag::BagError;
use crate::domain::cuboid::CuboidError;
use crate::domain::repository::RepositoryError;

pub const UPDATE_FAILED: &str = "An unexpected error occurred while updating a cuboid!";
pub const DELETE_FAILED: &str = "An unexpected error occurred while deleting a cuboid!";

/// Kind of entity a lookup failed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Bag,
    Cuboid,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Bag => write!(f, "Bag"),
            Entity::Cuboid => write!(f, "Cuboid"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Object {0} not found!")]
    NotFound(Entity),

    #[error("Bag capacity is not enough!")]
    CapacityExceeded { requested: f64, available: f64 },

    /// Unexpected failure that was normalized; the cause is only logged
    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }
}

impl From<BagError> for ServiceError {
    fn from(err: BagError) -> Self {
        match err {
            BagError::CapacityExceeded { requested, available } => {
                ServiceError::CapacityExceeded { requested, available }
            }
            other => ServiceError::Invalid(other.to_string()),
        }
    }
}

impl From<CuboidError> for ServiceError {
    fn from(err: CuboidError) -> Self {
        ServiceError::Invalid(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages() {
        assert_eq!(ServiceError::NotFound(Entity::Cuboid).to_string(), "Object Cuboid not found!");
        assert_eq!(ServiceError::NotFound(Entity::Bag).to_string(), "Object Bag not found!");
    }

    #[test]
    fn test_capacity_error_conversion() {
        let err: ServiceError = BagError::CapacityExceeded { requested: 500.0, available: 50.0 }.into();
        assert!(matches!(err, ServiceError::CapacityExceeded { .. }));
        assert_eq!(err.to_string(), "Bag capacity is not enough!");

        let err: ServiceError = BagError::InvalidVolume(-2.0).into();
        assert!(matches!(err, ServiceError::Invalid(_)));
    }
}
