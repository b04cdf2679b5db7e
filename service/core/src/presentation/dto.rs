// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Transfer representations of bags and cuboids.
//!
//! Request bodies keep every field optional so that a missing field is
//! reported as a validation violation instead of a deserialization failure.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::cuboid_service::CuboidInput;
use crate::application::error::ServiceError;
use crate::domain::bag::{Bag, BagId};
use crate::domain::cuboid::{Cuboid, Dimensions};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CuboidRequest {
    #[validate(
        required(message = "width must not be null"),
        range(exclusive_min = 0.0, message = "width must be greater than 0")
    )]
    pub width: Option<f64>,

    #[validate(
        required(message = "height must not be null"),
        range(exclusive_min = 0.0, message = "height must be greater than 0")
    )]
    pub height: Option<f64>,

    #[validate(
        required(message = "depth must not be null"),
        range(exclusive_min = 0.0, message = "depth must be greater than 0")
    )]
    pub depth: Option<f64>,

    /// Informational only; the service always uses width * height * depth
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,

    #[serde(rename = "bagId")]
    #[validate(required(message = "bagId must not be null"))]
    pub bag_id: Option<i64>,
}

impl CuboidRequest {
    pub fn new(width: f64, height: f64, depth: f64, bag_id: i64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            depth: Some(depth),
            volume: Some(width * height * depth),
            bag_id: Some(bag_id),
        }
    }

    pub fn to_input(&self) -> Result<CuboidInput, ServiceError> {
        let (Some(width), Some(height), Some(depth), Some(bag_id)) =
            (self.width, self.height, self.depth, self.bag_id)
        else {
            return Err(ServiceError::Invalid(
                "width, height, depth and bagId are required".to_string(),
            ));
        };

        Ok(CuboidInput {
            dimensions: Dimensions::new(width, height, depth)?,
            bag_id: BagId(bag_id),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuboidResponse {
    pub id: i64,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub volume: f64,
    pub bag_id: i64,
}

impl From<&Cuboid> for CuboidResponse {
    fn from(cuboid: &Cuboid) -> Self {
        Self {
            id: cuboid.id.0,
            width: cuboid.dimensions.width(),
            height: cuboid.dimensions.height(),
            depth: cuboid.dimensions.depth(),
            volume: cuboid.volume(),
            bag_id: cuboid.bag_id.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BagRequest {
    #[validate(
        required(message = "title must not be null"),
        length(min = 1, max = 100, message = "title must be between 1 and 100 characters")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "volume must not be null"),
        range(min = 0.0, message = "volume must not be negative")
    )]
    pub volume: Option<f64>,
}

impl BagRequest {
    pub fn new(title: impl Into<String>, volume: f64) -> Self {
        Self {
            title: Some(title.into()),
            volume: Some(volume),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BagResponse {
    pub id: i64,
    pub title: String,
    pub volume: f64,
    pub payload_volume: f64,
    pub available_volume: f64,
    pub cuboids: Vec<CuboidResponse>,
}

impl From<&Bag> for BagResponse {
    fn from(bag: &Bag) -> Self {
        Self {
            id: bag.id.0,
            title: bag.title.clone(),
            volume: bag.volume,
            payload_volume: bag.payload_volume(),
            available_volume: bag.available_volume(),
            cuboids: bag.cuboids().iter().map(CuboidResponse::from).collect(),
        }
    }
}

/// One failed validation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<Violation>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cuboid::CuboidId;

    #[test]
    fn test_empty_request_reports_every_required_field() {
        let errors = CuboidRequest::default().validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["width", "height", "depth", "bagId"] {
            assert!(fields.contains_key(field), "missing violation for {}", field);
        }
        assert!(!fields.contains_key("volume"));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let request = CuboidRequest::new(0.0, 1.0, 1.0, 1);
        assert!(request.validate().is_err());
        assert!(CuboidRequest::new(2.0, 3.0, 2.0, 3).validate().is_ok());
    }

    #[test]
    fn test_to_input_ignores_declared_volume() {
        let mut request = CuboidRequest::new(2.0, 3.0, 2.0, 3);
        request.volume = Some(999.0);

        let input = request.to_input().unwrap();
        assert_eq!(input.dimensions.volume(), 12.0);
        assert_eq!(input.bag_id, BagId(3));
    }

    #[test]
    fn test_cuboid_response_field_order() {
        let cuboid = Cuboid::new(CuboidId(3), Dimensions::new(3.0, 3.0, 3.0).unwrap(), BagId(3));
        let json = serde_json::to_string(&CuboidResponse::from(&cuboid)).unwrap();
        assert_eq!(
            json,
            r#"{"id":3,"width":3.0,"height":3.0,"depth":3.0,"volume":27.0,"bagId":3}"#
        );
    }

    #[test]
    fn test_bag_request_validation() {
        assert!(BagRequest::new("bag", 10.0).validate().is_ok());
        assert!(BagRequest::new("", 10.0).validate().is_err());
        assert!(BagRequest::new("x".repeat(101), 10.0).validate().is_err());
        assert!(BagRequest::new("bag", -1.0).validate().is_err());
        assert!(BagRequest::default().validate().is_err());
    }
}
