// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! HTTP error mapping and the validating JSON extractor.
//!
//! Every failure leaves the API as a JSON [`ErrorResponse`]. Malformed or
//! invalid request bodies carry a list of violations.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::{error, warn};
use validator::{Validate, ValidationErrors};

use crate::application::error::ServiceError;
use crate::presentation::dto::{ErrorResponse, Violation};

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    violations: Option<Vec<Violation>>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            violations: None,
        }
    }

    pub fn bad_request(message: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            violations: Some(violations),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            ServiceError::CapacityExceeded { .. } | ServiceError::Unprocessable(_) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            ServiceError::Invalid(message) => Self::bad_request(message, vec![]),
            ServiceError::Repository(e) => {
                error!("Repository failure: {}", e);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        Self::bad_request(
            "Malformed request body",
            vec![Violation {
                field: "body".to_string(),
                message: rejection.body_text(),
            }],
        )
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(
            "Invalid path parameter",
            vec![Violation {
                field: "id".to_string(),
                message: rejection.body_text(),
            }],
        )
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut violations: Vec<Violation> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |e| Violation {
                    field: field.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));

        Self::bad_request("Validation failed", violations)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: self.status.as_u16(),
            message: self.message,
            violations: self.violations,
        };
        (self.status, Json(body)).into_response()
    }
}

/// JSON body that has passed its `validator` rules
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}
