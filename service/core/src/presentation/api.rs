// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::{debug, Level};

use crate::application::{BagService, CuboidService};
use crate::domain::bag::BagId;
use crate::domain::cuboid::CuboidId;
use crate::presentation::dto::{BagRequest, BagResponse, CuboidRequest, CuboidResponse};
use crate::presentation::error::{ApiError, ValidatedJson};

pub struct AppState {
    pub cuboid_service: Arc<dyn CuboidService>,
    pub bag_service: Arc<dyn BagService>,
    pub start_time: Instant,
}

type SharedState = Arc<AppState>;

pub fn app(cuboid_service: Arc<dyn CuboidService>, bag_service: Arc<dyn BagService>) -> Router {
    let state = Arc::new(AppState {
        cuboid_service,
        bag_service,
        start_time: Instant::now(),
    });

    Router::new()
        .route("/health", get(health))
        .route("/cuboids", get(list_cuboids).post(create_cuboid))
        .route(
            "/cuboids/{id}",
            get(get_cuboid).put(update_cuboid).delete(delete_cuboid),
        )
        .route("/bags", get(list_bags).post(create_bag))
        .route("/bags/{id}", get(get_bag).delete(delete_bag))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Micros),
                ),
        )
        .with_state(state)
}

async fn health(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": state.start_time.elapsed().as_secs(),
    }))
}

// ============================================================================
// Cuboids
// ============================================================================

async fn list_cuboids(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let cuboids = state.cuboid_service.get_all().await?;
    debug!("Listing {} cuboids", cuboids.len());
    Ok(Json(
        cuboids.iter().map(CuboidResponse::from).collect::<Vec<_>>(),
    ))
}

async fn get_cuboid(
    State(state): State<SharedState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let cuboid = state.cuboid_service.get(CuboidId(id)).await?;
    Ok(Json(CuboidResponse::from(&cuboid)))
}

async fn create_cuboid(
    State(state): State<SharedState>,
    ValidatedJson(request): ValidatedJson<CuboidRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cuboid = state.cuboid_service.create(request.to_input()?).await?;
    Ok((StatusCode::CREATED, Json(CuboidResponse::from(&cuboid))))
}

async fn update_cuboid(
    State(state): State<SharedState>,
    path: Result<Path<i64>, PathRejection>,
    ValidatedJson(request): ValidatedJson<CuboidRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let cuboid = state
        .cuboid_service
        .update(CuboidId(id), request.to_input()?)
        .await?;
    Ok(Json(CuboidResponse::from(&cuboid)))
}

async fn delete_cuboid(
    State(state): State<SharedState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    state.cuboid_service.delete(CuboidId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Bags
// ============================================================================

async fn list_bags(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let bags = state.bag_service.get_all().await?;
    Ok(Json(bags.iter().map(BagResponse::from).collect::<Vec<_>>()))
}

async fn get_bag(
    State(state): State<SharedState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let bag = state.bag_service.get(BagId(id)).await?;
    Ok(Json(BagResponse::from(&bag)))
}

async fn create_bag(
    State(state): State<SharedState>,
    ValidatedJson(request): ValidatedJson<BagRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(title), Some(volume)) = (request.title, request.volume) else {
        return Err(ApiError::bad_request("title and volume are required", vec![]));
    };
    let bag = state.bag_service.create(title, volume).await?;
    Ok((StatusCode::CREATED, Json(BagResponse::from(&bag))))
}

async fn delete_bag(
    State(state): State<SharedState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    state.bag_service.delete(BagId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
