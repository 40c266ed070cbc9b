use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use cloudwaste_api::models as api;
use cloudwaste_api::models::{HealthResponse, RouteResponse, Stats};
use time::{OffsetDateTime, Time};

use crate::errors::ApiError;
use crate::repositories::{BinRepository, StatsRepository};
use crate::services::plan_collection_route;

pub const SERVICE_NAME: &str = "CloudWaste Yaoundé API";

#[derive(Clone)]
pub struct AnalyticsState {
    pub bin_repository: Arc<BinRepository>,
    pub stats_repository: Arc<StatsRepository>,
}

pub fn analytics_router(analytics_state: AnalyticsState) -> Router {
    Router::new()
        .route("/api/stats", get(get_stats))
        .route("/api/optimize-route", post(optimize_route))
        .route("/api/health", get(health))
        .with_state(analytics_state)
}

#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "analytics",
    responses(
        (status = 200, description = "Dashboard counters", body = Stats),
        (status = 500, description = "Database error", body = api::ErrorResponse)
    )
)]
pub async fn get_stats(State(state): State<AnalyticsState>) -> Result<Json<Stats>, ApiError> {
    let today_start = OffsetDateTime::now_utc().replace_time(Time::MIDNIGHT);

    let snapshot = state.stats_repository.snapshot(today_start).await?;

    Ok(Json(Stats {
        total_bins: snapshot.total_bins,
        critical_bins: snapshot.critical_bins,
        active_trucks: snapshot.active_trucks,
        pending_reports: snapshot.pending_reports,
        collections_today: snapshot.collections_today,
    }))
}

#[utoipa::path(
    post,
    path = "/api/optimize-route",
    tag = "analytics",
    responses(
        (status = 200, description = "Bins needing collection, fullest first", body = RouteResponse),
        (status = 500, description = "Database error", body = api::ErrorResponse)
    )
)]
pub async fn optimize_route(
    State(state): State<AnalyticsState>,
) -> Result<Json<RouteResponse>, ApiError> {
    let bins = state.bin_repository.find_needing_collection().await?;
    let route = plan_collection_route(bins);

    Ok(Json(RouteResponse {
        success: true,
        total_bins: route.len(),
        route,
    }))
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "analytics",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("healthy"),
        timestamp: OffsetDateTime::now_utc(),
        service: String::from(SERVICE_NAME),
    })
}
