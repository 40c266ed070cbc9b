use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use cloudwaste_api::models as api;
use cloudwaste_api::models::{SuccessResponse, TruckLocationRequest};
use time::OffsetDateTime;

use crate::errors::ApiError;
use crate::repositories::TruckRepository;

#[derive(Clone)]
pub struct TruckState {
    pub truck_repository: Arc<TruckRepository>,
}

pub fn truck_router(truck_state: TruckState) -> Router {
    Router::new()
        .route("/api/trucks", get(get_trucks))
        .route("/api/trucks/:truck_id/location", post(update_truck_location))
        .with_state(truck_state)
}

#[utoipa::path(
    get,
    path = "/api/trucks",
    tag = "truck",
    responses(
        (status = 200, description = "All trucks", body = Vec<api::Truck>),
        (status = 500, description = "Database error", body = api::ErrorResponse)
    )
)]
pub async fn get_trucks(State(state): State<TruckState>) -> Result<Json<Vec<api::Truck>>, ApiError> {
    let trucks = state.truck_repository.find_all().await?;

    Ok(Json(trucks.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/trucks/{truck_id}/location",
    tag = "truck",
    params(
        ("truck_id" = String, Path, description = "Truck identifier")
    ),
    request_body = TruckLocationRequest,
    responses(
        (status = 200, description = "Location overwritten", body = SuccessResponse),
        (status = 500, description = "Database error", body = api::ErrorResponse)
    )
)]
pub async fn update_truck_location(
    State(state): State<TruckState>,
    WithRejection(Path(truck_id), _): WithRejection<Path<String>, ApiError>,
    WithRejection(Json(body), _): WithRejection<Json<TruckLocationRequest>, ApiError>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let mut tx = state.truck_repository.get_pool().begin().await?;
    let touched = state
        .truck_repository
        .update_location(
            &truck_id,
            body.lat,
            body.lng,
            &body.location_name,
            OffsetDateTime::now_utc(),
            &mut tx,
        )
        .await?;
    tx.commit().await?;

    if touched == 0 {
        tracing::debug!("location update for unknown truck {}", truck_id);
    }

    Ok(Json(SuccessResponse { success: true }))
}
