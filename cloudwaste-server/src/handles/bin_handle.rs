use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use cloudwaste_api::models as api;
use cloudwaste_api::models::{BinStatus, ReadingsQuery, SensorDataRequest, SensorDataResponse};
use time::OffsetDateTime;

use crate::errors::{ApiError, BinError};
use crate::models::SensorData;
use crate::repositories::{BinRepository, SensorRecordRepository};

const DEFAULT_READINGS_LIMIT: i64 = 50;

#[derive(Clone)]
pub struct BinState {
    pub bin_repository: Arc<BinRepository>,
    pub sensor_record_repository: Arc<SensorRecordRepository>,
}

pub fn bin_router(bin_state: BinState) -> Router {
    Router::new()
        .route("/api/bins", get(get_bins))
        .route("/api/bins/:bin_id", get(get_bin_by_id))
        .route(
            "/api/bins/:bin_id/sensor-data",
            get(get_sensor_data).post(ingest_sensor_data),
        )
        .route(
            "/api/bins/neighborhood/:neighborhood",
            get(get_bins_by_neighborhood),
        )
        .with_state(bin_state)
}

#[utoipa::path(
    get,
    path = "/api/bins",
    tag = "bin",
    responses(
        (status = 200, description = "All bins, fullest first", body = Vec<api::Bin>),
        (status = 500, description = "Database error", body = api::ErrorResponse)
    )
)]
pub async fn get_bins(State(state): State<BinState>) -> Result<Json<Vec<api::Bin>>, ApiError> {
    let bins = state.bin_repository.find_all().await?;

    Ok(Json(bins.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/bins/{bin_id}",
    tag = "bin",
    params(
        ("bin_id" = String, Path, description = "Bin identifier")
    ),
    responses(
        (status = 200, description = "Bin found", body = api::Bin),
        (status = 404, description = "Bin not found", body = api::ErrorResponse),
        (status = 500, description = "Database error", body = api::ErrorResponse)
    )
)]
pub async fn get_bin_by_id(
    State(state): State<BinState>,
    WithRejection(Path(bin_id), _): WithRejection<Path<String>, ApiError>,
) -> Result<Json<api::Bin>, ApiError> {
    let bin = state
        .bin_repository
        .find_by_id(&bin_id)
        .await?
        .ok_or(BinError::BinNotFound)?;

    Ok(Json(bin.into()))
}

#[utoipa::path(
    post,
    path = "/api/bins/{bin_id}/sensor-data",
    tag = "bin",
    params(
        ("bin_id" = String, Path, description = "Bin identifier")
    ),
    request_body = SensorDataRequest,
    responses(
        (status = 200, description = "Reading stored and bin status derived", body = SensorDataResponse),
        (status = 500, description = "Database error", body = api::ErrorResponse)
    )
)]
pub async fn ingest_sensor_data(
    State(state): State<BinState>,
    WithRejection(Path(bin_id), _): WithRejection<Path<String>, ApiError>,
    WithRejection(Json(body), _): WithRejection<Json<SensorDataRequest>, ApiError>,
) -> Result<Json<SensorDataResponse>, ApiError> {
    let status = BinStatus::from_fill_level(body.fill_level);

    let reading = SensorData {
        id: 0,
        bin_id,
        fill_level: body.fill_level,
        temperature: body.temperature,
        battery: body.battery,
        lat: body.lat,
        lng: body.lng,
        timestamp: OffsetDateTime::now_utc(),
    };

    let mut tx = state.bin_repository.get_pool().begin().await?;

    state
        .bin_repository
        .update_telemetry(&reading, status.as_str(), &mut tx)
        .await?;

    state
        .sensor_record_repository
        .create(&reading, &mut tx)
        .await?;

    tx.commit().await?;

    tracing::debug!("bin {} reported {}% ({})", reading.bin_id, reading.fill_level, status);

    Ok(Json(SensorDataResponse {
        success: true,
        message: String::from("Sensor data received"),
        status,
    }))
}

#[utoipa::path(
    get,
    path = "/api/bins/{bin_id}/sensor-data",
    tag = "bin",
    params(
        ("bin_id" = String, Path, description = "Bin identifier"),
        ReadingsQuery
    ),
    responses(
        (status = 200, description = "Latest readings, newest first", body = Vec<api::SensorReading>),
        (status = 500, description = "Database error", body = api::ErrorResponse)
    )
)]
pub async fn get_sensor_data(
    State(state): State<BinState>,
    WithRejection(Path(bin_id), _): WithRejection<Path<String>, ApiError>,
    WithRejection(Query(query), _): WithRejection<Query<ReadingsQuery>, ApiError>,
) -> Result<Json<Vec<api::SensorReading>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_READINGS_LIMIT).max(0);

    let readings = state
        .sensor_record_repository
        .find_latest_by_bin_id(&bin_id, limit)
        .await?;

    Ok(Json(readings.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/bins/neighborhood/{neighborhood}",
    tag = "bin",
    params(
        ("neighborhood" = String, Path, description = "Neighborhood name")
    ),
    responses(
        (status = 200, description = "Bins in the neighborhood, possibly none", body = Vec<api::Bin>),
        (status = 500, description = "Database error", body = api::ErrorResponse)
    )
)]
pub async fn get_bins_by_neighborhood(
    State(state): State<BinState>,
    WithRejection(Path(neighborhood), _): WithRejection<Path<String>, ApiError>,
) -> Result<Json<Vec<api::Bin>>, ApiError> {
    let bins = state
        .bin_repository
        .find_by_neighborhood(&neighborhood)
        .await?;

    Ok(Json(bins.into_iter().map(Into::into).collect()))
}
