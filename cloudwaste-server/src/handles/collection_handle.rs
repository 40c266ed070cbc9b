use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use cloudwaste_api::models as api;
use cloudwaste_api::models::{
    BinStatus, COLLECTED_FILL_LEVEL, CreateCollectionRequest, HistoryEntry, HistoryQuery,
    MessageResponse,
};
use time::{Duration, OffsetDateTime};

use crate::errors::ApiError;
use crate::models::Collection;
use crate::repositories::{BinRepository, CollectionRepository};

const DEFAULT_HISTORY_DAYS: i64 = 7;

#[derive(Clone)]
pub struct CollectionState {
    pub bin_repository: Arc<BinRepository>,
    pub collection_repository: Arc<CollectionRepository>,
}

pub fn collection_router(collection_state: CollectionState) -> Router {
    Router::new()
        .route("/api/collections", post(create_collection))
        .route("/api/collections/history", get(get_collection_history))
        .with_state(collection_state)
}

#[utoipa::path(
    post,
    path = "/api/collections",
    tag = "collection",
    request_body = CreateCollectionRequest,
    responses(
        (status = 200, description = "Collection logged and bin emptied", body = MessageResponse),
        (status = 500, description = "Database error", body = api::ErrorResponse)
    )
)]
pub async fn create_collection(
    State(state): State<CollectionState>,
    WithRejection(Json(body), _): WithRejection<Json<CreateCollectionRequest>, ApiError>,
) -> Result<Json<MessageResponse>, ApiError> {
    let collection = Collection {
        id: 0,
        bin_id: body.bin_id,
        truck_id: body.truck_id,
        driver_id: body.driver_id,
        collected_at: OffsetDateTime::now_utc(),
    };

    // Log and reset commit together or not at all
    let mut tx = state.bin_repository.get_pool().begin().await?;

    state
        .collection_repository
        .create(&collection, &mut tx)
        .await?;

    state
        .bin_repository
        .reset_after_collection(
            &collection.bin_id,
            COLLECTED_FILL_LEVEL,
            BinStatus::Normal.as_str(),
            collection.collected_at,
            &mut tx,
        )
        .await?;

    tx.commit().await?;

    tracing::info!(
        "bin {} collected by truck {} (driver {})",
        collection.bin_id,
        collection.truck_id,
        collection.driver_id
    );

    Ok(Json(MessageResponse {
        success: true,
        message: String::from("Collection logged"),
    }))
}

#[utoipa::path(
    get,
    path = "/api/collections/history",
    tag = "collection",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Collections per UTC day, newest first", body = Vec<HistoryEntry>),
        (status = 500, description = "Database error", body = api::ErrorResponse)
    )
)]
pub async fn get_collection_history(
    State(state): State<CollectionState>,
    WithRejection(Query(query), _): WithRejection<Query<HistoryQuery>, ApiError>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let days = query.days.unwrap_or(DEFAULT_HISTORY_DAYS);

    let since = days
        .checked_mul(86_400)
        .map(Duration::seconds)
        .and_then(|window| OffsetDateTime::now_utc().checked_sub(window))
        .ok_or_else(|| anyhow!("history window of {} days is out of range", days))?;

    let rows = state.collection_repository.find_daily_counts(since).await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
