use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::configs::{SchemaManager, Settings, Storage};
use crate::docs::ApiDoc;
use crate::handles::*;
use crate::repositories::*;

pub async fn create_app(settings: &Arc<Settings>) -> Result<Router, sqlx::Error> {
    let storage = Arc::new(Storage::new(settings.database.clone(), SchemaManager::default()).await?);

    Ok(build_router(storage))
}

pub fn build_router(storage: Arc<Storage>) -> Router {
    let bin_repository = Arc::new(BinRepository::new(storage.clone()));
    let sensor_record_repository = Arc::new(SensorRecordRepository::new(storage.clone()));
    let report_repository = Arc::new(ReportRepository::new(storage.clone()));
    let truck_repository = Arc::new(TruckRepository::new(storage.clone()));
    let collection_repository = Arc::new(CollectionRepository::new(storage.clone()));
    let stats_repository = Arc::new(StatsRepository::new(storage.clone()));

    let bins = bin_router(BinState {
        bin_repository: bin_repository.clone(),
        sensor_record_repository,
    });

    let reports = report_router(ReportState { report_repository });

    let trucks = truck_router(TruckState { truck_repository });

    let collections = collection_router(CollectionState {
        bin_repository: bin_repository.clone(),
        collection_repository,
    });

    let analytics = analytics_router(AnalyticsState {
        bin_repository,
        stats_repository,
    });

    Router::new()
        .merge(bins)
        .merge(reports)
        .merge(trucks)
        .merge(collections)
        .merge(analytics)
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
