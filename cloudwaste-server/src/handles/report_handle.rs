use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use cloudwaste_api::models as api;
use cloudwaste_api::models::{
    ANONYMOUS_REPORTER, CreateReportRequest, CreateReportResponse, MessageResponse, Priority,
    ReportStatus, UpdateReportRequest,
};
use time::OffsetDateTime;

use crate::errors::ApiError;
use crate::models::Report;
use crate::repositories::ReportRepository;

#[derive(Clone)]
pub struct ReportState {
    pub report_repository: Arc<ReportRepository>,
}

pub fn report_router(report_state: ReportState) -> Router {
    Router::new()
        .route("/api/reports", get(get_reports).post(create_report))
        .route("/api/reports/:report_id", patch(update_report_status))
        .with_state(report_state)
}

#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "report",
    responses(
        (status = 200, description = "Reports with bin details, newest first", body = Vec<api::ReportDetail>),
        (status = 500, description = "Database error", body = api::ErrorResponse)
    )
)]
pub async fn get_reports(
    State(state): State<ReportState>,
) -> Result<Json<Vec<api::ReportDetail>>, ApiError> {
    let reports = state.report_repository.find_all_with_bins().await?;

    Ok(Json(reports.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/reports",
    tag = "report",
    request_body = CreateReportRequest,
    responses(
        (status = 200, description = "Report created", body = CreateReportResponse),
        (status = 500, description = "Database error", body = api::ErrorResponse)
    )
)]
pub async fn create_report(
    State(state): State<ReportState>,
    WithRejection(Json(body), _): WithRejection<Json<CreateReportRequest>, ApiError>,
) -> Result<Json<CreateReportResponse>, ApiError> {
    let reporter = body
        .reporter
        .filter(|reporter| !reporter.is_empty())
        .unwrap_or_else(|| String::from(ANONYMOUS_REPORTER));

    let priority = body
        .priority
        .filter(|priority| !priority.as_str().is_empty())
        .unwrap_or(Priority::Medium);

    let now = OffsetDateTime::now_utc();
    let report = Report {
        id: 0,
        bin_id: body.bin_id,
        reporter,
        issue: body.issue,
        description: body.description,
        priority: priority.to_string(),
        status: ReportStatus::Pending.to_string(),
        created_at: now,
        updated_at: Some(now),
    };

    let mut tx = state.report_repository.get_pool().begin().await?;
    let created = state.report_repository.create(&report, &mut tx).await?;
    tx.commit().await?;

    tracing::info!("report {} filed by {}: {}", created.id, created.reporter, created.issue);

    Ok(Json(CreateReportResponse {
        success: true,
        report: created.into(),
    }))
}

#[utoipa::path(
    patch,
    path = "/api/reports/{report_id}",
    tag = "report",
    params(
        ("report_id" = i32, Path, description = "Report identifier")
    ),
    request_body = UpdateReportRequest,
    responses(
        (status = 200, description = "Report status updated", body = MessageResponse),
        (status = 500, description = "Database error", body = api::ErrorResponse)
    )
)]
pub async fn update_report_status(
    State(state): State<ReportState>,
    WithRejection(Path(report_id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateReportRequest>, ApiError>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut tx = state.report_repository.get_pool().begin().await?;
    state
        .report_repository
        .update_status(report_id, body.status.as_str(), OffsetDateTime::now_utc(), &mut tx)
        .await?;
    tx.commit().await?;

    Ok(Json(MessageResponse {
        success: true,
        message: String::from("Report updated"),
    }))
}
