mod api;
mod bin;

pub use api::ApiError;
pub use bin::BinError;

use axum::Json;
use axum::response::{IntoResponse, Response};
use cloudwaste_api::models::ErrorResponse;
use uuid::Uuid;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BinError(e) => (e.status_code(), e.to_string()),
            other => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "{}", other);
                (other.status_code(), String::from("Database error"))
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
