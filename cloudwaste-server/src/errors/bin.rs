use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum BinError {
    #[error("Bin not found")]
    BinNotFound,
}

impl BinError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BinError::BinNotFound => StatusCode::NOT_FOUND,
        }
    }
}
