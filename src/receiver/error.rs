use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReceiverError {
    #[error("Sheet I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sheet encoding failed: {0}")]
    Csv(#[from] csv::Error),
}

impl IntoResponse for ReceiverError {
    fn into_response(self) -> Response {
        tracing::error!("Failed to append log row: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
