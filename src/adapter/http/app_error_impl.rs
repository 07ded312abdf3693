use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::application::app_error::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Contract not found")]
    pub error: String,
    #[schema(example = "not_found")]
    pub kind: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            "not_found" => StatusCode::NOT_FOUND,
            "forbidden" => StatusCode::FORBIDDEN,
            "invalid_transition" | "conflict" => StatusCode::CONFLICT,
            "insufficient_balance" => StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error" | "signature_mismatch" => StatusCode::BAD_REQUEST,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Internal error: {}", self);
            status.canonical_reason().unwrap_or("Internal Server Error").to_string()
        } else {
            self.to_string()
        };

        let body = Json(ErrorResponse {
            error: message,
            kind: self.kind().to_string(),
        });

        (status, body).into_response()
    }
}
