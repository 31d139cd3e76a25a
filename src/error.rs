//! Error handling for the application

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::pricing::responses::PricingErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Invalid request body: {0}")]
    InvalidRequest(#[from] JsonRejection),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                PricingErrorResponse {
                    error_type: "not_found".to_string(),
                    message: "Not found".to_string(),
                    details: None,
                },
            ),
            AppError::InvalidRequest(rejection) => {
                tracing::warn!("Rejected request body: {}", rejection);
                (
                    StatusCode::BAD_REQUEST,
                    PricingErrorResponse {
                        error_type: "invalid_request".to_string(),
                        message: rejection.body_text(),
                        details: None,
                    },
                )
            }
            AppError::Pricing(e) => {
                tracing::warn!(error_type = e.error_type(), "Pricing error: {}", e);
                (StatusCode::UNPROCESSABLE_ENTITY, PricingErrorResponse::from(e))
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
