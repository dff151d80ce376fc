use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use stockroom_core::{CoreError, ValidationErrors};
use utoipa::ToSchema;

#[derive(Debug)]
pub enum AppError {
    ValidationError(ValidationErrors),
    NotFoundError(String),
    BadRequestError(String),
    InternalServerError(String),
}

/// JSON body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Insufficient stock. Available: 5")]
    pub error: String,
    /// Violated fields, present on validation failures only
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub fields: Option<ValidationErrors>,
}

impl ErrorBody {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::ValidationError(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Validation failed".to_string(),
                    fields: Some(errors),
                },
            ),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, ErrorBody::message(msg)),
            AppError::BadRequestError(msg) => (StatusCode::BAD_REQUEST, ErrorBody::message(msg)),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("Internal Server Error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(errors) => AppError::ValidationError(errors),
            err @ CoreError::NotFound { .. } => AppError::NotFoundError(err.to_string()),
            err @ CoreError::InsufficientStock { .. } => AppError::BadRequestError(err.to_string()),
            CoreError::PersistenceError(msg) => AppError::InternalServerError(msg),
        }
    }
}
