use crate::imaging::ImagingError;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::FormRejection;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum VitrineError {
    #[error("Image error: {0}")]
    Imaging(#[from] ImagingError),

    #[error("Duplicate key in {table}")]
    DuplicateKey { table: &'static str },

    #[error("Unknown field `{field}` for {table}")]
    UnknownField { table: &'static str, field: String },

    #[error("Missing form field: {0}")]
    MissingField(&'static str),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Invalid multipart request: {0}")]
    MultipartRejection(#[from] MultipartRejection),

    #[error("Invalid form: {0}")]
    Form(#[from] FormRejection),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Blocking task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl VitrineError {
    /// Translate a failed insert into `DuplicateKey` when a unique constraint fired.
    pub fn from_insert(err: SqlxError, table: &'static str) -> Self {
        if let SqlxError::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return VitrineError::DuplicateKey { table };
        }
        VitrineError::DatabaseError(err)
    }
}

impl IntoResponse for VitrineError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            VitrineError::Imaging(ImagingError::Decode(_)) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody::new("INVALID_IMAGE", "Uploaded file is not a readable image."),
            ),
            VitrineError::Imaging(ImagingError::UnsupportedFormat(_)) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                ApiErrorBody::new(
                    "UNSUPPORTED_FORMAT",
                    "Uploaded file extension is not a supported image format.",
                ),
            ),
            VitrineError::Imaging(ImagingError::InvalidTarget { .. }) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody::new("INVALID_TARGET", "Target image size must be positive."),
            ),
            VitrineError::Imaging(ImagingError::NameCollision(_)) => (
                StatusCode::CONFLICT,
                ApiErrorBody::new("NAME_COLLISION", "Upload name clash; please resubmit."),
            ),
            VitrineError::DuplicateKey { table } => (
                StatusCode::CONFLICT,
                ApiErrorBody::new("DUPLICATE", &format!("Record already exists in {table}.")),
            ),
            VitrineError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody::new("MISSING_FIELD", &format!("Missing form field `{field}`.")),
            ),
            VitrineError::Multipart(e) => {
                let status = e.status();
                let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "PAYLOAD_TOO_LARGE"
                } else {
                    "INVALID_MULTIPART"
                };
                (status, ApiErrorBody::new(code, &e.body_text()))
            }
            VitrineError::MultipartRejection(rejection) => (
                rejection.status(),
                ApiErrorBody::new("INVALID_MULTIPART", &rejection.body_text()),
            ),
            VitrineError::Form(
                rejection @ (FormRejection::FailedToDeserializeForm(_)
                | FormRejection::FailedToDeserializeFormBody(_)),
            ) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody::new("MISSING_FIELD", &rejection.body_text()),
            ),
            VitrineError::Form(rejection) => (
                rejection.status(),
                ApiErrorBody::new("INVALID_FORM", &rejection.body_text()),
            ),
            err @ (VitrineError::Imaging(_)
            | VitrineError::UnknownField { .. }
            | VitrineError::DatabaseError(_)
            | VitrineError::Io(_)
            | VitrineError::TaskJoin(_)) => {
                error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody::new("INTERNAL_ERROR", "An internal server error occurred."),
                )
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiErrorBody {
    fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
