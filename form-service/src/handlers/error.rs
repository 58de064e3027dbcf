use crate::dtos::forms::{FailureResponse, DELETE_FAILED, FETCH_FAILED, SUBMIT_FAILED};
use axum::{
    extract::rejection::{BytesRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;
use thiserror::Error;

/// A failed form operation, rendered as `{ "message", "error" }`.
#[derive(Debug, Error)]
pub enum FormApiError {
    #[error("Failed To Submit Form: {0}")]
    Submit(#[source] AppError),

    #[error("Failed To Fetch Forms: {0}")]
    Fetch(#[source] AppError),

    #[error("Failed To Delete Form: {0}")]
    Delete(#[source] AppError),

    /// The body could not be read or parsed (bad JSON, too large).
    #[error("Failed To Submit Form: {detail}")]
    RejectedBody { status: StatusCode, detail: String },
}

impl FormApiError {
    pub fn message(&self) -> &'static str {
        match self {
            FormApiError::Submit(_) | FormApiError::RejectedBody { .. } => SUBMIT_FAILED,
            FormApiError::Fetch(_) => FETCH_FAILED,
            FormApiError::Delete(_) => DELETE_FAILED,
        }
    }
}

impl From<JsonRejection> for FormApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON that does not coerce into a form.
            JsonRejection::JsonDataError(err) => {
                FormApiError::Submit(AppError::BadRequest(anyhow::anyhow!(err.body_text())))
            }
            other => FormApiError::RejectedBody {
                status: other.status(),
                detail: other.body_text(),
            },
        }
    }
}

impl From<BytesRejection> for FormApiError {
    fn from(rejection: BytesRejection) -> Self {
        FormApiError::RejectedBody {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for FormApiError {
    fn into_response(self) -> Response {
        let message = self.message();
        let (status, error) = match self {
            FormApiError::Submit(err) | FormApiError::Fetch(err) | FormApiError::Delete(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.detail())
            }
            FormApiError::RejectedBody { status, detail } => (status, detail),
        };
        let error = if error.is_empty() {
            "unknown error".to_string()
        } else {
            error
        };

        (
            status,
            Json(FailureResponse {
                message: message.to_string(),
                error,
            }),
        )
            .into_response()
    }
}
