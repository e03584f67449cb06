//! Error types for the PDF Genie server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::extract::ExtractError;
use crate::genie::GenerateError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
///
/// Components return their own error kinds; the status code is decided here,
/// once, when the error leaves the handler.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Error extracting text from PDF: {0}")]
    Extraction(ExtractError),

    #[error("Error generating explanation: {0}")]
    Generation(#[from] GenerateError),

    #[error("Oops! Something went wrong while processing your PDF. 😅 Error: {0}")]
    Internal(String),
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            // A crashed worker says nothing about the upload itself
            ExtractError::Task(msg) => AppError::Internal(msg),
            other => AppError::Extraction(other),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Extraction(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Generation(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", detail);
        } else {
            tracing::warn!(status = status.as_u16(), "{}", detail);
        }

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::BadRequest("nope".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(ExtractError::NotPdf).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(GenerateError::EmptyResponse).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::NotFound("Frontend not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_task_failure_is_internal() {
        let err = AppError::from(ExtractError::Task("worker panicked".into()));
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().ends_with("Error: worker panicked"));
    }

    #[test]
    fn test_messages_embed_cause() {
        let err = AppError::from(ExtractError::Pdf("cannot find startxref".into()));
        assert_eq!(
            err.to_string(),
            "Error extracting text from PDF: cannot find startxref"
        );

        let err = AppError::from(GenerateError::EmptyResponse);
        assert_eq!(
            err.to_string(),
            "Error generating explanation: Empty response from Gemini AI"
        );
    }
}
