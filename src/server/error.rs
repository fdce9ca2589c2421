// src/server/error.rs

//! Mapping pipeline failures onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::auth::AuthenticationError;
use crate::resolve::ResolutionError;

use super::types::ErrorDetail;

/// Why a trigger was turned away before anything was scheduled.
#[derive(Debug, Error)]
pub enum RejectError {
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("invalid request body: {0}")]
    InvalidBody(String),
}

impl RejectError {
    /// - authentication and client-caused resolution failures: 403
    /// - unparsable JSON body: 422
    /// - the runtime itself failing during resolution: 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Authentication(_) => StatusCode::FORBIDDEN,
            Self::Resolution(err) if err.is_client_error() => StatusCode::FORBIDDEN,
            Self::Resolution(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Client-facing detail. Stable messages only; command stderr never
    /// leaves the process.
    pub fn detail(&self) -> String {
        match self {
            Self::Resolution(err) if !err.is_client_error() => "internal error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for RejectError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorDetail {
            detail: self.detail(),
        };
        (status, Json(body)).into_response()
    }
}
