//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use greencampus_core::error::GreenCampusError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Handler error: a core error plus its HTTP rendering.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub GreenCampusError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            GreenCampusError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GreenCampusError::Fetch(_) | GreenCampusError::InconsistentCounts(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            GreenCampusError::MissingField { .. }
            | GreenCampusError::DegenerateRange { .. }
            | GreenCampusError::UnmatchedSeverity { .. }
            | GreenCampusError::InvalidDate(_)
            | GreenCampusError::UnsupportedVersion
            | GreenCampusError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, code = self.0.client_code().as_str(), "request failed");
        }
        let body = Json(json!({
            "error": self.0.client_code().as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
