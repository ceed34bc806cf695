use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::responses::ApiErrorResponse;
use thiserror::Error;

/// The upstream call that was being made when something went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamOperation {
    ListAll,
    GetById,
    Create,
    DeleteById,
}

impl fmt::Display for UpstreamOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ListAll => "list_all",
            Self::GetById => "get_by_id",
            Self::Create => "create",
            Self::DeleteById => "delete_by_id",
        };
        f.write_str(name)
    }
}

/// Transport failure, non-2xx status, or undecodable body from the upstream service.
#[derive(Debug, Clone, Error)]
#[error("{operation} failed{}: {reason}", status_suffix(.status))]
pub struct UpstreamFault {
    pub operation: UpstreamOperation,
    /// HTTP status, when the upstream answered at all.
    pub status: Option<u16>,
    pub reason: String,
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" with status {s}")).unwrap_or_default()
}

impl UpstreamFault {
    pub fn new(operation: UpstreamOperation, status: Option<u16>, reason: impl Into<String>) -> Self {
        Self {
            operation,
            status,
            reason: reason.into(),
        }
    }
}

/// Application-level errors for the employee facade.
///
/// Each variant maps to an HTTP status code via the [`IntoResponse`] implementation.
#[derive(Debug, Error)]
pub enum EmployeeServiceError {
    /// Requested employee does not exist upstream.
    #[error("Not Found: {0}")]
    NotFound(String),

    /// Caller sent an invalid request.
    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// Upstream accepted the create call but returned no employee.
    #[error("Creation Failed: {0}")]
    CreationFailed(String),

    /// Upstream refused the delete, returned nothing, or could not be reached.
    #[error("Deletion Failed: {0}")]
    DeletionFailed(String),

    #[error("Upstream Error: {0}")]
    Upstream(#[from] UpstreamFault),
}

impl EmployeeServiceError {
    fn category(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "Employee not found",
            Self::BadRequest(_) => "Invalid request",
            Self::CreationFailed(_) | Self::DeletionFailed(_) => "FAILED",
            Self::Upstream(_) => "Upstream service error",
        }
    }
}

impl IntoResponse for EmployeeServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::CreationFailed(_) | Self::DeletionFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, %status, "Server error");
        } else {
            tracing::warn!(error = %self, %status, "Client error");
        }

        let body = ApiErrorResponse::of(self.category(), self.to_string());
        (status, axum::Json(body)).into_response()
    }
}
