// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP error mapping.
//!
//! ```text
//! InvalidFolderName          --> 400
//! NotAGitRepository          --> 400 (fixed message)
//! CommandFailed              --> 500 "<context>: <stderr>"
//! anything else              --> 500
//! JsonRejection              --> rejection status (400/415/422)
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use super::models::ErrorBody;
use crate::error::{GitError, MonitorError};
use crate::git::GitOperation;

/// Detail for clone-or-pull on a folder that exists without `.git`.
pub const CLONE_TARGET_NOT_A_REPO: &str =
    "The specified folder exists but is not a Git repository.";

/// Detail for branch counting on a folder that is missing or has no `.git`.
pub const COUNT_TARGET_NOT_A_REPO: &str = "The specified folder is not a Git repository.";

/// Result type for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by route handlers, rendered as `{"detail": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),

    /// The request body did not match the route's JSON shape.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rejected { status, .. } => *status,
        }
    }

    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::BadRequest(detail) | Self::Internal(detail) | Self::Rejected { detail, .. } => {
                detail
            }
        }
    }
}

impl From<MonitorError> for ApiError {
    fn from(err: MonitorError) -> Self {
        match err.as_git() {
            Some(GitError::InvalidFolderName { name, reason }) => {
                Self::BadRequest(format!("Invalid folder name '{name}': {reason}"))
            }
            Some(GitError::NotAGitRepository { operation, .. }) => {
                Self::BadRequest(match operation {
                    GitOperation::ListRemoteBranches => COUNT_TARGET_NOT_A_REPO,
                    GitOperation::Clone | GitOperation::Pull => CLONE_TARGET_NOT_A_REPO,
                }
                .to_string())
            }
            Some(GitError::CommandFailed {
                operation, stderr, ..
            }) => Self::Internal(format!("{}: {stderr}", operation.failure_context())),
            None => {
                error!(error = %err, "request failed");
                Self::Internal(format!("Internal server error: {err}"))
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.detail().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
