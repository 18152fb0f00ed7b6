// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Request and response bodies.

use serde::{Deserialize, Serialize};

/// Body of `POST /git-pull/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneOrPullRequest {
    pub repo_url: String,
    pub folder_name: String,
}

/// Body of `POST /count-branches/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchCountRequest {
    pub folder_name: String,
}

/// Success body shared by both git routes.
///
/// Fields that do not apply to a route are left out of the JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<Vec<String>>,
}

/// Failure body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Body of `GET /healthz`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
