// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Route handlers.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{info, instrument};

use super::AppState;
use super::error::ApiResult;
use super::models::{BranchCountRequest, CloneOrPullRequest, HealthResponse, OperationResult};

/// Success message for branch counting.
pub const BRANCH_COUNT_MESSAGE: &str = "Branch count calculated successfully";

/// `POST /git-pull/`
#[instrument(skip_all)]
pub async fn git_pull(
    State(state): State<AppState>,
    payload: Result<Json<CloneOrPullRequest>, JsonRejection>,
) -> ApiResult<Json<OperationResult>> {
    let Json(request) = payload?;
    info!(folder = %request.folder_name, url = %request.repo_url, "clone-or-pull requested");

    let outcome = state
        .executor
        .clone_or_pull(&request.repo_url, &request.folder_name)
        .await?;

    Ok(Json(OperationResult {
        message: outcome.action.message().to_string(),
        output: Some(outcome.output),
        branch_count: None,
        branches: None,
    }))
}

/// `POST /count-branches/`
#[instrument(skip_all)]
pub async fn count_branches(
    State(state): State<AppState>,
    payload: Result<Json<BranchCountRequest>, JsonRejection>,
) -> ApiResult<Json<OperationResult>> {
    let Json(request) = payload?;
    info!(folder = %request.folder_name, "branch count requested");

    let listing = state.executor.count_branches(&request.folder_name).await?;

    Ok(Json(OperationResult {
        message: BRANCH_COUNT_MESSAGE.to_string(),
        output: None,
        branch_count: Some(listing.count()),
        branches: Some(listing.branches),
    }))
}

/// `GET /healthz`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
