// gitmonitor: git clone/pull/branch service over HTTP
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use std::ffi::OsString;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use super::build_app;
use super::error::{ApiError, CLONE_TARGET_NOT_A_REPO, COUNT_TARGET_NOT_A_REPO};
use crate::core::process::builder::ProcessOutput;
use crate::error::{GitError, MonitorResult, ProcessError};
use crate::git::{GitExecutor, GitOperation, GitRunner};

/// Runner that counts invocations and replies with a canned output.
struct CannedGit {
    reply: ProcessOutput,
    calls: AtomicUsize,
}

impl CannedGit {
    fn new(exit_code: i32, stdout: &str, stderr: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: ProcessOutput::new(exit_code, stdout.to_string(), stderr.to_string(), false),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GitRunner for CannedGit {
    async fn run(&self, _args: Vec<OsString>) -> MonitorResult<ProcessOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

fn app(root: &TempDir, git: &Arc<CannedGit>) -> Router {
    build_app(GitExecutor::new(
        root.path(),
        Arc::clone(git) as Arc<dyn GitRunner>,
    ))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

// =============================================================================
// error mapping
// =============================================================================

#[test]
fn test_not_a_repo_details_depend_on_operation() {
    let pull: ApiError = crate::error::MonitorError::from(GitError::NotAGitRepository {
        operation: GitOperation::Pull,
        path: "/r/x".to_string(),
    })
    .into();
    let count: ApiError = crate::error::MonitorError::from(GitError::NotAGitRepository {
        operation: GitOperation::ListRemoteBranches,
        path: "/r/x".to_string(),
    })
    .into();

    assert_eq!(pull.status(), StatusCode::BAD_REQUEST);
    assert_eq!(pull.detail(), CLONE_TARGET_NOT_A_REPO);
    assert_eq!(count.status(), StatusCode::BAD_REQUEST);
    assert_eq!(count.detail(), COUNT_TARGET_NOT_A_REPO);
}

#[test]
fn test_command_failure_detail_carries_stderr() {
    let err: ApiError = crate::error::MonitorError::from(GitError::CommandFailed {
        operation: GitOperation::Pull,
        command: "git -C /r/x pull".to_string(),
        stderr: "fatal: no remote\n".to_string(),
    })
    .into();

    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.detail(), "Error while executing git pull: fatal: no remote\n");
}

#[test]
fn test_missing_git_is_internal_error() {
    let err: ApiError = crate::error::MonitorError::from(ProcessError::ExecutableNotFound {
        name: "git".to_string(),
    })
    .into();

    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    insta::assert_snapshot!(
        err.detail(),
        @"Internal server error: process error: executable not found: 'git' (not in PATH)"
    );
}

// =============================================================================
// routes
// =============================================================================

#[tokio::test]
async fn test_git_pull_clones_missing_folder() {
    let root = tempfile::tempdir().unwrap();
    let git = CannedGit::new(0, "", "Cloning into 'demo'...\n");

    let (status, body) = send(
        app(&root, &git),
        post_json(
            "/git-pull/",
            r#"{"repo_url": "https://example.com/demo.git", "folder_name": "demo"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({"message": "Repository cloned successfully", "output": ""})
    );
    assert_eq!(git.calls(), 1);
}

#[tokio::test]
async fn test_git_pull_route_without_trailing_slash() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("demo/.git")).unwrap();
    let git = CannedGit::new(0, "Already up to date.\n", "");

    let (status, body) = send(
        app(&root, &git),
        post_json(
            "/git-pull",
            r#"{"repo_url": "https://example.com/demo.git", "folder_name": "demo"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Git pull executed successfully");
    assert_eq!(body["output"], "Already up to date.\n");
}

#[tokio::test]
async fn test_git_pull_plain_folder_is_bad_request() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("plain")).unwrap();
    let git = CannedGit::new(0, "", "");

    let (status, body) = send(
        app(&root, &git),
        post_json(
            "/git-pull/",
            r#"{"repo_url": "https://example.com/demo.git", "folder_name": "plain"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, serde_json::json!({"detail": CLONE_TARGET_NOT_A_REPO}));
    assert_eq!(git.calls(), 0);
}

#[tokio::test]
async fn test_git_pull_regular_file_is_bad_request() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("afile"), "x").unwrap();
    let git = CannedGit::new(0, "", "");

    let (status, body) = send(
        app(&root, &git),
        post_json(
            "/git-pull/",
            r#"{"repo_url": "https://example.com/demo.git", "folder_name": "afile"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, serde_json::json!({"detail": CLONE_TARGET_NOT_A_REPO}));
    assert_eq!(git.calls(), 0);
}

#[tokio::test]
async fn test_git_pull_traversal_is_bad_request() {
    let root = tempfile::tempdir().unwrap();
    let git = CannedGit::new(0, "", "");

    let (status, body) = send(
        app(&root, &git),
        post_json(
            "/git-pull/",
            r#"{"repo_url": "https://example.com/demo.git", "folder_name": "../escape"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Invalid folder name '../escape': must not contain path separators"
    );
    assert_eq!(git.calls(), 0);
}

#[tokio::test]
async fn test_git_pull_clone_failure_is_internal_error() {
    let root = tempfile::tempdir().unwrap();
    let git = CannedGit::new(128, "", "fatal: repository 'https://invalid-url.git/' not found\n");

    let (status, body) = send(
        app(&root, &git),
        post_json(
            "/git-pull/",
            r#"{"repo_url": "https://invalid-url.git", "folder_name": "invalid-repo"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["detail"],
        "Error while cloning repository: fatal: repository 'https://invalid-url.git/' not found\n"
    );
}

#[tokio::test]
async fn test_count_branches_returns_listing() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("demo/.git")).unwrap();
    let git = CannedGit::new(0, "  origin/HEAD -> origin/main\n  origin/main\n", "");

    let (status, body) = send(
        app(&root, &git),
        post_json("/count-branches/", r#"{"folder_name": "demo"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({
            "message": "Branch count calculated successfully",
            "branch_count": 2,
            "branches": ["origin/HEAD -> origin/main", "  origin/main"],
        })
    );
}

#[tokio::test]
async fn test_count_branches_missing_folder_is_bad_request() {
    let root = tempfile::tempdir().unwrap();
    let git = CannedGit::new(0, "", "");

    let (status, body) = send(
        app(&root, &git),
        post_json("/count-branches", r#"{"folder_name": "nonexistent-folder"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, serde_json::json!({"detail": COUNT_TARGET_NOT_A_REPO}));
    assert_eq!(git.calls(), 0);
}

#[tokio::test]
async fn test_count_branches_regular_file_is_bad_request() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("afile"), "x").unwrap();
    let git = CannedGit::new(0, "", "");

    let (status, body) = send(
        app(&root, &git),
        post_json("/count-branches/", r#"{"folder_name": "afile"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, serde_json::json!({"detail": COUNT_TARGET_NOT_A_REPO}));
    assert_eq!(git.calls(), 0);
}

#[tokio::test]
async fn test_count_branches_failure_is_internal_error() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("demo/.git")).unwrap();
    let git = CannedGit::new(128, "", "fatal: bad object\n");

    let (status, body) = send(
        app(&root, &git),
        post_json("/count-branches/", r#"{"folder_name": "demo"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Error while counting branches: fatal: bad object\n");
}

// =============================================================================
// body rejections
// =============================================================================

#[tokio::test]
async fn test_missing_field_is_rejected_before_git() {
    let root = tempfile::tempdir().unwrap();
    let git = CannedGit::new(0, "", "");

    let (status, body) = send(
        app(&root, &git),
        post_json("/git-pull/", r#"{"folder_name": "demo"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("repo_url"));
    assert_eq!(git.calls(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let root = tempfile::tempdir().unwrap();
    let git = CannedGit::new(0, "", "");

    let (status, body) = send(
        app(&root, &git),
        post_json("/count-branches/", "{not json"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
    assert_eq!(git.calls(), 0);
}

#[tokio::test]
async fn test_missing_content_type_is_unsupported_media_type() {
    let root = tempfile::tempdir().unwrap();
    let git = CannedGit::new(0, "", "");
    let request = Request::builder()
        .method("POST")
        .uri("/count-branches/")
        .body(Body::from(r#"{"folder_name": "demo"}"#))
        .unwrap();

    let (status, _) = send(app(&root, &git), request).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(git.calls(), 0);
}

#[tokio::test]
async fn test_get_on_git_route_is_method_not_allowed() {
    let root = tempfile::tempdir().unwrap();
    let git = CannedGit::new(0, "", "");
    let request = Request::builder()
        .uri("/git-pull/")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(app(&root, &git), request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_healthz() {
    let root = tempfile::tempdir().unwrap();
    let git = CannedGit::new(0, "", "");
    let request = Request::builder()
        .uri("/healthz")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(&root, &git), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
