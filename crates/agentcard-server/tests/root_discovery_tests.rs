// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Integration tests for root-based discovery.
//!
//! Tests cover:
//! - The well-known card route: success, missing file, unreadable file, bad JSON
//! - Card updates on disk are visible without restart
//! - `POST /` reaching the task endpoint and `GET /` not being rewritten
//! - Patch-then-read through the card route

use std::sync::{Arc, Mutex};

use agentcard_common_core::{patch_card_url, AgentName};
use agentcard_server::{
	create_app, AppState, RootRewriteService, TaskError, TaskHandler, TaskRequest, TaskResponse,
	UnconfiguredTaskHandler,
};
use async_trait::async_trait;
use axum::{
	body::{Body, Bytes},
	http::{header, Method, Request, StatusCode},
	response::Response,
	Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

const AGENT: &str = "test_agent";

/// Records every task request and answers with a fixed JSON-RPC result.
#[derive(Default)]
struct RecordingTaskHandler {
	requests: Mutex<Vec<TaskRequest>>,
}

impl RecordingTaskHandler {
	fn count(&self) -> usize {
		self.requests.lock().unwrap().len()
	}
}

#[async_trait]
impl TaskHandler for RecordingTaskHandler {
	async fn handle(
		&self,
		_agent: &AgentName,
		request: TaskRequest,
	) -> Result<TaskResponse, TaskError> {
		self.requests.lock().unwrap().push(request);
		Ok(TaskResponse {
			status: StatusCode::OK,
			content_type: Some("application/json".to_string()),
			body: Bytes::from_static(br#"{"jsonrpc":"2.0","id":1,"result":"ok"}"#),
		})
	}
}

struct TestApp {
	app: RootRewriteService<Router>,
	handler: Arc<RecordingTaskHandler>,
	dir: TempDir,
}

impl TestApp {
	fn new() -> Self {
		let dir = TempDir::new().unwrap();
		let handler = Arc::new(RecordingTaskHandler::default());
		let state = AppState::new(
			AgentName::parse(AGENT).unwrap(),
			dir.path(),
			handler.clone(),
		);
		Self {
			app: create_app(state),
			handler,
			dir,
		}
	}

	fn card_path(&self) -> std::path::PathBuf {
		self.dir.path().join(AGENT).join("agent.json")
	}

	fn write_card(&self, contents: &str) {
		let path = self.card_path();
		std::fs::create_dir_all(path.parent().unwrap()).unwrap();
		std::fs::write(path, contents).unwrap();
	}

	async fn send(&self, req: Request<Body>) -> Response {
		self.app.clone().oneshot(req).await.unwrap()
	}

	async fn get(&self, uri: &str) -> Response {
		self.send(Request::get(uri).body(Body::empty()).unwrap())
			.await
	}

	async fn post_json(&self, uri: &str, body: &str) -> Response {
		self.send(
			Request::post(uri)
				.header(header::CONTENT_TYPE, "application/json")
				.body(Body::from(body.to_string()))
				.unwrap(),
		)
		.await
	}
}

async fn body_json(response: Response) -> Value {
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&body).unwrap()
}

// ============================================================================
// Well-known card route
// ============================================================================

#[tokio::test]
async fn test_card_route_returns_card() {
	let app = TestApp::new();
	app.write_card(r#"{"name": "x", "url": "http://localhost:8001", "skills": [{"id": "s"}]}"#);

	let response = app.get("/.well-known/agent-card.json").await;

	assert_eq!(response.status(), StatusCode::OK);
	let content_type = response
		.headers()
		.get(header::CONTENT_TYPE)
		.and_then(|v| v.to_str().ok())
		.unwrap_or("");
	assert!(content_type.contains("application/json"));
	assert_eq!(
		body_json(response).await,
		json!({"name": "x", "url": "http://localhost:8001", "skills": [{"id": "s"}]})
	);
}

#[tokio::test]
async fn test_card_route_missing_file_is_404() {
	let app = TestApp::new();

	let response = app.get("/.well-known/agent-card.json").await;

	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	assert_eq!(
		body_json(response).await,
		json!({"error": "agent.json not found"})
	);
}

#[tokio::test]
async fn test_card_route_invalid_json_is_500() {
	let app = TestApp::new();
	app.write_card("{\"name\": ");

	let response = app.get("/.well-known/agent-card.json").await;

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(
		body_json(response).await,
		json!({"error": "Invalid agent.json format"})
	);
}

#[tokio::test]
async fn test_card_route_unreadable_file_is_500_with_distinct_error() {
	let app = TestApp::new();
	std::fs::create_dir_all(app.card_path()).unwrap();

	let response = app.get("/.well-known/agent-card.json").await;

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(
		body_json(response).await,
		json!({"error": "Failed to read agent.json"})
	);
}

#[tokio::test]
async fn test_card_route_serves_non_object_json_unchanged() {
	let app = TestApp::new();
	app.write_card("[1, 2, 3]");

	let response = app.get("/.well-known/agent-card.json").await;

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_json(response).await, json!([1, 2, 3]));
}

#[tokio::test]
async fn test_card_route_keeps_large_numbers_exact() {
	let app = TestApp::new();
	app.write_card(r#"{"url":"http://a","id":123456789012345678901234567890,"price":1.10}"#);

	let response = app.get("/.well-known/agent-card.json").await;

	assert_eq!(response.status(), StatusCode::OK);
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	assert_eq!(
		std::str::from_utf8(&body).unwrap(),
		r#"{"url":"http://a","id":123456789012345678901234567890,"price":1.10}"#
	);
}

#[tokio::test]
async fn test_card_route_rereads_file_on_every_request() {
	let app = TestApp::new();
	app.write_card(r#"{"url": "http://first"}"#);
	let first = body_json(app.get("/.well-known/agent-card.json").await).await;

	app.write_card(r#"{"url": "http://second"}"#);
	let second = body_json(app.get("/.well-known/agent-card.json").await).await;

	assert_eq!(first["url"], "http://first");
	assert_eq!(second["url"], "http://second");
}

#[tokio::test]
async fn test_internal_card_path_serves_same_card() {
	let app = TestApp::new();
	app.write_card(r#"{"name": "x", "url": "http://a"}"#);

	let root = body_json(app.get("/.well-known/agent-card.json").await).await;
	let response = app
		.get("/a2a/test_agent/.well-known/agent-card.json")
		.await;

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_json(response).await, root);
}

#[tokio::test]
async fn test_card_route_is_get_only() {
	let app = TestApp::new();
	app.write_card(r#"{"url": "http://a"}"#);

	let response = app.post_json("/.well-known/agent-card.json", "{}").await;

	assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ============================================================================
// Root rewrite through the full application
// ============================================================================

#[tokio::test]
async fn test_post_root_reaches_task_endpoint() {
	let app = TestApp::new();

	let response = app
		.post_json("/", r#"{"jsonrpc":"2.0","id":1,"method":"message/send"}"#)
		.await;

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(
		body_json(response).await,
		json!({"jsonrpc": "2.0", "id": 1, "result": "ok"})
	);

	let requests = app.handler.requests.lock().unwrap();
	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
	assert_eq!(
		&requests[0].body[..],
		br#"{"jsonrpc":"2.0","id":1,"method":"message/send"}"#
	);
}

#[tokio::test]
async fn test_post_root_with_upgrade_header_reaches_task_endpoint() {
	let app = TestApp::new();

	let response = app
		.send(
			Request::post("/")
				.header(header::UPGRADE, "h2c")
				.header(header::CONTENT_TYPE, "application/json")
				.body(Body::from("{}"))
				.unwrap(),
		)
		.await;

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(app.handler.count(), 1);
}

#[tokio::test]
async fn test_post_internal_path_reaches_task_endpoint() {
	let app = TestApp::new();

	let response = app.post_json("/a2a/test_agent", "{}").await;

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(app.handler.count(), 1);
}

#[tokio::test]
async fn test_get_root_is_not_rewritten() {
	let app = TestApp::new();

	let response = app.get("/").await;

	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	assert_eq!(body_json(response).await, json!({"error": "not_found"}));
	assert_eq!(app.handler.count(), 0);
}

#[tokio::test]
async fn test_post_near_miss_paths_are_not_rewritten() {
	let app = TestApp::new();

	for path in ["/foo", "/a2a", "/test_agent"] {
		let response = app.post_json(path, "{}").await;
		assert_eq!(
			response.status(),
			StatusCode::NOT_FOUND,
			"{path} should not reach the task endpoint"
		);
	}
	assert_eq!(app.handler.count(), 0);
}

#[tokio::test]
async fn test_other_methods_on_root_are_not_rewritten() {
	let app = TestApp::new();

	for method in [Method::PUT, Method::DELETE, Method::PATCH] {
		let response = app
			.send(
				Request::builder()
					.method(method.clone())
					.uri("/")
					.body(Body::empty())
					.unwrap(),
			)
			.await;
		assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method}");
	}
	assert_eq!(app.handler.count(), 0);
}

#[tokio::test]
async fn test_unconfigured_backend_is_503() {
	let dir = TempDir::new().unwrap();
	let state = AppState::new(
		AgentName::parse(AGENT).unwrap(),
		dir.path(),
		Arc::new(UnconfiguredTaskHandler),
	);
	let app = create_app(state);

	let response = app
		.oneshot(Request::post("/").body(Body::from("{}")).unwrap())
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(
		body_json(response).await,
		json!({"error": "Agent backend not configured"})
	);
}

#[tokio::test]
async fn test_health_endpoint() {
	let app = TestApp::new();

	let response = app.get("/health").await;

	assert_eq!(response.status(), StatusCode::OK);
	let json = body_json(response).await;
	assert_eq!(json["status"], "ok");
	assert_eq!(json["agent"], AGENT);
	assert!(json["version"].is_string());
}

// ============================================================================
// Patch then read
// ============================================================================

#[tokio::test]
async fn test_patched_url_is_served() {
	let app = TestApp::new();
	app.write_card(r#"{"url": "http://old", "name": "x"}"#);

	let url = patch_card_url(
		app.dir.path(),
		&AgentName::parse(AGENT).unwrap(),
		Some("https://agents.example.com"),
		8001,
	)
	.await;
	assert_eq!(url, "https://agents.example.com");

	let response = app.get("/.well-known/agent-card.json").await;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(
		body_json(response).await,
		json!({"url": "https://agents.example.com", "name": "x"})
	);
}

#[tokio::test]
async fn test_patch_default_url_is_served() {
	let app = TestApp::new();
	app.write_card(r#"{"name": "x", "url": "http://old"}"#);

	patch_card_url(app.dir.path(), &AgentName::parse(AGENT).unwrap(), None, 9123).await;

	let json = body_json(app.get("/.well-known/agent-card.json").await).await;
	assert_eq!(json["url"], "http://localhost:9123");
}
