// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Task endpoint backends.
//!
//! The server does not run the agent itself. Requests reaching the task
//! endpoint are handed to a [`TaskHandler`], which either forwards them to
//! the agent runtime ([`UpstreamTaskHandler`]) or refuses them
//! ([`UnconfiguredTaskHandler`]).

use std::time::Duration;

use agentcard_common_core::AgentName;
use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::StatusCode;
use tracing::debug;

/// Upstream agent calls can run for as long as the model does.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, thiserror::Error)]
pub enum TaskError {
	#[error("no agent backend configured")]
	NotConfigured,

	#[error("upstream agent request failed: {0}")]
	Upstream(#[from] reqwest::Error),
}

/// A task request as received on the task endpoint.
#[derive(Debug, Clone)]
pub struct TaskRequest {
	pub content_type: Option<String>,
	pub body: Bytes,
}

/// The backend's answer, relayed to the client as-is.
#[derive(Debug, Clone)]
pub struct TaskResponse {
	pub status: StatusCode,
	pub content_type: Option<String>,
	pub body: Bytes,
}

#[async_trait]
pub trait TaskHandler: Send + Sync {
	async fn handle(
		&self,
		agent: &AgentName,
		request: TaskRequest,
	) -> Result<TaskResponse, TaskError>;
}

/// Rejects every task; used when no upstream runtime is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredTaskHandler;

#[async_trait]
impl TaskHandler for UnconfiguredTaskHandler {
	async fn handle(
		&self,
		_agent: &AgentName,
		_request: TaskRequest,
	) -> Result<TaskResponse, TaskError> {
		Err(TaskError::NotConfigured)
	}
}

/// Forwards task requests to an agent runtime over HTTP.
pub struct UpstreamTaskHandler {
	client: reqwest::Client,
	url: String,
}

impl UpstreamTaskHandler {
	pub fn new(url: impl Into<String>) -> Result<Self, TaskError> {
		Self::with_timeout(url, DEFAULT_UPSTREAM_TIMEOUT)
	}

	pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, TaskError> {
		let client = reqwest::Client::builder()
			.user_agent(concat!("agentcard/", env!("CARGO_PKG_VERSION")))
			.timeout(timeout)
			.build()?;
		Ok(Self {
			client,
			url: url.into(),
		})
	}

	pub fn url(&self) -> &str {
		&self.url
	}
}

#[async_trait]
impl TaskHandler for UpstreamTaskHandler {
	async fn handle(
		&self,
		agent: &AgentName,
		request: TaskRequest,
	) -> Result<TaskResponse, TaskError> {
		debug!(
			agent = %agent,
			upstream = %self.url,
			bytes = request.body.len(),
			"forwarding task request"
		);

		let mut builder = self.client.post(&self.url).body(request.body);
		if let Some(content_type) = &request.content_type {
			builder = builder.header(reqwest::header::CONTENT_TYPE, content_type);
		}

		let response = builder.send().await?;
		let status = response.status();
		let content_type = response
			.headers()
			.get(reqwest::header::CONTENT_TYPE)
			.and_then(|v| v.to_str().ok())
			.map(str::to_string);
		let body = response.bytes().await?;

		debug!(agent = %agent, status = %status, bytes = body.len(), "upstream responded");

		Ok(TaskResponse {
			status,
			content_type,
			body,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn unconfigured_handler_refuses() {
		let agent = AgentName::parse("agent_1").unwrap();
		let result = UnconfiguredTaskHandler
			.handle(
				&agent,
				TaskRequest {
					content_type: None,
					body: Bytes::new(),
				},
			)
			.await;
		assert!(matches!(result, Err(TaskError::NotConfigured)));
	}

	#[tokio::test]
	async fn upstream_handler_reports_unreachable_runtime() {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		drop(listener);

		let handler =
			UpstreamTaskHandler::with_timeout(format!("http://{addr}/"), Duration::from_secs(5))
				.unwrap();
		let agent = AgentName::parse("agent_1").unwrap();
		let result = handler
			.handle(
				&agent,
				TaskRequest {
					content_type: Some("application/json".to_string()),
					body: Bytes::from_static(b"{}"),
				},
			)
			.await;
		assert!(matches!(result, Err(TaskError::Upstream(_))));
	}
}
