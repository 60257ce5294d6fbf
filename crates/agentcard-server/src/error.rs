// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use agentcard_common_core::CardError;
use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::{Deserialize, Serialize};

use crate::task::TaskError;

/// Errors surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Agent card could not be served.
	#[error(transparent)]
	Card(#[from] CardError),

	/// Task request could not be handled.
	#[error(transparent)]
	Task(#[from] TaskError),

	/// No route matched.
	#[error("Not found")]
	NotFound,
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
}

impl ErrorResponse {
	pub fn new(error: impl Into<String>) -> Self {
		Self {
			error: error.into(),
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, message) = match &self {
			ServerError::Card(e @ CardError::NotFound { .. }) => {
				tracing::warn!(path = %e.path().display(), "Agent card not found");
				(StatusCode::NOT_FOUND, "agent.json not found")
			}
			ServerError::Card(e) if e.is_format() => {
				tracing::error!(path = %e.path().display(), error = %e, "Failed to parse agent card JSON");
				(StatusCode::INTERNAL_SERVER_ERROR, "Invalid agent.json format")
			}
			ServerError::Card(e) => {
				tracing::error!(path = %e.path().display(), error = %e, "Failed to read agent card");
				(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read agent.json")
			}
			ServerError::Task(TaskError::NotConfigured) => {
				tracing::warn!("Task request received but no agent backend is configured");
				(StatusCode::SERVICE_UNAVAILABLE, "Agent backend not configured")
			}
			ServerError::Task(e) => {
				tracing::error!(error = %e, "Upstream agent request failed");
				(StatusCode::BAD_GATEWAY, "Upstream agent unavailable")
			}
			ServerError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
		};

		(status, Json(ErrorResponse::new(message))).into_response()
	}
}
