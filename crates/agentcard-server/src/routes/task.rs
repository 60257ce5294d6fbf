// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Agent task endpoint.

use axum::{
	body::Bytes,
	extract::{OriginalUri, State},
	http::{header, HeaderMap},
	response::{IntoResponse, Response},
};

use crate::{api::AppState, error::ServerError, task::TaskRequest};

/// POST /a2a/{agent_name} - Hand a task request to the configured backend.
///
/// Also reached through `POST /` via the root rewrite middleware.
pub async fn post_task(
	State(state): State<AppState>,
	OriginalUri(original_uri): OriginalUri,
	headers: HeaderMap,
	body: Bytes,
) -> Result<Response, ServerError> {
	let content_type = headers
		.get(header::CONTENT_TYPE)
		.and_then(|v| v.to_str().ok())
		.map(str::to_string);

	tracing::debug!(
		agent = %state.agent_name,
		original_path = %original_uri.path(),
		bytes = body.len(),
		"post_task: received task request"
	);

	let response = state
		.task_handler
		.handle(&state.agent_name, TaskRequest { content_type, body })
		.await?;

	let mut out = (response.status, response.body).into_response();
	match response
		.content_type
		.and_then(|ct| header::HeaderValue::from_str(&ct).ok())
	{
		Some(content_type) => {
			out.headers_mut().insert(header::CONTENT_TYPE, content_type);
		}
		None => {
			out.headers_mut().remove(header::CONTENT_TYPE);
		}
	}
	Ok(out)
}
