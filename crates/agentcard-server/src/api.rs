// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Application state and router assembly.

use std::{path::PathBuf, sync::Arc};

use agentcard_common_core::AgentName;
use agentcard_server_config::AgentConfig;
use axum::{
	routing::{get, post},
	Router,
};
use tower::Layer;
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};

use crate::{
	error::ServerError,
	rewrite::{RootRewriteLayer, RootRewriteService},
	routes,
	task::{TaskError, TaskHandler, UnconfiguredTaskHandler, UpstreamTaskHandler},
};

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
	pub agent_name: AgentName,
	pub agents_dir: Arc<PathBuf>,
	pub task_handler: Arc<dyn TaskHandler>,
}

impl AppState {
	pub fn new(
		agent_name: AgentName,
		agents_dir: impl Into<PathBuf>,
		task_handler: Arc<dyn TaskHandler>,
	) -> Self {
		Self {
			agent_name,
			agents_dir: Arc::new(agents_dir.into()),
			task_handler,
		}
	}

	/// Build state from resolved config, forwarding tasks upstream if a
	/// runtime URL is configured.
	pub fn from_config(config: &AgentConfig) -> Result<Self, TaskError> {
		let task_handler: Arc<dyn TaskHandler> = match &config.upstream_url {
			Some(url) => {
				tracing::info!(upstream = %url, "Forwarding task requests to upstream agent runtime");
				Arc::new(UpstreamTaskHandler::new(url.clone())?)
			}
			None => {
				tracing::warn!("No upstream agent runtime configured, task requests will be refused");
				Arc::new(UnconfiguredTaskHandler)
			}
		};

		Ok(Self::new(
			config.name.clone(),
			config.agents_dir.clone(),
			task_handler,
		))
	}
}

/// Router with the framework-convention routes and the root card route.
pub fn create_router(state: AppState) -> Router {
	let card_routes = routes::agent_card::agent_card_router(&state.agents_dir, &state.agent_name);

	Router::new()
		.route("/health", get(routes::health::health_check))
		.route(&state.agent_name.task_path(), post(routes::task::post_task))
		.with_state(state)
		.merge(card_routes)
		.fallback(not_found)
}

/// The full application: root rewrite outermost, then CORS and tracing, then
/// the router.
pub fn create_app(state: AppState) -> RootRewriteService<Router> {
	let rewrite = RootRewriteLayer::for_agent(&state.agent_name);

	let router = create_router(state).layer(TraceLayer::new_for_http()).layer(
		CorsLayer::new()
			.allow_origin(Any)
			.allow_methods(Any)
			.allow_headers(Any),
	);

	rewrite.layer(router)
}

async fn not_found() -> ServerError {
	ServerError::NotFound
}
