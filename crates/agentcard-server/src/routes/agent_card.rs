// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Agent card discovery routes.
//!
//! Standard A2A clients look for the card at `/.well-known/agent-card.json`,
//! while the agent framework serves it below `/a2a/<agent_name>/`. Both paths
//! are served from the same `agent.json` on disk, re-read on every request.

use std::{
	path::{Path, PathBuf},
	sync::Arc,
};

use agentcard_common_core::{read_card, AgentName, WELL_KNOWN_CARD_PATH};
use axum::{extract::State, routing::get, Json, Router};
use serde_json::Value;

use crate::error::ServerError;

#[derive(Debug, Clone)]
pub struct AgentCardState {
	path: Arc<PathBuf>,
}

impl AgentCardState {
	pub fn new(agents_dir: &Path, agent_name: &AgentName) -> Self {
		Self {
			path: Arc::new(agent_name.card_path(agents_dir)),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

/// Card routes at the well-known root path and at the framework's own path.
pub fn agent_card_router(agents_dir: &Path, agent_name: &AgentName) -> Router {
	let state = AgentCardState::new(agents_dir, agent_name);

	tracing::info!(
		root_path = WELL_KNOWN_CARD_PATH,
		internal_path = %agent_name.card_route_path(),
		card_path = %state.path().display(),
		"Added agent card routes"
	);

	Router::new()
		.route(WELL_KNOWN_CARD_PATH, get(get_agent_card))
		.route(&agent_name.card_route_path(), get(get_agent_card))
		.with_state(state)
}

/// GET /.well-known/agent-card.json - Serve the agent card.
pub async fn get_agent_card(
	State(state): State<AgentCardState>,
) -> Result<Json<Value>, ServerError> {
	let card = read_card(state.path()).await?;
	Ok(Json(card))
}
