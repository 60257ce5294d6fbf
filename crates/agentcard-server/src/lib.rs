// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Root-based A2A discovery server.
//!
//! Makes an agent mounted at `/a2a/<agent_name>` reachable the way standard
//! A2A clients expect: the card at `/.well-known/agent-card.json` and the
//! task endpoint at `POST /`.

pub mod api;
pub mod error;
pub mod logging;
pub mod rewrite;
pub mod routes;
pub mod task;

pub use api::{create_app, create_router, AppState};
pub use error::{ErrorResponse, ServerError};
pub use rewrite::{RootRewriteLayer, RootRewriteService};
pub use task::{
	TaskError, TaskHandler, TaskRequest, TaskResponse, UnconfiguredTaskHandler,
	UpstreamTaskHandler,
};
