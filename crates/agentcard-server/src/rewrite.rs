// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Root-path rewrite middleware for root-based A2A discovery.
//!
//! A2A clients expect an agent's task endpoint at `/`, while the agent
//! framework mounts it at `/a2a/<agent_name>`. [`RootRewriteLayer`] rewrites
//! `POST /` to that path and leaves every other request alone.
//!
//! # Security Properties
//!
//! - Only the exact path `/` is rewritten (not `//`, `/foo`, `/.`)
//! - Only `POST` is rewritten; `GET /` (health checks, discovery) passes through
//! - Only HTTP requests reach this service; WebSocket handshakes are `GET` and
//!   never match
//! - The target path is fixed when the layer is built from a validated
//!   [`AgentName`]; no part of it comes from the request
//!
//! # Ordering
//!
//! This must be the outermost layer. It wraps the router as a service rather
//! than going through `Router::layer`, since router middleware runs after
//! routing has already picked a route for the original path.
//!
//! ```ignore
//! use axum::{extract::Request, ServiceExt};
//! use tower::Layer;
//!
//! let app = RootRewriteLayer::new("travel_agent")?.layer(router);
//! axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
//! ```

use std::{
	sync::Arc,
	task::{Context, Poll},
};

use agentcard_common_core::{AgentName, ConfigurationError};
use axum::{
	extract::OriginalUri,
	http::{Method, Request, Uri},
};
use tower::{Layer, Service};

/// Layer that rewrites `POST /` to the agent's internal task path.
#[derive(Debug, Clone)]
pub struct RootRewriteLayer {
	target_path: Arc<str>,
}

impl RootRewriteLayer {
	/// Validate `agent_name` and build the layer.
	///
	/// Fails with [`ConfigurationError`] for names that are empty or contain
	/// anything besides ASCII letters, digits and `_`.
	pub fn new(agent_name: &str) -> Result<Self, ConfigurationError> {
		let agent_name = AgentName::parse(agent_name)?;
		Ok(Self::for_agent(&agent_name))
	}

	pub fn for_agent(agent_name: &AgentName) -> Self {
		let target_path: Arc<str> = agent_name.task_path().into();
		tracing::info!(
			source_path = "/",
			target_path = %target_path,
			"RootRewriteLayer configured"
		);
		Self { target_path }
	}

	pub fn target_path(&self) -> &str {
		&self.target_path
	}
}

impl<S> Layer<S> for RootRewriteLayer {
	type Service = RootRewriteService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		RootRewriteService {
			inner,
			target_path: Arc::clone(&self.target_path),
		}
	}
}

/// Service wrapper for [`RootRewriteLayer`].
#[derive(Debug, Clone)]
pub struct RootRewriteService<S> {
	inner: S,
	target_path: Arc<str>,
}

impl<S, B> Service<Request<B>> for RootRewriteService<S>
where
	S: Service<Request<B>>,
{
	type Response = S::Response;
	type Error = S::Error;
	type Future = S::Future;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, req: Request<B>) -> Self::Future {
		let req = rewrite_root_post(req, &self.target_path);
		self.inner.call(req)
	}
}

fn should_rewrite<B>(req: &Request<B>) -> bool {
	req.method() == Method::POST && req.uri().path() == "/"
}

/// The request is owned here, so the rewritten URI is only ever seen by the
/// inner service.
fn rewrite_root_post<B>(req: Request<B>, target_path: &str) -> Request<B> {
	if !should_rewrite(&req) {
		return req;
	}

	let (mut parts, body) = req.into_parts();
	match rewritten_uri(&parts.uri, target_path) {
		Ok(uri) => {
			tracing::trace!(from = %parts.uri, to = %uri, "rewriting root POST");
			let original = std::mem::replace(&mut parts.uri, uri);
			parts.extensions.insert(OriginalUri(original));
		}
		Err(e) => {
			tracing::warn!(uri = %parts.uri, error = %e, "could not rewrite root POST, passing through");
		}
	}
	Request::from_parts(parts, body)
}

/// Swap the path, keeping scheme, authority and query string.
fn rewritten_uri(original: &Uri, target_path: &str) -> Result<Uri, axum::http::Error> {
	let path_and_query = match original.query() {
		Some(query) => format!("{target_path}?{query}"),
		None => target_path.to_string(),
	};

	let mut builder = Uri::builder();
	if let Some(scheme) = original.scheme() {
		builder = builder.scheme(scheme.clone());
	}
	if let Some(authority) = original.authority() {
		builder = builder.authority(authority.clone());
	}
	builder.path_and_query(path_and_query).build()
}
