// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for the agentcard server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file,
//!   environment, command line)
//! - Type-safe configuration with validation of the agent name
//! - Consistent environment variable naming (`AGENTCARD_*`)
//!
//! # Usage
//!
//! ```ignore
//! use agentcard_server_config::{load_config, ServerConfigLayer};
//!
//! let config = load_config(None, ServerConfigLayer::default())?;
//! println!("Serving {} on {}", config.agent.name, config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{
	ConfigSource, DefaultsSource, EnvSource, OverrideSource, Precedence, TomlSource,
};

use std::path::Path;

use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub agent: AgentConfig,
	pub logging: LoggingConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. `overrides` (command-line flags)
/// 2. Environment variables (`AGENTCARD_*`)
/// 3. Config file (`config_path`, or `/etc/agentcard/server.toml`)
/// 4. Built-in defaults
pub fn load_config(
	config_path: Option<&Path>,
	overrides: ServerConfigLayer,
) -> Result<ServerConfig, ConfigError> {
	let toml = match config_path {
		Some(path) => TomlSource::new(path),
		None => TomlSource::system(),
	};

	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(toml),
		Box::new(EnvSource::system()),
		Box::new(OverrideSource::new(overrides)),
	])
}

/// Merge the given sources in precedence order and resolve the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let agent = layer.agent.unwrap_or_default().finalize()?;
	let logging = layer.logging.unwrap_or_default().finalize();

	info!(
		host = %http.host,
		port = http.port,
		agent = %agent.name,
		agents_dir = %agent.agents_dir.display(),
		card_url_configured = agent.card_url.is_some(),
		upstream_configured = agent.upstream_url.is_some(),
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		agent,
		logging,
	})
}
