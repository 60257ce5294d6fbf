// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Tracing subscriber setup.
//!
//! JSON lines inside containers (Cloud Run sets `K_SERVICE`; anything else
//! can set `CONTAINER_MODE`), human-readable output elsewhere. `RUST_LOG`
//! overrides the configured level.

use agentcard_server_config::{LogFormat, LoggingConfig};
use tracing_subscriber::{
	fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

pub fn is_running_in_container() -> bool {
	["K_SERVICE", "CONTAINER_MODE"]
		.iter()
		.any(|name| std::env::var(name).is_ok_and(|v| !v.is_empty()))
}

/// Whether `format` resolves to JSON output.
pub fn use_json(format: LogFormat, in_container: bool) -> bool {
	match format {
		LogFormat::Json => true,
		LogFormat::Pretty => false,
		LogFormat::Auto => in_container,
	}
}

pub fn init_tracing(config: &LoggingConfig) -> Result<(), TryInitError> {
	let json = use_json(config.format, is_running_in_container());

	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level)))
		.with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
		.with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
		.try_init()
}
