// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! agentcard server binary.

use std::path::PathBuf;

use agentcard_common_core::patch_card_url;
use agentcard_server::{create_app, logging, AppState};
use agentcard_server_config::{
	load_config, AgentConfigLayer, HttpConfigLayer, LoggingConfigLayer, ServerConfigLayer,
};
use anyhow::Context;
use axum::{extract::Request, ServiceExt};
use clap::{Parser, Subcommand};

/// agentcard server - root-based A2A discovery for a single agent.
#[derive(Parser, Debug)]
#[command(
	name = "agentcard-server",
	about = "Serve an A2A agent at the root path",
	version
)]
struct Args {
	#[command(subcommand)]
	command: Option<Command>,

	/// Config file (default: /etc/agentcard/server.toml)
	#[arg(long)]
	config: Option<PathBuf>,

	/// Host to bind the server
	#[arg(long)]
	host: Option<String>,

	/// Port to bind the server
	#[arg(long)]
	port: Option<u16>,

	/// External URL for agent card discovery
	#[arg(long)]
	card_url: Option<String>,

	/// Directory containing <agent_name>/agent.json
	#[arg(long)]
	agents_dir: Option<PathBuf>,

	/// Agent name (letters, digits and underscores)
	#[arg(long)]
	agent_name: Option<String>,

	/// Agent runtime URL that task requests are forwarded to
	#[arg(long)]
	upstream_url: Option<String>,

	/// Log filter, e.g. "info" or "debug,tower_http=trace"
	#[arg(long)]
	log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version information
	Version,
}

impl Args {
	fn overrides(&self) -> ServerConfigLayer {
		ServerConfigLayer {
			http: Some(HttpConfigLayer {
				host: self.host.clone(),
				port: self.port,
			}),
			agent: Some(AgentConfigLayer {
				name: self.agent_name.clone(),
				agents_dir: self.agents_dir.clone(),
				card_url: self.card_url.clone(),
				upstream_url: self.upstream_url.clone(),
			}),
			logging: Some(LoggingConfigLayer {
				level: self.log_level.clone(),
				format: None,
			}),
		}
	}
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("agentcard-server version: {}", env!("CARGO_PKG_VERSION"));
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = load_config(args.config.as_deref(), args.overrides())
		.context("failed to load configuration")?;

	logging::init_tracing(&config.logging).context("failed to initialise logging")?;

	let card_url = patch_card_url(
		&config.agent.agents_dir,
		&config.agent.name,
		config.agent.card_url.as_deref(),
		config.http.port,
	)
	.await;

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		agent = %config.agent.name,
		card_url = %card_url,
		log_level = %config.logging.level,
		"starting agentcard-server"
	);

	let state = AppState::from_config(&config.agent).context("failed to build task handler")?;
	let app = create_app(state);

	let addr = config.socket_addr();
	let listener = tokio::net::TcpListener::bind(&addr)
		.await
		.with_context(|| format!("failed to bind {addr}"))?;
	tracing::info!("listening on {}", addr);

	axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
		.with_graceful_shutdown(shutdown_signal())
		.await
		.context("server error")?;

	tracing::info!("Server shutdown complete");
	Ok(())
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %e, "failed to listen for shutdown signal");
		std::future::pending::<()>().await;
	}
	tracing::info!("Received shutdown signal");
}
