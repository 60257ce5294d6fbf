// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Agent identity and agent card configuration section.

use std::path::PathBuf;

use agentcard_common_core::AgentName;
use serde::Deserialize;

use crate::error::ConfigError;

fn default_agents_dir() -> PathBuf {
	PathBuf::from("/app/agents")
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AgentConfigLayer {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub agents_dir: Option<PathBuf>,
	#[serde(default)]
	pub card_url: Option<String>,
	#[serde(default)]
	pub upstream_url: Option<String>,
}

impl AgentConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.name.is_some() {
			self.name = other.name;
		}
		if other.agents_dir.is_some() {
			self.agents_dir = other.agents_dir;
		}
		if other.card_url.is_some() {
			self.card_url = other.card_url;
		}
		if other.upstream_url.is_some() {
			self.upstream_url = other.upstream_url;
		}
	}

	/// Resolve the section. The agent name is required and is validated here,
	/// so a bad name stops the server before anything is bound.
	pub fn finalize(self) -> Result<AgentConfig, ConfigError> {
		let raw_name = self
			.name
			.ok_or_else(|| ConfigError::MissingValue("agent.name".to_string()))?;
		let name = AgentName::parse(&raw_name)?;

		Ok(AgentConfig {
			name,
			agents_dir: self.agents_dir.unwrap_or_else(default_agents_dir),
			card_url: self.card_url.filter(|s| !s.trim().is_empty()),
			upstream_url: self.upstream_url.filter(|s| !s.trim().is_empty()),
		})
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
	pub name: AgentName,
	pub agents_dir: PathBuf,
	/// Externally reachable root URL to advertise in the card.
	pub card_url: Option<String>,
	/// Agent runtime that task requests are forwarded to.
	pub upstream_url: Option<String>,
}

impl AgentConfig {
	pub fn card_path(&self) -> PathBuf {
		self.name.card_path(&self.agents_dir)
	}
}
