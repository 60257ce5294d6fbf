// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Validated agent identity.
//!
//! An [`AgentName`] is used to build both a filesystem path (the agent card
//! location) and an HTTP path (the internal task endpoint), so it is limited
//! to ASCII letters, digits and underscores. Validation happens once, when the
//! name is parsed; everything downstream takes the typed value.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigurationError;

/// Path prefix the agent framework mounts agents under.
pub const INTERNAL_PREFIX: &str = "a2a";

/// File name of the agent card inside an agent's directory.
pub const CARD_FILE_NAME: &str = "agent.json";

/// Well-known discovery path for agent cards.
pub const WELL_KNOWN_CARD_PATH: &str = "/.well-known/agent-card.json";

static AGENT_NAME_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AgentName(String);

impl AgentName {
	pub fn parse(name: &str) -> Result<Self, ConfigurationError> {
		if name.is_empty() {
			return Err(ConfigurationError::EmptyAgentName);
		}
		if !AGENT_NAME_REGEX.is_match(name) {
			return Err(ConfigurationError::InvalidAgentName {
				name: name.to_string(),
			});
		}
		Ok(Self(name.to_string()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// `<agents_dir>/<name>/agent.json`
	pub fn card_path(&self, agents_dir: &Path) -> PathBuf {
		agents_dir.join(&self.0).join(CARD_FILE_NAME)
	}

	/// Internal task endpoint, `/a2a/<name>`.
	///
	/// No trailing slash: the framework redirects `/a2a/<name>/` with a 307,
	/// which clients following a POST to `/` would not replay.
	pub fn task_path(&self) -> String {
		format!("/{INTERNAL_PREFIX}/{}", self.0)
	}

	/// Internal card path, `/a2a/<name>/.well-known/agent-card.json`.
	pub fn card_route_path(&self) -> String {
		format!("{}{WELL_KNOWN_CARD_PATH}", self.task_path())
	}
}

impl fmt::Display for AgentName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for AgentName {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl FromStr for AgentName {
	type Err = ConfigurationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl TryFrom<String> for AgentName {
	type Error = ConfigurationError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(&value)
	}
}

impl<'de> Deserialize<'de> for AgentName {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;
		Self::parse(&raw).map_err(serde::de::Error::custom)
	}
}
