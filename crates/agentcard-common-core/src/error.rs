// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for agent identity and agent card handling.

use std::path::PathBuf;

/// Startup-time configuration failure. Fatal: the server must not start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
	#[error("agent_name must not be empty")]
	EmptyAgentName,

	#[error("agent_name must be alphanumeric with underscores, got: {name:?}")]
	InvalidAgentName { name: String },
}

/// Failure while reading or writing an agent card file.
///
/// None of these are fatal. The root card route turns them into HTTP
/// responses, the patcher logs them and carries on.
#[derive(Debug, thiserror::Error)]
pub enum CardError {
	#[error("agent card not found at {path}")]
	NotFound { path: PathBuf },

	#[error("failed to access agent card at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse agent card at {path}: {source}")]
	Format {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("agent card at {path} is not a JSON object")]
	NotAnObject { path: PathBuf },
}

impl CardError {
	pub fn path(&self) -> &std::path::Path {
		match self {
			CardError::NotFound { path }
			| CardError::Io { path, .. }
			| CardError::Format { path, .. }
			| CardError::NotAnObject { path } => path,
		}
	}

	/// True for failures caused by the file's content rather than access to it.
	pub fn is_format(&self) -> bool {
		matches!(
			self,
			CardError::Format { .. } | CardError::NotAnObject { .. }
		)
	}
}
