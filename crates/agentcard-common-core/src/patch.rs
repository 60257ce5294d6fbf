// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Startup-time rewrite of the agent card's advertised URL.
//!
//! The card shipped with an agent carries whatever URL it was built with. At
//! startup the server points it at the externally reachable root instead
//! (not the framework's `/a2a/<name>` path; root discovery is handled by the
//! rewrite middleware and the well-known card route).
//!
//! Failures never block startup: [`patch_card_url`] logs them and still
//! returns the resolved URL.

use std::path::Path;

use tracing::{error, info, warn};

use crate::agent_name::AgentName;
use crate::card::{read_card, set_card_url, write_card};
use crate::error::CardError;

/// What [`try_patch_card_url`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
	/// The card was rewritten with this URL.
	Patched { url: String },
	/// No card file exists; nothing was written.
	Missing { url: String },
}

impl PatchOutcome {
	pub fn url(&self) -> &str {
		match self {
			PatchOutcome::Patched { url } | PatchOutcome::Missing { url } => url,
		}
	}
}

/// Pick the URL to advertise: the explicit one if given, else
/// `http://localhost:<port>`.
pub fn resolve_card_url(explicit: Option<&str>, port: u16) -> String {
	match explicit {
		Some(url) if !url.trim().is_empty() => url.to_string(),
		_ => format!("http://localhost:{port}"),
	}
}

/// Rewrite the card's `url` field and report what happened.
///
/// A missing card is not an error. I/O and parse failures are returned.
pub async fn try_patch_card_url(
	agents_dir: &Path,
	agent_name: &AgentName,
	explicit_url: Option<&str>,
	port: u16,
) -> Result<PatchOutcome, CardError> {
	let url = resolve_card_url(explicit_url, port);
	let path = agent_name.card_path(agents_dir);

	let mut card = match read_card(&path).await {
		Ok(card) => card,
		Err(CardError::NotFound { .. }) => return Ok(PatchOutcome::Missing { url }),
		Err(e) => return Err(e),
	};

	set_card_url(&path, &mut card, &url)?;
	write_card(&path, &card).await?;

	Ok(PatchOutcome::Patched { url })
}

/// Rewrite the card's `url` field, logging instead of failing.
///
/// Returns the resolved URL whether or not the card could be patched.
pub async fn patch_card_url(
	agents_dir: &Path,
	agent_name: &AgentName,
	explicit_url: Option<&str>,
	port: u16,
) -> String {
	match try_patch_card_url(agents_dir, agent_name, explicit_url, port).await {
		Ok(PatchOutcome::Patched { url }) => {
			info!(
				agent = %agent_name,
				path = %agent_name.card_path(agents_dir).display(),
				card_url = %url,
				"Updated agent card URL"
			);
			url
		}
		Ok(PatchOutcome::Missing { url }) => {
			warn!(
				agent = %agent_name,
				path = %agent_name.card_path(agents_dir).display(),
				"agent.json not found, card URL not patched"
			);
			url
		}
		Err(e) => {
			if e.is_format() {
				error!(path = %e.path().display(), error = %e, "Failed to parse agent.json");
			} else {
				error!(path = %e.path().display(), error = %e, "Failed to read/write agent.json");
			}
			resolve_card_url(explicit_url, port)
		}
	}
}
