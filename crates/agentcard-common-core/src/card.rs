// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Reading and writing agent card files.
//!
//! The file on disk is the only copy of the card. Nothing here caches: every
//! read goes to the filesystem so external edits show up on the next request.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::CardError;

/// Name of the card's `url` field.
pub const URL_FIELD: &str = "url";

/// Read and parse an agent card.
pub async fn read_card(path: &Path) -> Result<Value, CardError> {
	let contents = match tokio::fs::read_to_string(path).await {
		Ok(contents) => contents,
		Err(e) if e.kind() == ErrorKind::NotFound => {
			return Err(CardError::NotFound {
				path: path.to_path_buf(),
			});
		}
		Err(e) => {
			return Err(CardError::Io {
				path: path.to_path_buf(),
				source: e,
			});
		}
	};

	let card = serde_json::from_str(&contents).map_err(|e| CardError::Format {
		path: path.to_path_buf(),
		source: e,
	})?;

	debug!(path = %path.display(), "loaded agent card from disk");

	Ok(card)
}

/// Write an agent card as indented JSON.
///
/// The document goes to `agent.json.tmp` first and is renamed over the
/// target, so concurrent readers see either the old or the new card. A
/// symlinked `agent.json` is resolved first, so the link survives and its
/// target is replaced. The existing file's permissions carry over.
pub async fn write_card(path: &Path, card: &Value) -> Result<(), CardError> {
	let mut json = serde_json::to_string_pretty(card).map_err(|e| CardError::Format {
		path: path.to_path_buf(),
		source: e,
	})?;
	json.push('\n');

	let io_err = |source| CardError::Io {
		path: path.to_path_buf(),
		source,
	};

	let target = match tokio::fs::canonicalize(path).await {
		Ok(target) => target,
		Err(e) if e.kind() == ErrorKind::NotFound => path.to_path_buf(),
		Err(e) => return Err(io_err(e)),
	};
	let permissions = tokio::fs::metadata(&target)
		.await
		.ok()
		.map(|meta| meta.permissions());

	let tmp_path = tmp_path_for(&target);
	tokio::fs::write(&tmp_path, &json).await.map_err(io_err)?;

	let mut result = Ok(());
	if let Some(permissions) = permissions {
		result = tokio::fs::set_permissions(&tmp_path, permissions).await;
	}
	if result.is_ok() {
		result = tokio::fs::rename(&tmp_path, &target).await;
	}
	if let Err(e) = result {
		let _ = tokio::fs::remove_file(&tmp_path).await;
		return Err(io_err(e));
	}

	debug!(path = %path.display(), target = %target.display(), "saved agent card to disk");

	Ok(())
}

/// Replace the card's `url` field, keeping every other field and its position.
pub fn set_card_url(path: &Path, card: &mut Value, url: &str) -> Result<(), CardError> {
	let Some(object) = card.as_object_mut() else {
		return Err(CardError::NotAnObject {
			path: path.to_path_buf(),
		});
	};
	object.insert(URL_FIELD.to_string(), Value::String(url.to_string()));
	Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
	let mut name = path
		.file_name()
		.map(|n| n.to_os_string())
		.unwrap_or_default();
	name.push(".tmp");
	path.with_file_name(name)
}
