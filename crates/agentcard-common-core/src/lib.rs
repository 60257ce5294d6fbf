// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared agent card types for agentcard.
//!
//! This crate provides:
//! - [`AgentName`], the validated agent identity and the paths derived from it
//! - Agent card file reading and atomic writing
//! - The startup-time card URL patcher

pub mod agent_name;
pub mod card;
pub mod error;
pub mod patch;

pub use agent_name::{
	AgentName, CARD_FILE_NAME, INTERNAL_PREFIX, WELL_KNOWN_CARD_PATH,
};
pub use card::{read_card, set_card_url, write_card, URL_FIELD};
pub use error::{CardError, ConfigurationError};
pub use patch::{patch_card_url, resolve_card_url, try_patch_card_url, PatchOutcome};
