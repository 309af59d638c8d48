// SPDX-License-Identifier: MIT

//! Rulebook TOML parsing

use crate::monitor::MonitorDef;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during rulebook parsing.
#[derive(Debug, Error)]
pub enum RulebookError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A parsed rulebook.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rulebook {
    #[serde(default, rename = "monitor")]
    pub monitors: Vec<MonitorDef>,
}

/// Parse a rulebook from TOML content.
pub fn parse_rulebook(content: &str) -> Result<Rulebook, RulebookError> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
