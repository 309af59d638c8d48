// SPDX-License-Identifier: MIT

//! Error types for engine construction

use crate::monitor::MonitorError;
use thiserror::Error;

/// Errors that can occur while building the engine from a rulebook.
///
/// All of these are fatal before any monitor starts.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid condition for rule [{rule}]: {source}")]
    Condition {
        rule: String,
        #[source]
        source: sweep_core::ParseError,
    },
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("invalid action parameters for rule [{rule}]: {source}")]
    ActionParameters {
        rule: String,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    Monitor(#[from] MonitorError),
}
