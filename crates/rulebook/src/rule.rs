// SPDX-License-Identifier: MIT

//! Rule and action definitions

use serde::Deserialize;

/// A named condition/action pair, as configured.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDef {
    pub name: String,
    /// Raw condition literal, e.g. `(extension = log and age > 30d)`.
    pub condition: String,
    pub action: ActionDef,
}

/// An action descriptor: a type tag plus free-form parameters.
///
/// The parameters table is decoded into the typed action at engine
/// construction, so unknown action types and malformed parameters fail
/// before any monitor starts.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionDef {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub parameters: toml::Table,
}
