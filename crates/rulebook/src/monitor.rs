// SPDX-License-Identifier: MIT

//! Monitor definitions

use crate::rule::RuleDef;
use serde::Deserialize;

/// One monitored directory and its rules, as configured.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorDef {
    /// Directory to scan; `~` is expanded at engine construction.
    pub root_directory: String,
    /// Rules applied, in order, to every visited entry.
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleDef>,
    /// Whether to descend into subdirectories.
    #[serde(default)]
    pub recursive: bool,
    /// Seconds between scan passes; must be positive.
    pub check_interval_s: u64,
}
