// SPDX-License-Identifier: MIT

//! Monitors: one configured directory and its scan pass

use crate::error::BuildError;
use crate::rule::{Rule, RuleError};
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::Duration;
use sweep_core::File;
use sweep_rulebook::MonitorDef;
use thiserror::Error;
use walkdir::WalkDir;

/// Errors that can occur while constructing a monitor.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("invalid root directory")]
    InvalidRoot,
    #[error("check interval cannot be zero")]
    ZeroInterval,
}

/// Errors that abort one scan pass.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
    #[error("rule [{rule}] failed on [{path}]: {source}")]
    Rule {
        rule: String,
        path: PathBuf,
        #[source]
        source: RuleError,
    },
}

/// A configured directory, its rules, and its scan policy.
pub struct Monitor {
    root: PathBuf,
    rules: Vec<Rule>,
    recursive: bool,
    interval: Duration,
}

impl Monitor {
    pub fn new(
        root: impl Into<PathBuf>,
        rules: Vec<Rule>,
        recursive: bool,
        interval: Duration,
    ) -> Result<Self, MonitorError> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(MonitorError::InvalidRoot);
        }
        if interval.is_zero() {
            return Err(MonitorError::ZeroInterval);
        }

        Ok(Monitor {
            root: expand_home(root),
            rules,
            recursive,
            interval,
        })
    }

    /// Build a monitor from its definition, parsing every rule.
    pub fn from_def(def: &MonitorDef) -> Result<Self, BuildError> {
        let rules = def
            .rules
            .iter()
            .map(Rule::from_def)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(
            &def.root_directory,
            rules,
            def.recursive,
            Duration::from_secs(def.check_interval_s),
        )?)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Perform one scan pass over the monitored directory.
    ///
    /// Every visited entry — files and directories both — becomes a
    /// [`File`] and has every rule applied in declared order. The walk
    /// is best-effort with respect to its own mutations: a rule that
    /// deletes or moves an entry can leave later rules or entries
    /// looking at stale paths, and the resulting error aborts the rest
    /// of this pass. The next scheduled pass starts fresh.
    pub fn check(&self) -> Result<(), CheckError> {
        tracing::info!(root = %self.root.display(), "checking monitor");

        if self.recursive {
            for entry in WalkDir::new(&self.root) {
                let entry = entry?;
                let meta = entry.metadata()?;
                self.apply(entry.path(), &meta)?;
            }
            return Ok(());
        }

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let meta = entry.metadata()?;
            self.apply(&entry.path(), &meta)?;
        }
        Ok(())
    }

    fn apply(&self, path: &Path, meta: &Metadata) -> Result<(), CheckError> {
        let file = File::from_path(path, meta);
        for rule in &self.rules {
            rule.apply(&file).map_err(|source| CheckError::Rule {
                rule: rule.name().to_string(),
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }
}

/// Expand a leading `~` to the user's home directory.
fn expand_home(path: PathBuf) -> PathBuf {
    let Some(raw) = path.to_str() else {
        return path;
    };
    if raw == "~" {
        return dirs::home_dir().unwrap_or(path);
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
