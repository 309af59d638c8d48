// SPDX-License-Identifier: MIT

//! Filesystem-mutating actions

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use sweep_core::File;
use sweep_rulebook::{template, ActionDef};
use thiserror::Error;

const DELETE_ACTION: &str = "delete";
const RENAME_ACTION: &str = "move";

/// Errors that can occur while executing an action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("file [{0}] already exists")]
    DestinationExists(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A filesystem-mutating operation triggered by a satisfied rule.
#[derive(Debug, Clone)]
pub enum Action {
    /// Recursively remove the entry; a no-op if it is already gone.
    Delete,
    /// Move the entry, optionally renaming it from a template.
    Rename(RenameAction),
}

/// Parameters of the rename/move action.
///
/// Decoded from the free-form parameter table of a `move` action
/// descriptor; unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenameAction {
    /// New filename template; `{name}` and `{extension}` are substituted
    /// from the file's current values.
    pub name_template: Option<String>,
    /// Destination directory, created if missing. Defaults to the file's
    /// current parent.
    pub to_directory: Option<PathBuf>,
}

impl Action {
    /// Build a typed action from its rulebook descriptor.
    pub(crate) fn from_def(rule: &str, def: &ActionDef) -> Result<Self, crate::BuildError> {
        match def.kind.as_str() {
            DELETE_ACTION => Ok(Action::Delete),
            RENAME_ACTION => {
                let rename = toml::Value::Table(def.parameters.clone())
                    .try_into()
                    .map_err(|source| crate::BuildError::ActionParameters {
                        rule: rule.to_string(),
                        source,
                    })?;
                Ok(Action::Rename(rename))
            }
            other => Err(crate::BuildError::UnknownAction(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Delete => DELETE_ACTION,
            Action::Rename(_) => RENAME_ACTION,
        }
    }

    pub fn execute(&self, file: &File) -> Result<(), ActionError> {
        match self {
            Action::Delete => delete(file.path()),
            Action::Rename(rename) => rename.execute(file),
        }
    }
}

fn delete(path: &Path) -> Result<(), ActionError> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    let removed = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match removed {
        // Lost a race with another deletion; the outcome is the same.
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => Ok(other?),
    }
}

impl RenameAction {
    fn execute(&self, file: &File) -> Result<(), ActionError> {
        let parent = match &self.to_directory {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                dir.clone()
            }
            None => file
                .path()
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };

        let new_name = match &self.name_template {
            Some(tpl) => {
                let vars = HashMap::from([
                    ("name".to_string(), file.name().to_string()),
                    ("extension".to_string(), file.extension().to_string()),
                ]);
                template::interpolate(tpl, &vars)
            }
            None => file
                .path()
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };

        let destination = parent.join(new_name);
        if destination.exists() {
            return Err(ActionError::DestinationExists(destination));
        }
        fs::rename(file.path(), &destination)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
