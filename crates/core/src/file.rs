// SPDX-License-Identifier: MIT

//! The file model: semantic fields derived from a filesystem entry

use crate::condition::Field;
use std::cell::OnceCell;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors that can occur while looking up a file field.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("field [{0}] is not implemented")]
    Unimplemented(Field),
}

/// The value of one file field, borrowed from the file where possible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Size(f64),
    Age(Duration),
}

/// One filesystem entry at scan time.
///
/// All fields are sampled once at construction; the age does not tick
/// while the entry is held. The one exception is a directory's size,
/// which costs a full subtree scan and is therefore computed lazily on
/// first lookup and memoized.
#[derive(Debug)]
pub struct File {
    name: String,
    extension: String,
    path: PathBuf,
    is_dir: bool,
    age: Duration,
    len: u64,
    dir_size: OnceCell<u64>,
}

impl File {
    /// Build a `File` from a path and its metadata.
    pub fn from_path(path: impl Into<PathBuf>, meta: &Metadata) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let age = meta
            .modified()
            .ok()
            .and_then(|modified| SystemTime::now().duration_since(modified).ok())
            .unwrap_or_default();

        File {
            name,
            extension,
            is_dir: meta.is_dir(),
            age,
            len: meta.len(),
            path,
            dir_size: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn age(&self) -> Duration {
        self.age
    }

    /// Size in bytes: the reported length for a regular file, the sum of
    /// all contained regular-file sizes for a directory. The directory
    /// sum walks the whole subtree, skipping unreadable entries.
    pub fn size(&self) -> u64 {
        if !self.is_dir {
            return self.len;
        }
        *self.dir_size.get_or_init(|| subtree_size(&self.path))
    }

    /// Look up the value of a condition field.
    ///
    /// `created`, `modified`, and `type` are declared in the grammar but
    /// have no value source; looking them up is a recoverable error.
    pub fn field(&self, field: Field) -> Result<FieldValue<'_>, FieldError> {
        match field {
            Field::Name => Ok(FieldValue::Text(&self.name)),
            Field::Extension => Ok(FieldValue::Text(&self.extension)),
            Field::Path => Ok(FieldValue::Text(self.path.to_str().unwrap_or_default())),
            Field::Age => Ok(FieldValue::Age(self.age)),
            Field::Size => Ok(FieldValue::Size(self.size() as f64)),
            Field::Created | Field::Modified | Field::Type => {
                Err(FieldError::Unimplemented(field))
            }
        }
    }
}

fn subtree_size(root: &Path) -> u64 {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}

#[cfg(test)]
impl File {
    /// Hand-built entry for evaluation tests.
    pub(crate) fn fake(name: &str, extension: &str, age: Duration, len: u64) -> Self {
        File {
            name: name.to_string(),
            extension: extension.to_string(),
            path: PathBuf::from(format!("/fake/{name}.{extension}")),
            is_dir: false,
            age,
            len,
            dir_size: OnceCell::new(),
        }
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
