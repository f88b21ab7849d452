//! Argument checks run before any git call.
//!
//! Each check is a plain predicate returning a typed [`ValidationError`], so
//! callers can tell which constraint failed without parsing messages.

use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static COMMIT_HASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{40}$").expect("commit hash pattern"));

/// Where a directory sits relative to a base directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    Inside,
    Equal,
    Outside,
}

/// Component-wise containment: `/repo/pkg` is inside `/repo`, `/repository` is not.
pub fn containment(dir: &Path, base: &Path) -> Containment {
    if dir == base {
        Containment::Equal
    } else if dir.starts_with(base) {
        Containment::Inside
    } else {
        Containment::Outside
    }
}

pub fn check_not_empty(field: &'static str, path: &Path) -> Result<(), ValidationError> {
    if path.as_os_str().is_empty() {
        return Err(ValidationError::EmptyPath { field });
    }
    Ok(())
}

pub fn check_directory(field: &'static str, path: &Path) -> Result<(), ValidationError> {
    if !path.is_dir() {
        return Err(ValidationError::NotADirectory {
            field,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Accepts `None` or a full 40 character hex hash. Existence is not checked.
pub fn check_commit_ref(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !COMMIT_HASH.is_match(v) => Err(ValidationError::MalformedRef {
            field,
            value: v.to_string(),
        }),
        _ => Ok(()),
    }
}

/// `dir` must lie strictly inside `cwd`.
pub fn check_inside(dir: &Path, cwd: &Path) -> Result<(), ValidationError> {
    match containment(dir, cwd) {
        Containment::Inside => Ok(()),
        Containment::Equal => Err(ValidationError::EqualsWorkingDir {
            dir: dir.to_path_buf(),
        }),
        Containment::Outside => Err(ValidationError::OutsideWorkingDir {
            dir: dir.to_path_buf(),
            cwd: cwd.to_path_buf(),
        }),
    }
}
