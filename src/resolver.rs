//! Commits touching one package directory since its last release.

use crate::domain::{Commit, LogFields, RangeQuery};
use crate::error::{Result, ValidationError};
use crate::git::Repository;
use crate::paths::{clean_path, clean_path_from_cwd};
use crate::validate;
use std::path::{Path, PathBuf};

/// Lists the commits on the current branch that touched `target_dir`.
///
/// `target_dir` is resolved against `working_dir` and must sit strictly
/// inside it. With `last_release` (a full 40 character hash) the walk stops
/// before that commit; without it the whole history of `HEAD` is scanned.
/// `first_parent_branch` limits the walk to first-parent links, so commits
/// from side branches only show up through the merge that brought them in.
///
/// Commits come back newest first with message and tag decoration trimmed.
/// All arguments are checked before git is queried.
pub fn resolve_commits<R: Repository + ?Sized>(
    git: &R,
    working_dir: &Path,
    target_dir: &Path,
    last_release: Option<&str>,
    first_parent_branch: Option<&str>,
) -> Result<Vec<Commit>> {
    validate::check_not_empty("cwd", working_dir)?;
    let cwd = clean_path_from_cwd(working_dir)?;
    validate::check_directory("cwd", &cwd)?;

    validate::check_not_empty("dir", target_dir)?;
    let dir = clean_path(target_dir, &cwd);
    validate::check_directory("dir", &dir)?;

    validate::check_commit_ref("last_release", last_release)?;
    validate::check_inside(&dir, &cwd)?;

    // The repository root can sit above cwd
    let root = git.show_toplevel(&cwd)?;
    let relative_path = relative_to_root(&dir, &root)?;

    let query = RangeQuery::new(root, relative_path)
        .since(last_release)
        .first_parent(first_parent_branch);

    let raw = git.log(&cwd, &query, &LogFields::RELEASE)?;
    let commits: Vec<Commit> = raw.into_iter().map(Commit::from_raw).collect();

    tracing::debug!(query = ?query.to_args(), count = commits.len(), "git log filter query");
    for commit in &commits {
        tracing::trace!(hash = %commit.hash, tags = %commit.tags, "filtered commit");
    }

    Ok(commits)
}

/// `dir` relative to `root`, comparing canonical forms so a symlinked
/// checkout location still lines up with what git reports.
fn relative_to_root(dir: &Path, root: &Path) -> Result<PathBuf> {
    let canonical_dir = dir.canonicalize()?;
    let canonical_root = root.canonicalize()?;

    match canonical_dir.strip_prefix(&canonical_root) {
        Ok(relative) if !relative.as_os_str().is_empty() => Ok(relative.to_path_buf()),
        _ => Err(ValidationError::OutsideRepository {
            dir: dir.to_path_buf(),
            root: root.to_path_buf(),
        }
        .into()),
    }
}
