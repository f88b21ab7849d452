//! Git access layer
//!
//! The resolver and the tag matcher never talk to git directly; they go
//! through the [Repository] trait so they can be exercised against
//! [mock::MockRepository] as well as a real repository.
//!
//! - [repository::Git2Repository]: real implementation using the `git2` crate
//! - [mock::MockRepository]: in-memory implementation for tests
//!
//! ```rust,no_run
//! # use git_scope::git::{Git2Repository, Repository};
//! # use std::path::Path;
//! # fn example() -> git_scope::Result<()> {
//! let repo = Git2Repository::open(".")?;
//! let root = repo.show_toplevel(Path::new("."))?;
//! let tags = repo.merged_tags("main")?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{LogFields, RangeQuery, RawCommit};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Read-only git queries needed to scope history to a package
///
/// All implementors must be `Send + Sync`; callers may query several
/// packages of the same repository from different threads.
///
/// Failures are returned as [crate::error::GitScopeError::Git] and are never
/// turned into empty results.
pub trait Repository: Send + Sync {
    /// Absolute top-level directory of the repository enclosing `cwd`
    ///
    /// Equivalent of `git rev-parse --show-toplevel` run in `cwd`.
    fn show_toplevel(&self, cwd: &Path) -> Result<PathBuf>;

    /// Commits in `query`'s range that touch `query.relative_path`
    ///
    /// Records come back newest first, un-normalized, with the fields
    /// described by `fields`.
    fn log(&self, cwd: &Path, query: &RangeQuery, fields: &LogFields) -> Result<Vec<RawCommit>>;

    /// Tags reachable from `branch`, one per line
    ///
    /// Equivalent of `git tag --merged <branch>`.
    fn merged_tags(&self, branch: &str) -> Result<String>;
}
