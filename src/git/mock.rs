use crate::domain::{LogFields, RangeQuery, RawCommit};
use crate::error::{GitScopeError, Result};
use crate::git::Repository;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

struct MockCommit {
    raw: RawCommit,
    paths: Vec<String>,
}

/// Mock repository for testing without actual git operations
///
/// History is linear: commits are added oldest first and returned newest
/// first. A commit is reported for a query when one of its paths sits under
/// the query's relative path, and the walk stops at `since_ref`.
pub struct MockRepository {
    toplevel: PathBuf,
    commits: Vec<MockCommit>,
    branch_tags: HashMap<String, String>,
    failure: Option<String>,
    calls: Mutex<Vec<String>>,
    queries: Mutex<Vec<RangeQuery>>,
}

impl MockRepository {
    /// Create a new empty mock repository rooted at `toplevel`
    pub fn new(toplevel: impl Into<PathBuf>) -> Self {
        MockRepository {
            toplevel: toplevel.into(),
            commits: Vec::new(),
            branch_tags: HashMap::new(),
            failure: None,
            calls: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Append a commit touching `paths` (repository-relative, `/`-separated)
    pub fn add_commit(&mut self, raw: RawCommit, paths: &[&str]) {
        self.commits.push(MockCommit {
            raw,
            paths: paths.iter().map(|p| p.to_string()).collect(),
        });
    }

    /// Set the raw `git tag --merged <branch>` output for `branch`
    pub fn set_merged_tags(&mut self, branch: impl Into<String>, output: impl Into<String>) {
        self.branch_tags.insert(branch.into(), output.into());
    }

    /// Make every query fail with `message`
    pub fn fail_with(&mut self, message: impl Into<String>) {
        self.failure = Some(message.into());
    }

    /// Names of the trait methods called so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Every query passed to [Repository::log]
    pub fn log_queries(&self) -> Vec<RangeQuery> {
        self.queries.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, call: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call.to_string());

        match &self.failure {
            Some(message) => Err(GitScopeError::git(message)),
            None => Ok(()),
        }
    }
}

fn under(path: &str, dir: &str) -> bool {
    path == dir || path.starts_with(&format!("{}/", dir))
}

impl Repository for MockRepository {
    fn show_toplevel(&self, _cwd: &Path) -> Result<PathBuf> {
        self.record("show_toplevel")?;
        Ok(self.toplevel.clone())
    }

    fn log(&self, _cwd: &Path, query: &RangeQuery, _fields: &LogFields) -> Result<Vec<RawCommit>> {
        self.record("log")?;
        self.queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(query.clone());

        if let Some(since) = &query.since_ref {
            if !self.commits.iter().any(|c| &c.raw.hash == since) {
                return Err(GitScopeError::git(format!("bad revision '{}'", since)));
            }
        }

        let pathspec = query.pathspec();
        let mut commits = Vec::new();

        for commit in self.commits.iter().rev() {
            if query.since_ref.as_deref() == Some(commit.raw.hash.as_str()) {
                break;
            }
            if commit.paths.iter().any(|p| under(p, &pathspec)) {
                commits.push(commit.raw.clone());
            }
        }

        Ok(commits)
    }

    fn merged_tags(&self, branch: &str) -> Result<String> {
        self.record("merged_tags")?;
        self.branch_tags.get(branch).cloned().ok_or_else(|| {
            GitScopeError::git(format!("malformed object name {}", branch))
        })
    }
}
