use crate::paths::to_pathspec;
use std::path::PathBuf;

/// Upper bound of every commit query
pub const HEAD: &str = "HEAD";

/// Resolved parameters of a directory-scoped commit search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeQuery {
    /// Top-level directory of the repository
    pub repo_root: PathBuf,
    /// Target directory relative to `repo_root`; never empty
    pub relative_path: PathBuf,
    /// Exclusive lower bound; `None` walks the whole history
    pub since_ref: Option<String>,
    /// Inclusive upper bound
    pub until_ref: String,
    /// Follow only first parents, starting from this branch as well as `until_ref`
    pub first_parent: Option<String>,
}

impl RangeQuery {
    pub fn new(repo_root: PathBuf, relative_path: PathBuf) -> Self {
        RangeQuery {
            repo_root,
            relative_path,
            since_ref: None,
            until_ref: HEAD.to_string(),
            first_parent: None,
        }
    }

    pub fn since(mut self, since_ref: Option<impl Into<String>>) -> Self {
        self.since_ref = since_ref.map(Into::into);
        self
    }

    pub fn first_parent(mut self, branch: Option<impl Into<String>>) -> Self {
        self.first_parent = branch.map(Into::into);
        self
    }

    /// `since..HEAD`, or just `HEAD` when there is no lower bound
    pub fn revision_range(&self) -> String {
        match &self.since_ref {
            Some(since) => format!("{}..{}", since, self.until_ref),
            None => self.until_ref.clone(),
        }
    }

    pub fn pathspec(&self) -> String {
        to_pathspec(&self.relative_path)
    }

    /// Equivalent `git log` arguments
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(branch) = &self.first_parent {
            args.push("--first-parent".to_string());
            args.push(branch.clone());
        }
        args.push(self.revision_range());
        args.push("--".to_string());
        args.push(self.pathspec());
        args
    }
}

/// Where the commit message is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageField {
    /// Raw body, subject included (`%B`)
    Body,
    /// Subject line only (`%s`)
    Subject,
}

/// Whether ref names are rendered into the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationField {
    /// ` (HEAD -> main, tag: v1.0.0)` (`%d`)
    Short,
    None,
}

/// Which fields a log query fills in.
///
/// Passed explicitly to every log call; there is no shared field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogFields {
    pub message: MessageField,
    pub decoration: DecorationField,
}

impl LogFields {
    /// Fields needed to compute a package release: full body plus tag decoration.
    pub const RELEASE: LogFields = LogFields {
        message: MessageField::Body,
        decoration: DecorationField::Short,
    };
}

impl Default for LogFields {
    fn default() -> Self {
        LogFields::RELEASE
    }
}
