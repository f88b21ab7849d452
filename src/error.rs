use std::path::PathBuf;
use thiserror::Error;

/// Rejected input, raised before any git call is made.
///
/// Every variant names the argument that failed so callers can tell the
/// cases apart without matching on message text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: must not be empty")]
    EmptyPath { field: &'static str },

    #[error("{field}: must be an existing directory ({})", .path.display())]
    NotADirectory { field: &'static str, path: PathBuf },

    #[error("{field}: must be a 40 character hexadecimal commit hash, got '{value}'")]
    MalformedRef { field: &'static str, value: String },

    #[error("dir: must be inside cwd ({} is not inside {})", .dir.display(), .cwd.display())]
    OutsideWorkingDir { dir: PathBuf, cwd: PathBuf },

    #[error("dir: must not be equal to cwd ({})", .dir.display())]
    EqualsWorkingDir { dir: PathBuf },

    #[error("dir: must be inside the repository ({} is not inside {})", .dir.display(), .root.display())]
    OutsideRepository { dir: PathBuf, root: PathBuf },
}

/// Unified error type for git-scope operations
#[derive(Error, Debug)]
pub enum GitScopeError {
    #[error("Invalid argument: {0}")]
    Validation(#[from] ValidationError),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-scope
pub type Result<T> = std::result::Result<T, GitScopeError>;

impl GitScopeError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitScopeError::Config(msg.into())
    }

    /// Create a git error from a plain message, for collaborators that
    /// fail without an underlying libgit2 error.
    pub fn git(msg: impl AsRef<str>) -> Self {
        GitScopeError::Git(git2::Error::from_str(msg.as_ref()))
    }

    /// The validation failure behind this error, if any.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            GitScopeError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GitScopeError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GitScopeError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_validation_messages_name_the_field() {
        let err = ValidationError::MalformedRef {
            field: "last_release",
            value: "abc".to_string(),
        };
        assert!(err.to_string().starts_with("last_release:"));
        assert!(err.to_string().contains("'abc'"));

        let err = ValidationError::EmptyPath { field: "cwd" };
        assert_eq!(err.to_string(), "cwd: must not be empty");
    }

    #[test]
    fn test_outside_and_equal_are_distinct() {
        let outside = ValidationError::OutsideWorkingDir {
            dir: PathBuf::from("/other"),
            cwd: PathBuf::from("/repo"),
        };
        let equal = ValidationError::EqualsWorkingDir {
            dir: PathBuf::from("/repo"),
        };
        assert_ne!(outside, equal);
        assert!(outside.to_string().contains("must be inside cwd"));
        assert!(equal.to_string().contains("must not be equal to cwd"));
    }

    #[test]
    fn test_validation_converts_into_scope_error() {
        let err: GitScopeError = ValidationError::EmptyPath { field: "dir" }.into();
        assert!(err.to_string().starts_with("Invalid argument"));
        assert_eq!(
            err.as_validation(),
            Some(&ValidationError::EmptyPath { field: "dir" })
        );
    }

    #[test]
    fn test_git_error_from_message() {
        let err = GitScopeError::git("fatal: not a git repository");
        assert!(err.to_string().contains("not a git repository"));
        assert!(err.as_validation().is_none());
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (GitScopeError::config("x"), "Configuration error"),
            (GitScopeError::git("x"), "Git operation failed"),
            (
                GitScopeError::from(ValidationError::EmptyPath { field: "cwd" }),
                "Invalid argument",
            ),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
