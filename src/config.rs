use crate::error::{GitScopeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the current directory
pub const CONFIG_FILE: &str = "gitscope.toml";

/// Represents the complete configuration for git-scope.
///
/// Holds the defaults the CLI falls back to when a flag is not given.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Branch whose merged tags are listed
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Restrict commit walks to first-parent links into this branch
    #[serde(default)]
    pub first_parent_branch: Option<String>,

    #[serde(default)]
    pub tags: TagsConfig,
}

/// Returns the default branch name.
fn default_branch() -> String {
    "main".to_string()
}

/// Configuration for tag lookup.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct TagsConfig {
    /// Substrings every listed tag must contain
    #[serde(default)]
    pub filters: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            branch: default_branch(),
            first_parent_branch: None,
            tags: TagsConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitscope.toml` in current directory
/// 3. `.gitscope.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(PathBuf::from(path)),
        None => find_config_file(),
    };

    match path {
        Some(path) => read_config(&path),
        None => Ok(Config::default()),
    }
}

fn find_config_file() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join(format!(".{}", CONFIG_FILE));
    user.exists().then_some(user)
}

fn read_config(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path).map_err(|e| {
        GitScopeError::config(format!("cannot read {}: {}", path.display(), e))
    })?;

    toml::from_str(&config_str)
        .map_err(|e| GitScopeError::config(format!("cannot parse {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.branch, "main");
        assert_eq!(config.first_parent_branch, None);
        assert!(config.tags.filters.is_empty());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("first_parent_branch = \"release\"").unwrap();
        assert_eq!(config.branch, "main");
        assert_eq!(config.first_parent_branch.as_deref(), Some("release"));
        assert!(config.tags.filters.is_empty());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = load_config(Some("/definitely/not/here/gitscope.toml")).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
