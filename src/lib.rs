pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod paths;
pub mod resolver;
pub mod tags;
pub mod ui;
pub mod validate;

pub use domain::{Commit, RangeQuery, TagFilter};
pub use error::{GitScopeError, Result, ValidationError};
pub use resolver::resolve_commits;
pub use tags::find_tags;
