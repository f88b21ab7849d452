//! Release tags reachable from a branch.

use crate::domain::{split_tag_list, TagFilter};
use crate::error::Result;
use crate::git::Repository;

/// Tags merged into `branch` whose names contain every string in `filters`.
///
/// An empty filter list returns every merged tag. The order of the
/// underlying listing is kept. A failing listing is an error, not an empty list.
pub fn find_tags<R, S>(git: &R, branch: &str, filters: &[S]) -> Result<Vec<String>>
where
    R: Repository + ?Sized,
    S: AsRef<str>,
{
    let filter = TagFilter::new(filters.iter().map(|f| f.as_ref()));
    find_tags_matching(git, branch, &filter)
}

/// Same as [find_tags] with a prepared [TagFilter].
pub fn find_tags_matching<R: Repository + ?Sized>(
    git: &R,
    branch: &str,
    filter: &TagFilter,
) -> Result<Vec<String>> {
    let tags = split_tag_list(&git.merged_tags(branch)?);

    if filter.is_empty() {
        return Ok(tags);
    }

    let matched: Vec<String> = tags.into_iter().filter(|tag| filter.matches(tag)).collect();
    tracing::debug!(branch, filters = ?filter.substrings, count = matched.len(), "filtered tags");

    Ok(matched)
}
