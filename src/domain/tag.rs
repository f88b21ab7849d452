/// Substrings a tag name must all contain.
///
/// Matching is plain, case-sensitive containment; the filters are not
/// anchored and their order does not matter. An empty filter matches every tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    pub substrings: Vec<String>,
}

impl TagFilter {
    pub fn new<I, S>(substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TagFilter {
            substrings: substrings.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.substrings.is_empty()
    }

    pub fn matches(&self, tag: &str) -> bool {
        self.substrings.iter().all(|s| tag.contains(s.as_str()))
    }
}

/// Splits newline-delimited tag output into trimmed, non-empty names.
pub fn split_tag_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
