use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;

static DECORATION_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[(,]\s*)tag: ([^,)]+)").expect("decoration tag pattern"));

/// A log record as handed back by the git backend, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommit {
    pub hash: String,
    pub message: String,
    /// Ref decoration in `git log --format=%d` form, e.g. ` (HEAD -> main, tag: v1.0.0)`
    pub tags: String,
    pub committer_date: DateTime<FixedOffset>,
}

/// A commit that touched the queried directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    pub message: String,
    pub tags: String,
    pub committer_date: DateTime<FixedOffset>,
}

impl Commit {
    /// Trims the message and the decoration. Nothing else is touched.
    pub fn from_raw(raw: RawCommit) -> Self {
        Commit {
            hash: raw.hash,
            message: raw.message.trim().to_string(),
            tags: raw.tags.trim().to_string(),
            committer_date: raw.committer_date,
        }
    }

    /// First seven characters of the hash
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(self.hash.as_str())
    }

    /// First line of the message
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    /// Tag names found in the decoration, in the order they appear.
    ///
    /// `(HEAD -> main, tag: v1.0.0, tag: pkg-a@1.0.0)` yields
    /// `["v1.0.0", "pkg-a@1.0.0"]`.
    pub fn tag_names(&self) -> Vec<&str> {
        DECORATION_TAG
            .captures_iter(&self.tags)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().trim())
            .collect()
    }
}

impl From<RawCommit> for Commit {
    fn from(raw: RawCommit) -> Self {
        Commit::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(message: &str, tags: &str) -> RawCommit {
        RawCommit {
            hash: "0123456789abcdef0123456789abcdef01234567".to_string(),
            message: message.to_string(),
            tags: tags.to_string(),
            committer_date: DateTime::parse_from_rfc3339("2024-01-02T03:04:05+02:00").unwrap(),
        }
    }

    #[test]
    fn test_from_raw_trims_message_and_tags() {
        let commit = Commit::from_raw(raw("\n  feat(a): add thing\n\nbody\n\n", " (tag: v1.0.0)\n"));
        assert_eq!(commit.message, "feat(a): add thing\n\nbody");
        assert_eq!(commit.tags, "(tag: v1.0.0)");
    }

    #[test]
    fn test_from_raw_keeps_other_fields() {
        let source = raw("fix: x", "");
        let commit = Commit::from(source.clone());
        assert_eq!(commit.hash, source.hash);
        assert_eq!(commit.committer_date, source.committer_date);
        assert_eq!(commit.tags, "");
    }

    #[test]
    fn test_inner_whitespace_is_kept() {
        let commit = Commit::from_raw(raw("  a   b\n\tc  ", ""));
        assert_eq!(commit.message, "a   b\n\tc");
    }

    #[test]
    fn test_short_hash_and_subject() {
        let commit = Commit::from_raw(raw("fix: x\n\ndetails", ""));
        assert_eq!(commit.short_hash(), "0123456");
        assert_eq!(commit.subject(), "fix: x");
    }

    #[test]
    fn test_short_hash_of_short_value() {
        let mut commit = Commit::from_raw(raw("x", ""));
        commit.hash = "abc".to_string();
        assert_eq!(commit.short_hash(), "abc");
    }

    #[test]
    fn test_tag_names_from_decoration() {
        let commit = Commit::from_raw(raw(
            "chore(release): publish",
            " (HEAD -> main, tag: v1.0.0, tag: pkg-a@1.0.0, origin/main)",
        ));
        assert_eq!(commit.tag_names(), vec!["v1.0.0", "pkg-a@1.0.0"]);
    }

    #[test]
    fn test_tag_names_ignores_branches() {
        let commit = Commit::from_raw(raw("x", "(HEAD -> main, feature/tagging)"));
        assert!(commit.tag_names().is_empty());

        let commit = Commit::from_raw(raw("x", ""));
        assert!(commit.tag_names().is_empty());
    }
}
