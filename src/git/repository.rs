use crate::domain::{DecorationField, LogFields, MessageField, RangeQuery, RawCommit};
use crate::error::{GitScopeError, Result};
use chrono::{DateTime, FixedOffset};
use git2::{Commit, DiffOptions, Oid, Repository as Git2Repo, Tree};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::path::{Path, PathBuf};

/// [super::Repository] backed by libgit2.
///
/// Only the repository location is kept; each query opens its own handle,
/// so the value is freely shareable between threads. Every query runs
/// against that repository, and a `cwd` outside its work tree is an error.
pub struct Git2Repository {
    git_dir: PathBuf,
}

impl Git2Repository {
    /// Discover the repository enclosing `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository {
            git_dir: repo.path().to_path_buf(),
        })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: &Git2Repo) -> Self {
        Git2Repository {
            git_dir: repo.path().to_path_buf(),
        }
    }

    fn repo(&self) -> Result<Git2Repo> {
        Ok(Git2Repo::open(&self.git_dir)?)
    }

    /// Open the repository and make sure `cwd` lies inside its work tree
    fn repo_for(&self, cwd: &Path) -> Result<(Git2Repo, PathBuf)> {
        let repo = self.repo()?;

        let workdir = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| GitScopeError::git("this operation must be run in a work tree"))?;

        let inside = match (cwd.canonicalize(), workdir.canonicalize()) {
            (Ok(cwd), Ok(root)) => cwd.starts_with(root),
            _ => false,
        };
        if !inside {
            return Err(GitScopeError::git(format!(
                "{} is not inside the work tree {}",
                cwd.display(),
                workdir.display()
            )));
        }

        Ok((repo, workdir))
    }
}

impl super::Repository for Git2Repository {
    fn show_toplevel(&self, cwd: &Path) -> Result<PathBuf> {
        let (_, workdir) = self.repo_for(cwd)?;
        Ok(workdir)
    }

    fn log(&self, cwd: &Path, query: &RangeQuery, fields: &LogFields) -> Result<Vec<RawCommit>> {
        let (repo, _) = self.repo_for(cwd)?;

        let mut starts = vec![repo.revparse_single(&query.until_ref)?.peel_to_commit()?.id()];
        if let Some(branch) = &query.first_parent {
            starts.push(repo.revparse_single(branch)?.peel_to_commit()?.id());
        }

        let hidden = match &query.since_ref {
            Some(since) => {
                let since_oid = repo.revparse_single(since)?.peel_to_commit()?.id();
                ancestors(&repo, since_oid)?
            }
            None => HashSet::new(),
        };

        let decorations = match fields.decoration {
            DecorationField::Short => collect_decorations(&repo)?,
            DecorationField::None => HashMap::new(),
        };

        let mut walk = PathWalk::new(&repo, query.pathspec(), query.first_parent.is_some(), hidden);
        for oid in starts {
            walk.push(oid)?;
        }

        let mut commits = Vec::new();

        while let Some(commit) = walk.next_touching()? {
            let message = match fields.message {
                MessageField::Body => commit.message().unwrap_or_default(),
                MessageField::Subject => commit.summary().unwrap_or_default(),
            }
            .to_string();

            commits.push(RawCommit {
                hash: commit.id().to_string(),
                message,
                tags: decorations.get(&commit.id()).cloned().unwrap_or_default(),
                committer_date: to_datetime(commit.committer().when())?,
            });
        }

        Ok(commits)
    }

    fn merged_tags(&self, branch: &str) -> Result<String> {
        let repo = self.repo()?;
        let tip = repo.revparse_single(branch)?.peel_to_commit()?.id();

        let mut merged = Vec::new();
        let tags = repo.tag_names(None)?;

        for tag_name in tags.iter().flatten() {
            let reference = repo.find_reference(&format!("refs/tags/{}", tag_name))?;

            // Tags on trees or blobs are never merged into a branch
            let target = match reference.peel_to_commit() {
                Ok(commit) => commit.id(),
                Err(_) => continue,
            };

            if target == tip || repo.graph_descendant_of(tip, target)? {
                merged.push(tag_name.to_string());
            }
        }

        merged.sort();
        Ok(merged.join("\n"))
    }
}

/// Every commit reachable from `oid`, itself included.
fn ancestors(repo: &Git2Repo, oid: Oid) -> Result<HashSet<Oid>> {
    let mut revwalk = repo.revwalk()?;
    revwalk.push(oid)?;

    let mut seen = HashSet::new();
    for oid in revwalk {
        seen.insert(oid?);
    }
    Ok(seen)
}

/// Newest-first history walk limited to one path, with git's default
/// simplification.
///
/// A commit whose tree under the path equals one of its parents' is dropped,
/// and only that parent is followed, so branches whose changes did not
/// survive a merge are never entered. A commit that differs from all of its
/// parents is reported and every parent is followed. Root commits are reported
/// when they have content under the path. In first-parent mode only the first
/// parent is compared and followed.
struct PathWalk<'r> {
    repo: &'r Git2Repo,
    pathspec: String,
    first_parent_only: bool,
    hidden: HashSet<Oid>,
    queued: HashSet<Oid>,
    // (committer time, insertion order) so equal times pop first-in first-out
    queue: BinaryHeap<(i64, Reverse<u64>, Oid)>,
    pushed: u64,
}

impl<'r> PathWalk<'r> {
    fn new(
        repo: &'r Git2Repo,
        pathspec: String,
        first_parent_only: bool,
        hidden: HashSet<Oid>,
    ) -> Self {
        PathWalk {
            repo,
            pathspec,
            first_parent_only,
            hidden,
            queued: HashSet::new(),
            queue: BinaryHeap::new(),
            pushed: 0,
        }
    }

    fn push(&mut self, oid: Oid) -> Result<()> {
        if self.hidden.contains(&oid) || !self.queued.insert(oid) {
            return Ok(());
        }

        let time = self.repo.find_commit(oid)?.committer().when().seconds();
        self.queue.push((time, Reverse(self.pushed), oid));
        self.pushed += 1;
        Ok(())
    }

    /// Pop commits until one changes the path, queueing the parents to follow
    fn next_touching(&mut self) -> Result<Option<Commit<'r>>> {
        while let Some((_, _, oid)) = self.queue.pop() {
            let commit = self.repo.find_commit(oid)?;
            let tree = commit.tree()?;

            let mut parents: Vec<Commit<'r>> = commit.parents().collect();
            if self.first_parent_only {
                parents.truncate(1);
            }

            if parents.is_empty() {
                if trees_differ(self.repo, None, &tree, &self.pathspec)? {
                    return Ok(Some(commit));
                }
                continue;
            }

            let mut same_as = None;
            for parent in &parents {
                let parent_tree = parent.tree()?;
                if !trees_differ(self.repo, Some(&parent_tree), &tree, &self.pathspec)? {
                    same_as = Some(parent.id());
                    break;
                }
            }

            match same_as {
                Some(parent) => self.push(parent)?,
                None => {
                    for parent in &parents {
                        self.push(parent.id())?;
                    }
                    return Ok(Some(commit));
                }
            }
        }

        Ok(None)
    }
}

fn trees_differ(
    repo: &Git2Repo,
    old: Option<&Tree<'_>>,
    new: &Tree<'_>,
    pathspec: &str,
) -> Result<bool> {
    let mut opts = DiffOptions::new();
    opts.pathspec(pathspec);

    let diff = repo.diff_tree_to_tree(old, Some(new), Some(&mut opts))?;
    Ok(diff.deltas().len() > 0)
}

/// Ref names per commit in `git log --format=%d` form:
/// ` (HEAD -> main, tag: v2, tag: v1, feature, origin/main)`.
///
/// HEAD comes first; the other refs follow in descending full refname order,
/// which is the order git prints them in.
fn collect_decorations(repo: &Git2Repo) -> Result<HashMap<Oid, String>> {
    let head = repo.head()?;
    let head_oid = head.peel_to_commit()?.id();
    let head_branch = if repo.head_detached()? {
        None
    } else {
        head.shorthand().map(str::to_string)
    };

    // (full refname, label)
    let mut refs: Vec<(Oid, String, String)> = Vec::new();

    for reference in repo.references()? {
        let reference = reference?;
        let (full, short) = match (reference.name(), reference.shorthand()) {
            (Some(full), Some(short)) => (full.to_string(), short.to_string()),
            _ => continue,
        };

        let label = if reference.is_tag() {
            format!("tag: {}", short)
        } else if reference.is_branch() {
            if head_branch.as_deref() == Some(short.as_str()) {
                continue;
            }
            short
        } else if reference.is_remote() {
            short
        } else {
            continue;
        };

        let oid = match reference.peel_to_commit() {
            Ok(commit) => commit.id(),
            Err(_) => continue,
        };

        refs.push((oid, full, label));
    }

    refs.sort_by(|a, b| b.1.cmp(&a.1));

    let mut labels: HashMap<Oid, Vec<String>> = HashMap::new();
    labels.entry(head_oid).or_default().push(match &head_branch {
        Some(branch) => format!("HEAD -> {}", branch),
        None => "HEAD".to_string(),
    });
    for (oid, _, label) in refs {
        labels.entry(oid).or_default().push(label);
    }

    Ok(labels
        .into_iter()
        .map(|(oid, entries)| (oid, format!(" ({})", entries.join(", "))))
        .collect())
}

fn to_datetime(time: git2::Time) -> Result<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)
        .ok_or_else(|| GitScopeError::git(format!("invalid timezone offset {}", time.offset_minutes())))?;

    let utc = DateTime::from_timestamp(time.seconds(), 0)
        .ok_or_else(|| GitScopeError::git(format!("invalid commit timestamp {}", time.seconds())))?;

    Ok(utc.with_timezone(&offset))
}
