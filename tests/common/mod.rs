// Shared helpers for tests that need a real repository on disk.
#![allow(dead_code)]

use git2::{Oid, Repository, RepositoryInitOptions, Signature, Time};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const BRANCH: &str = "main";

/// A throwaway repository whose commits get strictly increasing timestamps
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
    clock: i64,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");

        let mut opts = RepositoryInitOptions::new();
        opts.initial_head(BRANCH);
        let repo = Repository::init_opts(dir.path(), &opts).expect("Could not init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        TestRepo {
            dir,
            repo,
            clock: 1_700_000_000,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file and stage it
    pub fn stage(&self, rel: &str, content: &str) {
        let full = self.path().join(rel);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("Could not create parent dir");
        }
        fs::write(&full, content).expect("Could not write file");

        let mut index = self.repo.index().expect("Could not get index");
        index
            .add_path(Path::new(rel))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");
    }

    /// Drop a file from the index, leaving the working tree alone
    pub fn unstage(&self, rel: &str) {
        let mut index = self.repo.index().expect("Could not get index");
        index
            .remove_path(Path::new(rel))
            .expect("Could not remove file from index");
        index.write().expect("Could not write index");
    }

    /// Commit the index with explicit parents, optionally moving `update_ref`
    pub fn commit_with(&mut self, message: &str, update_ref: Option<&str>, parents: &[Oid]) -> Oid {
        self.clock += 60;
        let sig = Signature::new("Test User", "test@example.com", &Time::new(self.clock, 0))
            .expect("Could not build signature");

        let mut index = self.repo.index().expect("Could not get index");
        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");

        let parents: Vec<_> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).expect("Could not find parent"))
            .collect();
        let parent_refs: Vec<_> = parents.iter().collect();

        self.repo
            .commit(update_ref, &sig, &sig, message, &tree, &parent_refs)
            .expect("Could not create commit")
    }

    /// Commit the index on top of HEAD
    pub fn commit(&mut self, message: &str) -> Oid {
        let parents: Vec<Oid> = match self.repo.head() {
            Ok(head) => vec![head.target().expect("HEAD has no target")],
            Err(_) => Vec::new(),
        };
        self.commit_with(message, Some("HEAD"), &parents)
    }

    /// Stage one file and commit it on top of HEAD
    pub fn commit_file(&mut self, rel: &str, content: &str, message: &str) -> Oid {
        self.stage(rel, content);
        self.commit(message)
    }

    pub fn tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).expect("Could not find object");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    pub fn annotated_tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).expect("Could not find object");
        let sig = Signature::new("Test User", "test@example.com", &Time::new(self.clock, 0))
            .expect("Could not build signature");
        self.repo
            .tag(name, &object, &sig, "release", false)
            .expect("Could not create annotated tag");
    }
}
