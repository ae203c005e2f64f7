use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use crate::error::{ReleaseError, Result};
use crate::git::{Repository, TagRef};

/// In-memory repository for tests.
///
/// Branches are modelled as the list of commits they contain, newest last.
/// Writes are recorded so tests can inspect them.
pub struct MockRepository {
    tags: Mutex<BTreeMap<String, String>>,
    branches: HashMap<String, Vec<String>>,
    pushed: Mutex<Vec<(String, String)>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            tags: Mutex::new(BTreeMap::new()),
            branches: HashMap::new(),
            pushed: Mutex::new(Vec::new()),
        }
    }

    /// Add a tag pointing to a commit
    pub fn add_tag(&mut self, name: impl Into<String>, commit: impl Into<String>) {
        self.tags
            .get_mut()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.into(), commit.into());
    }

    /// Append a commit to a branch, creating the branch if needed
    pub fn add_commit(&mut self, branch: impl Into<String>, commit: impl Into<String>) {
        self.branches
            .entry(branch.into())
            .or_default()
            .push(commit.into());
    }

    /// Current tags and their targets
    pub fn tags(&self) -> BTreeMap<String, String> {
        self.tags.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Commit a tag points at
    pub fn tag_target(&self, name: &str) -> Option<String> {
        self.tags().get(name).cloned()
    }

    /// (remote, tag) pairs pushed so far, in order
    pub fn pushed(&self) -> Vec<(String, String)> {
        self.pushed.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<TagRef>> {
        Ok(self
            .tags()
            .into_iter()
            .map(|(name, target)| TagRef::new(name, target))
            .collect())
    }

    fn list_branches(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.branches.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn branch_head(&self, branch: &str) -> Result<String> {
        self.branches
            .get(branch)
            .and_then(|commits| commits.last().cloned())
            .ok_or_else(|| ReleaseError::tag(format!("Branch not found: {}", branch)))
    }

    fn branch_contains(&self, branch: &str, commit: &str) -> Result<bool> {
        Ok(self
            .branches
            .get(branch)
            .map(|commits| commits.iter().any(|c| c == commit))
            .unwrap_or(false))
    }

    fn create_tag(&self, name: &str, commit: &str) -> Result<()> {
        let mut tags = self.tags.lock().unwrap_or_else(|e| e.into_inner());
        if tags.contains_key(name) {
            return Err(ReleaseError::tag(format!("Tag '{}' already exists", name)));
        }
        tags.insert(name.to_string(), commit.to_string());
        Ok(())
    }

    fn move_tag(&self, name: &str, commit: &str) -> Result<()> {
        self.tags
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.to_string(), commit.to_string());
        Ok(())
    }

    fn push_tags(&self, remote: &str, names: &[&str], _token: Option<&str>) -> Result<()> {
        let tags = self.tags();
        let mut pushed = self.pushed.lock().unwrap_or_else(|e| e.into_inner());
        for name in names {
            if !tags.contains_key(*name) {
                return Err(ReleaseError::remote(format!("Tag '{}' does not exist", name)));
            }
            pushed.push((remote.to_string(), name.to_string()));
        }
        Ok(())
    }
}
