use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use git2::{BranchType, Oid, Repository as Git2Repo};
use tracing::debug;

use crate::error::{ReleaseError, Result};
use crate::git::TagRef;

/// Wrapper around git2::Repository with our trait interface
///
/// Remote-tracking branches of `remote` count as branches, so a fresh CI
/// checkout that only has `origin/release/v1.2` still sees the release line.
pub struct Git2Repository {
    repo: Mutex<Git2Repo>,
    remote: String,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P, remote: impl Into<String>) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Ok(Self::from_git2(repo, remote))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo, remote: impl Into<String>) -> Self {
        Git2Repository {
            repo: Mutex::new(repo),
            remote: remote.into(),
        }
    }

    fn repo(&self) -> MutexGuard<'_, Git2Repo> {
        self.repo.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn resolve_branch(&self, repo: &Git2Repo, branch: &str) -> Result<Oid> {
        let found = repo
            .find_branch(branch, BranchType::Local)
            .or_else(|_| repo.find_branch(&format!("{}/{}", self.remote, branch), BranchType::Remote))
            .map_err(|e| ReleaseError::tag(format!("Cannot find branch '{}': {}", branch, e)))?;

        found
            .get()
            .target()
            .ok_or_else(|| ReleaseError::tag(format!("Branch '{}' has no target", branch)))
    }

    fn tag_at(&self, name: &str, commit: &str, force: bool) -> Result<()> {
        let repo = self.repo();
        let oid = parse_oid(commit)?;
        let object = repo
            .find_object(oid, None)
            .map_err(|e| ReleaseError::tag(format!("Cannot find commit {}: {}", commit, e)))?;

        repo.tag_lightweight(name, &object, force)
            .map_err(|e| ReleaseError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }
}

fn parse_oid(commit: &str) -> Result<Oid> {
    Oid::from_str(commit).map_err(|e| ReleaseError::tag(format!("Invalid commit id '{}': {}", commit, e)))
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<TagRef>> {
        let repo = self.repo();
        let names = repo.tag_names(None)?;

        let mut tags = Vec::new();
        for name in names.iter().flatten() {
            let reference = repo.find_reference(&format!("refs/tags/{}", name))?;
            match reference.peel_to_commit() {
                Ok(commit) => tags.push(TagRef::new(name, commit.id().to_string())),
                Err(e) => debug!(tag = name, "tag does not point at a commit: {}", e),
            }
        }

        Ok(tags)
    }

    fn list_branches(&self) -> Result<Vec<String>> {
        let repo = self.repo();
        let remote_prefix = format!("{}/", self.remote);

        let mut names = BTreeSet::new();
        for entry in repo.branches(None)? {
            let (branch, kind) = entry?;
            let Some(name) = branch.name()? else {
                continue;
            };
            match kind {
                BranchType::Local => {
                    names.insert(name.to_string());
                }
                BranchType::Remote => {
                    if let Some(short) = name.strip_prefix(&remote_prefix) {
                        if short != "HEAD" {
                            names.insert(short.to_string());
                        }
                    }
                }
            }
        }

        Ok(names.into_iter().collect())
    }

    fn branch_head(&self, branch: &str) -> Result<String> {
        let repo = self.repo();
        Ok(self.resolve_branch(&repo, branch)?.to_string())
    }

    fn branch_contains(&self, branch: &str, commit: &str) -> Result<bool> {
        let repo = self.repo();
        let head = self.resolve_branch(&repo, branch)?;
        let target = parse_oid(commit)?;

        Ok(head == target || repo.graph_descendant_of(head, target)?)
    }

    fn create_tag(&self, name: &str, commit: &str) -> Result<()> {
        self.tag_at(name, commit, false)
    }

    fn move_tag(&self, name: &str, commit: &str) -> Result<()> {
        self.tag_at(name, commit, true)
    }

    fn push_tags(&self, remote: &str, names: &[&str], token: Option<&str>) -> Result<()> {
        let repo = self.repo();
        let mut remote = repo
            .find_remote(remote)
            .map_err(|e| ReleaseError::remote(format!("Cannot find remote: {}", e)))?;

        // Forced refspecs: aliases move on every GA/patch release
        let refspecs: Vec<String> = names
            .iter()
            .map(|tag| format!("+refs/tags/{}:refs/tags/{}", tag, tag))
            .collect();

        // Outlives `callbacks`, which borrows it
        let rejected = std::cell::RefCell::new(Vec::new());
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(move |_url, username_from_url, allowed_types| {
            if let Some(token) = token {
                if allowed_types.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
                    return git2::Cred::userpass_plaintext("x-access-token", token);
                }
            }
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                return git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"));
            }
            git2::Cred::default()
        });

        callbacks.push_update_reference(|refname, status| {
            if let Some(msg) = status {
                rejected.borrow_mut().push(format!("{}: {}", refname, msg));
            }
            Ok(())
        });

        let mut options = git2::PushOptions::new();
        options.remote_callbacks(callbacks);

        remote
            .push(&refspecs, Some(&mut options))
            .map_err(|e| ReleaseError::remote(format!("Push failed: {}", e)))?;
        drop(options);

        let rejected = rejected.into_inner();
        if !rejected.is_empty() {
            return Err(ReleaseError::remote(format!(
                "Remote rejected: {}",
                rejected.join(", ")
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;

    fn init_repo() -> (tempfile::TempDir, Git2Repository, String) {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        let oid = {
            let sig = git2::Signature::now("Test", "test@example.com").unwrap();
            let tree_id = repo.index().unwrap().write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
                .unwrap()
        };
        {
            let commit = repo.find_commit(oid).unwrap();
            repo.branch("release/v1.2", &commit, false).unwrap();
        }
        (dir, Git2Repository::from_git2(repo, "origin"), oid.to_string())
    }

    #[test]
    fn test_tags_round_trip() {
        let (_dir, repo, head) = init_repo();

        repo.create_tag("v1.2.0-rc1", &head).unwrap();
        assert!(repo.create_tag("v1.2.0-rc1", &head).is_err());
        repo.move_tag("v1", &head).unwrap();
        repo.move_tag("v1", &head).unwrap();

        let mut tags = repo.list_tags().unwrap();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            tags,
            vec![TagRef::new("v1", head.clone()), TagRef::new("v1.2.0-rc1", head.clone())]
        );
    }

    #[test]
    fn test_branches() {
        let (_dir, repo, head) = init_repo();

        let branches = repo.list_branches().unwrap();
        assert!(branches.contains(&"release/v1.2".to_string()));
        assert_eq!(repo.branch_head("release/v1.2").unwrap(), head);
        assert!(repo.branch_contains("release/v1.2", &head).unwrap());
        assert!(repo.branch_head("release/v9.9").is_err());
    }

    #[test]
    fn test_invalid_commit_id() {
        let (_dir, repo, _head) = init_repo();
        assert!(repo.create_tag("v1.2.0", "not-a-sha").is_err());
    }
}
