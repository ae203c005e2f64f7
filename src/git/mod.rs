//! Git operations abstraction layer
//!
//! The decision engine never touches a repository. This module supplies the
//! snapshots it consumes and applies the decisions it produces.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. Implementations:
//!
//! - [repository::Git2Repository]: a real repository opened with the `git2` crate
//! - [mock::MockRepository]: an in-memory repository for tests
//!
//! # Usage
//!
//! ```rust
//! # use semver_release::git::{MockRepository, Repository};
//! # use semver_release::domain::{PrefixConfig, Stream};
//! let mut repo = MockRepository::new();
//! repo.add_tag("v1.2.0-rc1", "c1");
//! repo.add_tag("v1.3.0", "c2");
//!
//! let tags = repo.list_tags_for_stream(Stream::new(1, 2), &PrefixConfig::default()).unwrap();
//! assert_eq!(tags.len(), 1);
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use tracing::debug;

use crate::domain::{ExistingTag, PrefixConfig, Stream, StreamTags, Version};
use crate::engine::parser::{parse_branch, parse_tag};
use crate::error::Result;

/// A tag and the commit it resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    /// Full hex id of the target commit
    pub target: String,
}

impl TagRef {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        TagRef {
            name: name.into(),
            target: target.into(),
        }
    }
}

/// Repository operations needed to evaluate and apply a release decision
///
/// ## Thread Safety
///
/// Implementors must be `Send + Sync`; runs against different streams may
/// share one repository handle. Writes to the same stream must be serialised
/// by the caller.
///
/// ## Error Handling
///
/// Methods return [crate::error::Result<T>]; implementations map backend
/// errors (like `git2::Error`) to [crate::error::ReleaseError] variants.
pub trait Repository: Send + Sync {
    /// All tags with the commit each points at
    fn list_tags(&self) -> Result<Vec<TagRef>>;

    /// Names of local and remote-tracking branches, without remote prefixes
    fn list_branches(&self) -> Result<Vec<String>>;

    /// Commit id at the tip of `branch`
    fn branch_head(&self, branch: &str) -> Result<String>;

    /// Whether `commit` is reachable from the tip of `branch`
    fn branch_contains(&self, branch: &str, commit: &str) -> Result<bool>;

    /// Create `name` at `commit`; fails if the tag exists
    fn create_tag(&self, name: &str, commit: &str) -> Result<()>;

    /// Create or force-move `name` to `commit`
    fn move_tag(&self, name: &str, commit: &str) -> Result<()>;

    /// Force-push tags to a remote, authenticating with `token` when given
    fn push_tags(&self, remote: &str, names: &[&str], token: Option<&str>) -> Result<()>;

    /// Tags of one stream, parsed under the configured tag prefix
    ///
    /// Tags that do not parse (aliases, foreign schemes) are ignored.
    fn list_tags_for_stream(&self, stream: Stream, prefixes: &PrefixConfig) -> Result<StreamTags> {
        let tags = parsed_tags(self.list_tags()?, prefixes)
            .filter(|t| t.version.stream() == stream)
            .collect();
        Ok(StreamTags::new(tags)?)
    }

    /// Branches that parse as release branches
    fn release_branches(&self, prefixes: &PrefixConfig) -> Result<Vec<String>> {
        Ok(self
            .list_branches()?
            .into_iter()
            .filter(|b| parse_branch(b, prefixes).is_ok())
            .collect())
    }

    /// Highest GA or patch release across every minor line of `major`
    fn major_peak(&self, major: u64, prefixes: &PrefixConfig) -> Result<Option<Version>> {
        Ok(parsed_tags(self.list_tags()?, prefixes)
            .map(|t| t.version)
            .filter(|v| v.major == major && v.is_ga())
            .max())
    }
}

fn parsed_tags(tags: Vec<TagRef>, prefixes: &PrefixConfig) -> impl Iterator<Item = ExistingTag> + '_ {
    tags.into_iter().filter_map(move |tag| match parse_tag(&tag.name, prefixes) {
        Ok(version) => Some(ExistingTag::new(tag.name, version).with_commit(tag.target)),
        Err(e) => {
            debug!(tag = %tag.name, "ignoring tag: {}", e);
            None
        }
    })
}
