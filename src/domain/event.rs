//! Triggering events and the tag snapshot they are evaluated against

use std::fmt;

use crate::domain::{PreRelease, Stream, Version};
use crate::error::DecisionError;

/// What triggered the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    BranchCreated,
    CommitPushed,
    TagPushed,
    ManualDispatch,
}

impl EventKind {
    /// Map a GitHub Actions event name and ref type to an event kind
    ///
    /// # Examples
    /// ```
    /// # use semver_release::domain::EventKind;
    /// assert_eq!(EventKind::from_github("create", "branch").unwrap(), EventKind::BranchCreated);
    /// assert_eq!(EventKind::from_github("push", "tag").unwrap(), EventKind::TagPushed);
    /// assert!(EventKind::from_github("issues", "").is_err());
    /// ```
    pub fn from_github(event_name: &str, ref_type: &str) -> Result<Self, DecisionError> {
        match (event_name, ref_type) {
            ("create", "branch") => Ok(EventKind::BranchCreated),
            ("push", "branch") => Ok(EventKind::CommitPushed),
            ("push", "tag") => Ok(EventKind::TagPushed),
            ("workflow_dispatch", _) => Ok(EventKind::ManualDispatch),
            _ => Err(DecisionError::UnknownEventKind(if ref_type.is_empty() {
                event_name.to_string()
            } else {
                format!("{} ({})", event_name, ref_type)
            })),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::BranchCreated => "branch-created",
            EventKind::CommitPushed => "commit-pushed",
            EventKind::TagPushed => "tag-pushed",
            EventKind::ManualDispatch => "manual-dispatch",
        };
        f.write_str(name)
    }
}

/// A tag already present in the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingTag {
    /// Tag name as listed by the host
    pub name: String,
    pub version: Version,
    /// Commit the tag points at, when known
    pub commit: Option<String>,
}

impl ExistingTag {
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        ExistingTag {
            name: name.into(),
            version,
            commit: None,
        }
    }

    pub fn with_commit(mut self, commit: impl Into<String>) -> Self {
        self.commit = Some(commit.into());
        self
    }
}

/// Snapshot of existing tags, sorted oldest to newest by version precedence.
///
/// No two entries share a version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamTags {
    tags: Vec<ExistingTag>,
}

impl StreamTags {
    /// Build a snapshot, rejecting entries that collapse to the same version
    pub fn new(mut tags: Vec<ExistingTag>) -> Result<Self, DecisionError> {
        tags.sort_by(|a, b| a.version.cmp(&b.version));

        if let Some(pair) = tags.windows(2).find(|w| w[0].version == w[1].version) {
            return Err(DecisionError::invariant(format!(
                "tags '{}' and '{}' both name version {}",
                pair[0].name, pair[1].name, pair[0].version
            )));
        }

        Ok(StreamTags { tags })
    }

    pub fn empty() -> Self {
        StreamTags::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExistingTag> {
        self.tags.iter()
    }

    /// Highest version in the snapshot
    pub fn latest(&self) -> Option<&ExistingTag> {
        self.tags.last()
    }

    /// Highest release-candidate number
    pub fn max_rc(&self) -> Option<PreRelease> {
        self.tags.iter().filter_map(|t| t.version.prerelease).max()
    }

    /// Highest patch number among GA and patch tags
    pub fn max_release_patch(&self) -> Option<u64> {
        self.tags
            .iter()
            .filter(|t| t.version.is_ga())
            .map(|t| t.version.patch)
            .max()
    }

    pub fn has_ga(&self) -> bool {
        self.tags.iter().any(|t| t.version.is_ga())
    }

    /// Tag already pointing at `commit`, if any
    pub fn tag_for_commit(&self, commit: &str) -> Option<&ExistingTag> {
        self.tags
            .iter()
            .find(|t| t.commit.as_deref() == Some(commit))
    }

    /// The snapshot without `version`
    pub fn without(&self, version: &Version) -> StreamTags {
        StreamTags {
            tags: self
                .tags
                .iter()
                .filter(|t| t.version != *version)
                .cloned()
                .collect(),
        }
    }
}

/// One invocation's worth of input, built from external state and never mutated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseEvent {
    pub kind: EventKind,
    /// Raw branch or tag name from the trigger
    pub identifier: String,
    /// Commit the trigger points at
    pub commit: Option<String>,
    /// Tags already present in the identifier's stream
    pub existing_tags: StreamTags,
    /// Names of the release branches that currently exist
    pub release_branches: Vec<String>,
    /// Highest GA/patch release across every minor line of the identifier's major
    pub major_peak: Option<Version>,
    pub dry_run: bool,
}

impl ReleaseEvent {
    pub fn new(kind: EventKind, identifier: impl Into<String>) -> Self {
        ReleaseEvent {
            kind,
            identifier: identifier.into(),
            commit: None,
            existing_tags: StreamTags::empty(),
            release_branches: Vec::new(),
            major_peak: None,
            dry_run: false,
        }
    }

    pub fn with_commit(mut self, commit: impl Into<String>) -> Self {
        self.commit = Some(commit.into());
        self
    }

    pub fn with_existing_tags(mut self, tags: StreamTags) -> Self {
        self.existing_tags = tags;
        self
    }

    pub fn with_release_branches<I, S>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.release_branches = branches.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_major_peak(mut self, peak: Option<Version>) -> Self {
        self.major_peak = peak;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, version: Version) -> ExistingTag {
        ExistingTag::new(name, version)
    }

    fn rc(n: u64) -> Version {
        Version::rc(Stream::new(1, 2), PreRelease::rc(n).unwrap())
    }

    #[test]
    fn test_event_kind_from_github() {
        assert_eq!(
            EventKind::from_github("push", "branch").unwrap(),
            EventKind::CommitPushed
        );
        assert_eq!(
            EventKind::from_github("workflow_dispatch", "branch").unwrap(),
            EventKind::ManualDispatch
        );
        let err = EventKind::from_github("create", "tag").unwrap_err();
        assert_eq!(err, DecisionError::UnknownEventKind("create (tag)".to_string()));
    }

    #[test]
    fn test_stream_tags_sorted() {
        let tags = StreamTags::new(vec![
            tag("v1.2.1", Version::new(1, 2, 1)),
            tag("v1.2.0-rc10", rc(10)),
            tag("v1.2.0", Version::new(1, 2, 0)),
            tag("v1.2.0-rc9", rc(9)),
        ])
        .unwrap();

        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["v1.2.0-rc9", "v1.2.0-rc10", "v1.2.0", "v1.2.1"]);
        assert_eq!(tags.latest().unwrap().name, "v1.2.1");
        assert_eq!(tags.max_rc(), PreRelease::rc(10));
        assert_eq!(tags.max_release_patch(), Some(1));
        assert!(tags.has_ga());
    }

    #[test]
    fn test_stream_tags_rejects_duplicates() {
        let err = StreamTags::new(vec![
            tag("v1.2.0", Version::new(1, 2, 0)),
            tag("release-1.2.0", Version::new(1, 2, 0)),
        ])
        .unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("1.2.0"));
    }

    #[test]
    fn test_stream_tags_rc_only() {
        let tags = StreamTags::new(vec![tag("v1.2.0-rc1", rc(1))]).unwrap();
        assert!(!tags.has_ga());
        assert_eq!(tags.max_release_patch(), None);
    }

    #[test]
    fn test_tag_for_commit_and_without() {
        let tags = StreamTags::new(vec![
            tag("v1.2.0-rc1", rc(1)).with_commit("aaa"),
            tag("v1.2.0-rc2", rc(2)).with_commit("bbb"),
        ])
        .unwrap();

        assert_eq!(tags.tag_for_commit("bbb").unwrap().name, "v1.2.0-rc2");
        assert!(tags.tag_for_commit("ccc").is_none());

        let rest = tags.without(&rc(2));
        assert_eq!(rest.len(), 1);
        assert!(rest.iter().all(|t| t.version != rc(2)));
    }

    #[test]
    fn test_event_builder() {
        let event = ReleaseEvent::new(EventKind::CommitPushed, "release/v1.2")
            .with_commit("abc")
            .with_release_branches(["release/v1.2"])
            .with_dry_run(true);
        assert_eq!(event.commit.as_deref(), Some("abc"));
        assert_eq!(event.release_branches, vec!["release/v1.2".to_string()]);
        assert!(event.dry_run);
        assert!(event.existing_tags.is_empty());
    }
}
