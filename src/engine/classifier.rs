//! Maps a triggering event onto the release phase it implies

use tracing::debug;

use crate::domain::{EventKind, PrefixConfig, ReleaseEvent, Stream, Version};
use crate::engine::parser::{parse_branch, parse_tag};
use crate::error::DecisionError;

/// Release phase of a stream for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// New release branch with no tags: issue `rc1`
    InitialRc(Stream),
    /// Push while the stream is still in candidates
    NextRc(Stream),
    /// Push after GA: issue the next patch
    NextPatch(Stream),
    /// Manually pushed `x.y.0-rcN`
    ManualRc(Version),
    /// Manually pushed `x.y.0`
    ManualGa(Version),
    /// Manually pushed `x.y.z`, z > 0
    ManualPatch(Version),
    /// Manual dispatch against a branch; wraps the phase its state implies
    DispatchProbe(Box<Phase>),
    /// Nothing to do, with the reason
    Invalid {
        error: DecisionError,
        stream: Option<Stream>,
    },
}

impl Phase {
    /// Stream the phase applies to
    pub fn stream(&self) -> Option<Stream> {
        match self {
            Phase::InitialRc(s) | Phase::NextRc(s) | Phase::NextPatch(s) => Some(*s),
            Phase::ManualRc(v) | Phase::ManualGa(v) | Phase::ManualPatch(v) => Some(v.stream()),
            Phase::DispatchProbe(inner) => inner.stream(),
            Phase::Invalid { stream, .. } => *stream,
        }
    }

    /// The phase with any dispatch wrapper removed
    pub fn resolved(&self) -> &Phase {
        match self {
            Phase::DispatchProbe(inner) => inner.resolved(),
            other => other,
        }
    }

    fn invalid(error: DecisionError, stream: Option<Stream>) -> Self {
        Phase::Invalid { error, stream }
    }
}

/// Classify an event into a release phase.
///
/// Never fails: anything that cannot be released becomes [`Phase::Invalid`]
/// carrying the reason, so irrelevant branches and tags are skipped quietly.
pub fn classify(event: &ReleaseEvent, prefixes: &PrefixConfig) -> Phase {
    let phase = match event.kind {
        EventKind::BranchCreated => match parse_branch(&event.identifier, prefixes) {
            Ok(stream) if event.existing_tags.is_empty() => Phase::InitialRc(stream),
            Ok(stream) => Phase::invalid(
                DecisionError::phase_invalid(format!(
                    "branch '{}' was created but stream {} already has {} tag(s)",
                    event.identifier,
                    stream,
                    event.existing_tags.len()
                )),
                Some(stream),
            ),
            Err(e) => Phase::invalid(e, None),
        },
        EventKind::CommitPushed => match parse_branch(&event.identifier, prefixes) {
            Ok(stream) => classify_branch_state(event, stream),
            Err(e) => Phase::invalid(e, None),
        },
        EventKind::ManualDispatch => match parse_branch(&event.identifier, prefixes) {
            Ok(stream) => match classify_branch_state(event, stream) {
                invalid @ Phase::Invalid { .. } => invalid,
                phase => Phase::DispatchProbe(Box::new(phase)),
            },
            Err(e) => Phase::invalid(e, None),
        },
        EventKind::TagPushed => classify_tag(event, prefixes),
    };

    debug!(
        event = %event.kind,
        identifier = %event.identifier,
        ?phase,
        "classified event"
    );
    phase
}

fn classify_branch_state(event: &ReleaseEvent, stream: Stream) -> Phase {
    if let Some(commit) = event.commit.as_deref() {
        if let Some(existing) = event.existing_tags.tag_for_commit(commit) {
            return Phase::invalid(
                DecisionError::AlreadyTagged {
                    commit: commit.to_string(),
                    tag: existing.name.clone(),
                },
                Some(stream),
            );
        }
    }

    match event.existing_tags.latest() {
        None => Phase::InitialRc(stream),
        Some(latest) if latest.version.is_rc() => Phase::NextRc(stream),
        Some(_) => Phase::NextPatch(stream),
    }
}

fn classify_tag(event: &ReleaseEvent, prefixes: &PrefixConfig) -> Phase {
    let version = match parse_tag(&event.identifier, prefixes) {
        Ok(version) => version,
        Err(e) => return Phase::invalid(e, None),
    };
    let stream = version.stream();

    let known = event
        .release_branches
        .iter()
        .filter_map(|b| parse_branch(b, prefixes).ok())
        .any(|s| s == stream);
    if !known {
        return Phase::invalid(
            DecisionError::phase_invalid(format!(
                "tag '{}' has no release branch '{}'",
                event.identifier,
                stream.branch_name(prefixes)
            )),
            Some(stream),
        );
    }

    if version.is_rc() {
        Phase::ManualRc(version)
    } else if version.patch == 0 {
        Phase::ManualGa(version)
    } else {
        Phase::ManualPatch(version)
    }
}
