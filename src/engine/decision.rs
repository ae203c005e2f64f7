//! Derives the next tag for a classified phase

use tracing::{debug, info};

use crate::domain::{PreRelease, PrefixConfig, Stream, StreamTags, TagDecision, TagType, Version};
use crate::engine::aliases::resolve_aliases;
use crate::engine::classifier::Phase;
use crate::error::DecisionError;

/// Decide which tag a phase produces against a snapshot of the stream's tags.
///
/// Validation failures come back as a skipped decision carrying the reason.
/// Only a snapshot that contradicts itself is an error.
///
/// # Arguments
/// * `phase` - Output of [`classify`](crate::engine::classifier::classify)
/// * `existing` - Tags already in the phase's stream
/// * `prefixes` - Prefix scheme used to render the tag and aliases
///
/// # Returns
/// * `Ok(TagDecision)` - Tag, type and alias plan (or a skip)
/// * `Err(InvariantViolation)` - `existing` holds tags from another stream
pub fn decide(
    phase: &Phase,
    existing: &StreamTags,
    prefixes: &PrefixConfig,
) -> Result<TagDecision, DecisionError> {
    let stream = phase.stream();
    if let Some(stream) = stream {
        check_snapshot(stream, existing)?;
    }

    let mut decision = decide_phase(phase, existing, prefixes);

    if let Some(stream) = decision.stream {
        decision.aliases = resolve_aliases(&decision, prefixes, &stream.branch_name(prefixes));
    }

    if decision.is_skipped() {
        debug!(reason = ?decision.reason(), "decision skipped");
    } else {
        info!(
            tag = %decision.tag,
            tag_type = %decision.tag_type,
            aliases = ?decision.aliases,
            "decided next tag"
        );
    }

    Ok(decision)
}

fn decide_phase(phase: &Phase, existing: &StreamTags, prefixes: &PrefixConfig) -> TagDecision {
    match phase {
        Phase::Invalid { error, stream } => TagDecision::skipped(error.clone(), *stream),
        Phase::InitialRc(stream) => initial_rc(*stream, existing, prefixes),
        Phase::NextRc(stream) => next_rc(*stream, existing, prefixes),
        Phase::NextPatch(stream) => next_patch(*stream, existing, prefixes),
        Phase::ManualRc(version) => manual_rc(version, existing, prefixes),
        Phase::ManualGa(version) => manual_ga(version, existing, prefixes),
        Phase::ManualPatch(version) => manual_patch(version, existing, prefixes),
        Phase::DispatchProbe(inner) => decide_phase(inner, existing, prefixes),
    }
}

fn check_snapshot(stream: Stream, existing: &StreamTags) -> Result<(), DecisionError> {
    match existing.iter().find(|t| t.version.stream() != stream) {
        Some(foreign) => Err(DecisionError::invariant(format!(
            "tag '{}' does not belong to stream {}",
            foreign.name, stream
        ))),
        None => Ok(()),
    }
}

fn release(version: Version, tag_type: TagType, prefixes: &PrefixConfig) -> TagDecision {
    TagDecision::release(version.render(prefixes), tag_type, version)
}

fn skip(stream: Stream, msg: String) -> TagDecision {
    TagDecision::skipped(DecisionError::phase_invalid(msg), Some(stream))
}

/// The latest tag has no successor within `u64`
fn exhausted(stream: Stream, latest: &Version, prefixes: &PrefixConfig) -> TagDecision {
    TagDecision::skipped(
        DecisionError::InvalidVersionComponent {
            identifier: latest.render(prefixes),
            reason: "too large to increment".to_string(),
        },
        Some(stream),
    )
}

fn not_newer(version: &Version, latest: &Version, prefixes: &PrefixConfig) -> String {
    format!(
        "tag '{}' is not newer than existing '{}'",
        version.render(prefixes),
        latest.render(prefixes)
    )
}

fn first_rc() -> PreRelease {
    PreRelease { number: 1 }
}

fn initial_rc(stream: Stream, existing: &StreamTags, prefixes: &PrefixConfig) -> TagDecision {
    if let Some(latest) = existing.latest() {
        return skip(
            stream,
            format!("stream {} already has tag '{}'", stream, latest.name),
        );
    }
    release(Version::rc(stream, first_rc()), TagType::Rc, prefixes)
}

fn next_rc(stream: Stream, existing: &StreamTags, prefixes: &PrefixConfig) -> TagDecision {
    if existing.has_ga() {
        return skip(
            stream,
            format!("stream {} is already GA; no further release candidates", stream),
        );
    }
    let number = match existing.max_rc() {
        Some(max) => match max.next() {
            Some(number) => number,
            None => return exhausted(stream, &Version::rc(stream, max), prefixes),
        },
        None => first_rc(),
    };
    release(Version::rc(stream, number), TagType::Rc, prefixes)
}

fn next_patch(stream: Stream, existing: &StreamTags, prefixes: &PrefixConfig) -> TagDecision {
    let Some(patch) = existing.max_release_patch() else {
        return skip(stream, format!("stream {} has no GA release to patch", stream));
    };
    match patch.checked_add(1) {
        Some(next) => release(
            Version::new(stream.major, stream.minor, next),
            TagType::Patch,
            prefixes,
        ),
        None => exhausted(stream, &Version::new(stream.major, stream.minor, patch), prefixes),
    }
}

fn manual_rc(version: &Version, existing: &StreamTags, prefixes: &PrefixConfig) -> TagDecision {
    let stream = version.stream();
    let others = existing.without(version);

    if others.has_ga() {
        return skip(
            stream,
            format!(
                "stream {} is already GA; candidate '{}' is out of order",
                stream,
                version.render(prefixes)
            ),
        );
    }

    if let (Some(latest), Some(max)) = (others.latest(), others.max_rc()) {
        if version.prerelease.map_or(true, |pre| pre <= max) {
            return skip(stream, not_newer(version, &latest.version, prefixes));
        }
    }

    release(*version, TagType::Rc, prefixes)
}

fn manual_ga(version: &Version, existing: &StreamTags, prefixes: &PrefixConfig) -> TagDecision {
    let others = existing.without(version);

    if let Some(latest) = others.latest() {
        if latest.version >= *version {
            return skip(version.stream(), not_newer(version, &latest.version, prefixes));
        }
    }

    release(*version, TagType::Ga, prefixes)
}

fn manual_patch(version: &Version, existing: &StreamTags, prefixes: &PrefixConfig) -> TagDecision {
    let stream = version.stream();
    let others = existing.without(version);

    let Some(max_patch) = others.max_release_patch() else {
        return skip(
            stream,
            format!(
                "patch tag '{}' pushed before stream {} reached GA",
                version.render(prefixes),
                stream
            ),
        );
    };

    if version.patch <= max_patch {
        let latest = Version::new(stream.major, stream.minor, max_patch);
        return skip(stream, not_newer(version, &latest, prefixes));
    }

    // version.patch > max_patch, so the successor fits
    let expected = max_patch + 1;
    if version.patch != expected {
        return TagDecision::skipped(
            DecisionError::NonContiguousPatch {
                tag: version.render(prefixes),
                expected,
                found: version.patch,
            },
            Some(stream),
        );
    }

    release(*version, TagType::Patch, prefixes)
}
