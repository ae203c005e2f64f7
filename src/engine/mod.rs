//! Tag-decision engine
//!
//! A pure pipeline from a [`ReleaseEvent`] to a [`TagDecision`]:
//!
//! - [`parser`]: prefixed branch/tag names to versions
//! - [`classifier`]: event plus stream state to a [`Phase`](classifier::Phase)
//! - [`decision`]: phase plus existing tags to the next tag
//! - [`aliases`]: which movable aliases follow the new tag
//!
//! Nothing here performs I/O. Every input arrives in the event, so the same
//! event always yields the same decision.

pub mod aliases;
pub mod classifier;
pub mod decision;
pub mod parser;

pub use classifier::{classify, Phase};
pub use decision::decide;
pub use parser::parse;

use tracing::warn;

use crate::domain::{PrefixConfig, ReleaseEvent, TagDecision};
use crate::error::DecisionError;

/// Run the full pipeline for one event.
///
/// Dry runs compute the same tag and aliases but come back with `persist`
/// cleared.
///
/// # Returns
/// * `Ok(TagDecision)` - The decision, possibly skipped
/// * `Err(InvariantViolation)` - The event's tag snapshot is self-contradictory
pub fn evaluate(event: &ReleaseEvent, prefixes: &PrefixConfig) -> Result<TagDecision, DecisionError> {
    let phase = classify(event, prefixes);
    let mut decision = decide(&phase, &event.existing_tags, prefixes)?;

    decision.aliases = aliases::retain_current_major(
        std::mem::take(&mut decision.aliases),
        &decision,
        event.major_peak.as_ref(),
        prefixes,
    );

    if event.dry_run {
        decision.persist = false;
    }

    if let Some(error) = &decision.error {
        warn!(
            event = %event.kind,
            identifier = %event.identifier,
            kind = error.kind(),
            "skipping: {}",
            error
        );
    }

    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EventKind, ExistingTag, StreamTags, TagType, Version};

    #[test]
    fn test_evaluate_dry_run_keeps_decision() {
        let prefixes = PrefixConfig::default();
        let event = ReleaseEvent::new(EventKind::BranchCreated, "release/v1.2");

        let live = evaluate(&event, &prefixes).unwrap();
        let dry = evaluate(&event.clone().with_dry_run(true), &prefixes).unwrap();

        assert_eq!(live.tag, dry.tag);
        assert_eq!(live.tag_type, TagType::Rc);
        assert!(live.persist);
        assert!(!dry.persist);
    }

    #[test]
    fn test_evaluate_applies_major_peak() {
        let prefixes = PrefixConfig::default();
        let snapshot = StreamTags::new(vec![ExistingTag::new("v1.2.0", Version::new(1, 2, 0))]).unwrap();
        let event = ReleaseEvent::new(EventKind::CommitPushed, "release/v1.2")
            .with_existing_tags(snapshot)
            .with_major_peak(Some(Version::new(1, 3, 2)));

        let decision = evaluate(&event, &prefixes).unwrap();
        assert_eq!(decision.tag, "v1.2.1");
        assert_eq!(decision.aliases, vec!["v1.2".to_string()]);
    }

    #[test]
    fn test_evaluate_unknown_stream_tag_skips() {
        let prefixes = PrefixConfig::default();
        let event = ReleaseEvent::new(EventKind::TagPushed, "v9.9.0");
        let decision = evaluate(&event, &prefixes).unwrap();
        assert!(decision.is_skipped());
        assert!(!decision.persist);
    }
}
