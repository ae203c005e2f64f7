//! Movable alias tags (`vX`, `vX.Y`) that follow the newest release

use tracing::debug;

use crate::domain::{PrefixConfig, TagDecision, Version};

/// Aliases that must point at the decided tag, coarsest first.
///
/// GA and patch decisions move the major alias and, unless it would be
/// textually identical to `release_branch`, the minor alias. Candidates and
/// skips move nothing. The major alias comes first so a retry after a partial
/// failure always starts with it.
///
/// # Example
/// ```
/// # use semver_release::domain::{PrefixConfig, TagDecision, TagType, Version};
/// # use semver_release::engine::aliases::resolve_aliases;
/// let prefixes = PrefixConfig::new("v", "v");
/// let decision = TagDecision::release("v1.2.1", TagType::Patch, Version::new(1, 2, 1));
/// assert_eq!(resolve_aliases(&decision, &prefixes, "v1.2"), vec!["v1".to_string()]);
/// ```
pub fn resolve_aliases(
    decision: &TagDecision,
    prefixes: &PrefixConfig,
    release_branch: &str,
) -> Vec<String> {
    if !decision.tag_type.moves_aliases() {
        return Vec::new();
    }
    let Some(stream) = decision.stream else {
        return Vec::new();
    };

    let mut aliases = vec![stream.major_alias(prefixes)];

    let minor = stream.minor_alias(prefixes);
    if minor == release_branch {
        debug!(alias = %minor, "minor alias collides with release branch, omitting");
    } else {
        aliases.push(minor);
    }

    aliases
}

/// Drop the major alias when a newer minor line of the same major already released.
///
/// `major_peak` is the highest GA/patch version across the decided version's
/// major. Patching an older line must not pull the major alias back.
pub fn retain_current_major(
    aliases: Vec<String>,
    decision: &TagDecision,
    major_peak: Option<&Version>,
    prefixes: &PrefixConfig,
) -> Vec<String> {
    let (Some(version), Some(peak)) = (decision.version.as_ref(), major_peak) else {
        return aliases;
    };

    if peak.major != version.major || peak <= version {
        return aliases;
    }

    let major = version.stream().major_alias(prefixes);
    debug!(
        alias = %major,
        peak = %peak.render(prefixes),
        "newer release owns the major alias, leaving it in place"
    );
    aliases.into_iter().filter(|a| *a != major).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PreRelease, Stream, TagType};
    use crate::error::DecisionError;

    fn ga(major: u64, minor: u64, patch: u64, tag_type: TagType) -> TagDecision {
        let version = Version::new(major, minor, patch);
        TagDecision::release(format!("v{}", version), tag_type, version)
    }

    #[test]
    fn test_major_then_minor() {
        let aliases = resolve_aliases(&ga(1, 2, 0, TagType::Ga), &PrefixConfig::default(), "release/v1.2");
        assert_eq!(aliases, vec!["v1".to_string(), "v1.2".to_string()]);
    }

    #[test]
    fn test_rc_and_skip_move_nothing() {
        let prefixes = PrefixConfig::default();
        let rc = Version::rc(Stream::new(1, 2), PreRelease::rc(1).unwrap());
        let decision = TagDecision::release("v1.2.0-rc1", TagType::Rc, rc);
        assert!(resolve_aliases(&decision, &prefixes, "release/v1.2").is_empty());

        let skipped = TagDecision::skipped(DecisionError::phase_invalid("x"), Some(Stream::new(1, 2)));
        assert!(resolve_aliases(&skipped, &prefixes, "release/v1.2").is_empty());
    }

    #[test]
    fn test_collision_omits_minor() {
        let prefixes = PrefixConfig::new("v", "v");
        let aliases = resolve_aliases(&ga(1, 2, 3, TagType::Patch), &prefixes, "v1.2");
        assert_eq!(aliases, vec!["v1".to_string()]);
    }

    #[test]
    fn test_custom_tag_prefix() {
        let prefixes = PrefixConfig::new("release/", "pkg-v");
        let aliases = resolve_aliases(&ga(2, 0, 0, TagType::Ga), &prefixes, "release/2.0");
        assert_eq!(aliases, vec!["pkg-v2".to_string(), "pkg-v2.0".to_string()]);
    }

    #[test]
    fn test_retain_current_major_drops_stale_major() {
        let prefixes = PrefixConfig::default();
        let decision = ga(1, 2, 5, TagType::Patch);
        let aliases = vec!["v1".to_string(), "v1.2".to_string()];
        let peak = Version::new(1, 3, 0);

        let kept = retain_current_major(aliases, &decision, Some(&peak), &prefixes);
        assert_eq!(kept, vec!["v1.2".to_string()]);
    }

    #[test]
    fn test_retain_current_major_keeps_when_newest() {
        let prefixes = PrefixConfig::default();
        let decision = ga(1, 3, 1, TagType::Patch);
        let aliases = vec!["v1".to_string(), "v1.3".to_string()];

        let peak = Version::new(1, 3, 0);
        let kept = retain_current_major(aliases.clone(), &decision, Some(&peak), &prefixes);
        assert_eq!(kept, aliases);

        let kept = retain_current_major(aliases.clone(), &decision, None, &prefixes);
        assert_eq!(kept, aliases);
    }
}
