//! Parsing of prefixed branch and tag names into versions
//!
//! Release branches look like `{release_prefix}{major}.{minor}` and tags like
//! `{tag_prefix}{major}.{minor}.{patch}[-rc{n}]`. Every numeric component is
//! `0` or `[1-9][0-9]*`, as required by https://semver.org/#spec-item-2.

use regex::Regex;

use crate::domain::{PreRelease, PrefixConfig, PrefixKind, Stream, Version};
use crate::error::DecisionError;

/// Parse a branch or tag name into a version.
///
/// Branch names yield `{major}.{minor}.0` with no pre-release.
///
/// # Arguments
/// * `identifier` - Raw branch or tag name (e.g. `release/v1.2`, `v1.2.0-rc3`)
/// * `prefixes` - Prefix scheme in use
/// * `kind` - Whether `identifier` is a branch or a tag
///
/// # Returns
/// * `Ok(Version)` - Parsed version
/// * `Err(PrefixMismatch)` - The expected prefix is absent
/// * `Err(InvalidVersionComponent)` - The remainder is not a valid version
///
/// # Example
/// ```
/// # use semver_release::domain::{PrefixConfig, PrefixKind, Version};
/// # use semver_release::engine::parser::parse;
/// let prefixes = PrefixConfig::default();
/// assert_eq!(parse("v1.2.3", &prefixes, PrefixKind::Tag).unwrap(), Version::new(1, 2, 3));
/// assert!(parse("v1.02.3", &prefixes, PrefixKind::Tag).is_err());
/// ```
pub fn parse(
    identifier: &str,
    prefixes: &PrefixConfig,
    kind: PrefixKind,
) -> Result<Version, DecisionError> {
    match kind {
        PrefixKind::Branch => {
            parse_branch(identifier, prefixes).map(|s| Version::new(s.major, s.minor, 0))
        }
        PrefixKind::Tag => parse_tag(identifier, prefixes),
    }
}

/// Parse a release branch name into its stream
pub fn parse_branch(identifier: &str, prefixes: &PrefixConfig) -> Result<Stream, DecisionError> {
    let rest = strip(identifier, prefixes, PrefixKind::Branch)?;

    let parts: Vec<&str> = rest.split('.').collect();
    if parts.len() != 2 {
        return Err(invalid(
            identifier,
            format!("expected <major>.<minor> after the prefix, found '{}'", rest),
        ));
    }

    let major = parse_component(identifier, "major", parts[0])?;
    let minor = parse_component(identifier, "minor", parts[1])?;

    Ok(Stream::new(major, minor))
}

/// Parse a version tag name
pub fn parse_tag(identifier: &str, prefixes: &PrefixConfig) -> Result<Version, DecisionError> {
    let rest = strip(identifier, prefixes, PrefixKind::Tag)?;

    let parsed = semver::Version::parse(rest).map_err(|e| invalid(identifier, e.to_string()))?;

    if !parsed.build.is_empty() {
        return Err(invalid(
            identifier,
            format!("build metadata '{}' is not allowed", parsed.build),
        ));
    }

    let prerelease = if parsed.pre.is_empty() {
        None
    } else {
        let pre = PreRelease::parse(parsed.pre.as_str()).ok_or_else(|| {
            invalid(
                identifier,
                format!("pre-release '{}' is not of the form rc<n>", parsed.pre),
            )
        })?;
        if parsed.patch != 0 {
            return Err(invalid(
                identifier,
                "release candidates must have patch version 0".to_string(),
            ));
        }
        Some(pre)
    };

    Ok(Version {
        major: parsed.major,
        minor: parsed.minor,
        patch: parsed.patch,
        prerelease,
    })
}

fn strip<'a>(
    identifier: &'a str,
    prefixes: &PrefixConfig,
    kind: PrefixKind,
) -> Result<&'a str, DecisionError> {
    let prefix = prefixes.prefix_for(kind);
    identifier
        .strip_prefix(prefix)
        .ok_or_else(|| DecisionError::PrefixMismatch {
            identifier: identifier.to_string(),
            prefix: prefix.to_string(),
        })
}

fn parse_component(identifier: &str, name: &str, value: &str) -> Result<u64, DecisionError> {
    let valid = Regex::new(r"^(0|[1-9][0-9]*)$")
        .map(|re| re.is_match(value))
        .unwrap_or(false);

    if !valid {
        let reason = if value.len() > 1 && value.starts_with('0') && value.bytes().all(|b| b.is_ascii_digit()) {
            format!("{} version '{}' has a leading zero", name, value)
        } else {
            format!("{} version '{}' is not a non-negative integer", name, value)
        };
        return Err(invalid(identifier, reason));
    }

    value
        .parse::<u64>()
        .map_err(|_| invalid(identifier, format!("{} version '{}' is too large", name, value)))
}

fn invalid(identifier: &str, reason: String) -> DecisionError {
    DecisionError::InvalidVersionComponent {
        identifier: identifier.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> PrefixConfig {
        PrefixConfig::default()
    }

    #[test]
    fn test_parse_branch() {
        assert_eq!(parse_branch("release/v1.2", &defaults()).unwrap(), Stream::new(1, 2));
        assert_eq!(parse_branch("release/v0.0", &defaults()).unwrap(), Stream::new(0, 0));
        assert_eq!(
            parse_branch("release/v10.20", &defaults()).unwrap(),
            Stream::new(10, 20)
        );
    }

    #[test]
    fn test_parse_branch_as_version() {
        let v = parse("release/v3.4", &defaults(), PrefixKind::Branch).unwrap();
        assert_eq!(v, Version::new(3, 4, 0));
    }

    #[test]
    fn test_parse_branch_prefix_mismatch() {
        for name in ["feature/v1.2", "main", "release/1.2", "", "Release/v1.2"] {
            let err = parse_branch(name, &defaults()).unwrap_err();
            assert_eq!(err.kind(), "prefix_mismatch", "{:?}", name);
        }
    }

    #[test]
    fn test_parse_branch_leading_zero() {
        let err = parse_branch("release/v01.2", &defaults()).unwrap_err();
        assert_eq!(err.kind(), "invalid_version_component");
        assert!(err.to_string().contains("leading zero"));

        assert!(parse_branch("release/v1.02", &defaults()).is_err());
    }

    #[test]
    fn test_parse_branch_wrong_shape() {
        for name in [
            "release/v1",
            "release/v1.2.3",
            "release/v1.",
            "release/v.2",
            "release/va.b",
            "release/v-1.2",
            "release/v1.2-rc1",
        ] {
            let err = parse_branch(name, &defaults()).unwrap_err();
            assert_eq!(err.kind(), "invalid_version_component", "{:?}", name);
        }
    }

    #[test]
    fn test_parse_branch_overflow() {
        let err = parse_branch("release/v99999999999999999999999.1", &defaults()).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_parse_tag_ga_and_patch() {
        assert_eq!(parse_tag("v1.2.0", &defaults()).unwrap(), Version::new(1, 2, 0));
        assert_eq!(parse_tag("v1.2.7", &defaults()).unwrap(), Version::new(1, 2, 7));
    }

    #[test]
    fn test_parse_tag_rc() {
        let v = parse_tag("v1.2.0-rc3", &defaults()).unwrap();
        assert_eq!(v.prerelease, PreRelease::rc(3));
        assert!(!v.is_ga());
    }

    #[test]
    fn test_parse_tag_rejects_non_rc_prerelease() {
        for name in ["v1.2.0-beta.1", "v1.2.0-rc0", "v1.2.0-rc01", "v1.2.0-rc.1"] {
            let err = parse_tag(name, &defaults()).unwrap_err();
            assert_eq!(err.kind(), "invalid_version_component", "{:?}", name);
        }
    }

    #[test]
    fn test_parse_tag_rejects_rc_on_patch() {
        let err = parse_tag("v1.2.3-rc1", &defaults()).unwrap_err();
        assert!(err.to_string().contains("patch version 0"));
    }

    #[test]
    fn test_parse_tag_rejects_leading_zeros_and_build() {
        assert!(parse_tag("v01.2.0", &defaults()).is_err());
        assert!(parse_tag("v1.2.00", &defaults()).is_err());
        assert!(parse_tag("v1.2.0+build5", &defaults()).is_err());
        assert!(parse_tag("v1.2", &defaults()).is_err());
    }

    #[test]
    fn test_parse_tag_prefix_mismatch() {
        let err = parse_tag("1.2.0", &defaults()).unwrap_err();
        assert_eq!(
            err,
            DecisionError::PrefixMismatch {
                identifier: "1.2.0".to_string(),
                prefix: "v".to_string(),
            }
        );
    }

    #[test]
    fn test_custom_prefixes() {
        let prefixes = PrefixConfig::new("rel-", "pkg-v");
        assert_eq!(parse_branch("rel-2.5", &prefixes).unwrap(), Stream::new(2, 5));
        assert_eq!(parse_tag("pkg-v2.5.1", &prefixes).unwrap(), Version::new(2, 5, 1));
        assert!(parse_tag("v2.5.1", &prefixes).is_err());
    }

    #[test]
    fn test_same_prefix_for_branch_and_tag() {
        let prefixes = PrefixConfig::new("v", "v");
        assert_eq!(parse_branch("v1.2", &prefixes).unwrap(), Stream::new(1, 2));
        assert!(parse_branch("v1.2.0", &prefixes).is_err());
        assert!(parse_tag("v1.2", &prefixes).is_err());
    }
}
