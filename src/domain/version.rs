use std::cmp::Ordering;
use std::fmt;

use crate::domain::{PreRelease, PrefixConfig, Stream};

/// Semantic version of a release tag
///
/// A release candidate always has patch `0`; the parser guarantees it and the
/// engine only ever builds candidates through [`Version::rc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<PreRelease>,
}

impl Version {
    /// Create a GA or patch version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: None,
        }
    }

    /// Create the release candidate `{major}.{minor}.0-rc{number}`
    pub fn rc(stream: Stream, number: PreRelease) -> Self {
        Version {
            major: stream.major,
            minor: stream.minor,
            patch: 0,
            prerelease: Some(number),
        }
    }

    /// No pre-release suffix: a GA (`x.y.0`) or patch (`x.y.z`, z > 0) release
    pub fn is_ga(&self) -> bool {
        self.prerelease.is_none()
    }

    pub fn is_rc(&self) -> bool {
        self.prerelease.is_some()
    }

    /// The major.minor line this version belongs to
    pub fn stream(&self) -> Stream {
        Stream::new(self.major, self.minor)
    }

    /// Render with the configured tag prefix (e.g. `v1.2.0-rc3`)
    pub fn render(&self, prefixes: &PrefixConfig) -> String {
        format!("{}{}", prefixes.tag_prefix, self)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}
