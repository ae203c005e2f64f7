//! Release-candidate pre-release identifiers
//!
//! Only the `rc{n}` convention is recognised: `n` is a positive integer written
//! without leading zeros. See https://semver.org/#spec-item-9 for the general rule.

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

/// Release-candidate marker such as `rc3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreRelease {
    /// Candidate number, always >= 1
    pub number: u64,
}

impl PreRelease {
    /// Create a release candidate; `None` when `number` is zero
    pub fn rc(number: u64) -> Option<Self> {
        if number == 0 {
            None
        } else {
            Some(PreRelease { number })
        }
    }

    /// The next candidate in sequence; `None` once the number is exhausted
    pub fn next(&self) -> Option<Self> {
        self.number.checked_add(1).map(|number| PreRelease { number })
    }

    /// Parse an identifier of the form `rc{n}`
    ///
    /// # Returns
    /// * `Some(PreRelease)` - `s` is exactly `rc` followed by a positive integer
    /// * `None` - anything else (`rc0`, `rc01`, `beta.1`, ...)
    pub fn parse(s: &str) -> Option<Self> {
        let re = Regex::new(r"^rc([1-9][0-9]*)$").ok()?;
        let captures = re.captures(s)?;
        let number = captures.get(1)?.as_str().parse::<u64>().ok()?;
        PreRelease::rc(number)
    }
}

impl Ord for PreRelease {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number.cmp(&other.number)
    }
}

impl PartialOrd for PreRelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rc{}", self.number)
    }
}
