use std::fmt;

use crate::domain::PrefixConfig;

/// A release line: every tag sharing one major.minor pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stream {
    pub major: u64,
    pub minor: u64,
}

impl Stream {
    pub fn new(major: u64, minor: u64) -> Self {
        Stream { major, minor }
    }

    /// Release branch for this stream (e.g. `release/v1.2`)
    pub fn branch_name(&self, prefixes: &PrefixConfig) -> String {
        format!("{}{}", prefixes.release_prefix, self)
    }

    /// Movable alias for the whole major line (e.g. `v1`)
    pub fn major_alias(&self, prefixes: &PrefixConfig) -> String {
        format!("{}{}", prefixes.tag_prefix, self.major)
    }

    /// Movable alias for this stream (e.g. `v1.2`)
    pub fn minor_alias(&self, prefixes: &PrefixConfig) -> String {
        format!("{}{}", prefixes.tag_prefix, self)
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
