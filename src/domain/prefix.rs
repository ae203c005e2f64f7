use serde::{Deserialize, Serialize};

use crate::error::{ReleaseError, Result};

/// Default prefix of release branch names (`release/v1.2`)
pub const DEFAULT_RELEASE_PREFIX: &str = "release/v";

/// Default prefix of version tags and aliases (`v1.2.0`, `v1`)
pub const DEFAULT_TAG_PREFIX: &str = "v";

/// Sequences git refuses inside ref names
const INVALID_REF_SEQUENCES: &[&str] = &["..", "~", "^", ":", "\\", " ", "\t", "\n", "*", "?", "["];

/// Which prefix an identifier is expected to carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixKind {
    /// Release branch name, stripped with `release_prefix`
    Branch,
    /// Version tag name, stripped with `tag_prefix`
    Tag,
}

/// Prefix scheme shared by the parser and every renderer.
///
/// Stripping and applying prefixes goes through the same value so that a
/// rendered tag always parses back to the version it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixConfig {
    #[serde(default = "default_release_prefix")]
    pub release_prefix: String,

    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,
}

fn default_release_prefix() -> String {
    DEFAULT_RELEASE_PREFIX.to_string()
}

fn default_tag_prefix() -> String {
    DEFAULT_TAG_PREFIX.to_string()
}

impl Default for PrefixConfig {
    fn default() -> Self {
        PrefixConfig {
            release_prefix: default_release_prefix(),
            tag_prefix: default_tag_prefix(),
        }
    }
}

impl PrefixConfig {
    pub fn new(release_prefix: impl Into<String>, tag_prefix: impl Into<String>) -> Self {
        PrefixConfig {
            release_prefix: release_prefix.into(),
            tag_prefix: tag_prefix.into(),
        }
    }

    /// The prefix used for the given identifier kind
    pub fn prefix_for(&self, kind: PrefixKind) -> &str {
        match kind {
            PrefixKind::Branch => &self.release_prefix,
            PrefixKind::Tag => &self.tag_prefix,
        }
    }

    /// Check both prefixes are usable inside git ref names
    pub fn validate(&self) -> Result<()> {
        validate_prefix("release-prefix", &self.release_prefix)?;
        validate_prefix("tag-prefix", &self.tag_prefix)
    }
}

fn validate_prefix(name: &str, prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Err(ReleaseError::config(format!("{} must not be empty", name)));
    }

    if let Some(bad) = INVALID_REF_SEQUENCES.iter().find(|seq| prefix.contains(**seq)) {
        return Err(ReleaseError::config(format!(
            "Invalid {} '{}': contains {:?}, which is not allowed in git ref names",
            name, prefix, bad
        )));
    }

    Ok(())
}
