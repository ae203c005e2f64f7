use std::fmt;

use crate::domain::{Stream, Version};
use crate::error::DecisionError;

/// Kind of tag a decision produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagType {
    Rc,
    Ga,
    Patch,
    Skipped,
}

impl TagType {
    /// Output value (`rc`, `ga`, `patch`, `skipped`)
    pub fn as_str(&self) -> &'static str {
        match self {
            TagType::Rc => "rc",
            TagType::Ga => "ga",
            TagType::Patch => "patch",
            TagType::Skipped => "skipped",
        }
    }

    /// GA and patch releases move aliases; candidates and skips never do
    pub fn moves_aliases(&self) -> bool {
        matches!(self, TagType::Ga | TagType::Patch)
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single output of the decision engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDecision {
    /// Rendered tag, empty when skipped
    pub tag: String,
    pub tag_type: TagType,
    pub version: Option<Version>,
    /// Stream the decision applies to, when the identifier parsed far enough
    pub stream: Option<Stream>,
    /// Alias tags to (re)point at `tag`, coarsest first
    pub aliases: Vec<String>,
    /// Whether the collaborator should write anything
    pub persist: bool,
    /// Why the decision was skipped
    pub error: Option<DecisionError>,
}

impl TagDecision {
    /// A decision that creates or validates `tag`
    pub fn release(tag: impl Into<String>, tag_type: TagType, version: Version) -> Self {
        TagDecision {
            tag: tag.into(),
            tag_type,
            version: Some(version),
            stream: Some(version.stream()),
            aliases: Vec::new(),
            persist: true,
            error: None,
        }
    }

    /// A decision that does nothing and reports why
    pub fn skipped(error: DecisionError, stream: Option<Stream>) -> Self {
        TagDecision {
            tag: String::new(),
            tag_type: TagType::Skipped,
            version: None,
            stream,
            aliases: Vec::new(),
            persist: false,
            error: Some(error),
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.tag_type == TagType::Skipped
    }

    /// Human-readable reason for a skip
    pub fn reason(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}
