use thiserror::Error;

/// Reasons a release decision could not produce a tag.
///
/// Everything except [`DecisionError::InvariantViolation`] is recovered into a
/// skipped decision; the values are comparable so two decisions computed from
/// the same inputs compare equal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecisionError {
    #[error("'{identifier}' does not start with prefix '{prefix}'")]
    PrefixMismatch { identifier: String, prefix: String },

    #[error("'{identifier}' has an invalid version component: {reason}")]
    InvalidVersionComponent { identifier: String, reason: String },

    #[error("Unknown event kind: {0}")]
    UnknownEventKind(String),

    #[error("Invalid release state: {0}")]
    PhaseInvalid(String),

    #[error("Tag '{tag}' is not contiguous: expected patch {expected}, found {found}")]
    NonContiguousPatch {
        tag: String,
        expected: u64,
        found: u64,
    },

    #[error("Commit {commit} is already tagged as '{tag}'")]
    AlreadyTagged { commit: String, tag: String },

    #[error("Existing tags are inconsistent: {0}")]
    InvariantViolation(String),
}

impl DecisionError {
    /// Stable snake_case name of the error kind, for logs and outputs
    pub fn kind(&self) -> &'static str {
        match self {
            DecisionError::PrefixMismatch { .. } => "prefix_mismatch",
            DecisionError::InvalidVersionComponent { .. } => "invalid_version_component",
            DecisionError::UnknownEventKind(_) => "unknown_event_kind",
            DecisionError::PhaseInvalid(_) => "phase_invalid",
            DecisionError::NonContiguousPatch { .. } => "non_contiguous_patch",
            DecisionError::AlreadyTagged { .. } => "already_tagged",
            DecisionError::InvariantViolation(_) => "invariant_violation",
        }
    }

    /// Whether this error must abort the run instead of becoming a skip
    pub fn is_fatal(&self) -> bool {
        matches!(self, DecisionError::InvariantViolation(_))
    }

    pub fn phase_invalid(msg: impl Into<String>) -> Self {
        DecisionError::PhaseInvalid(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        DecisionError::InvariantViolation(msg.into())
    }
}

/// Unified error type for semver-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Release decision failed: {0}")]
    Decision(#[from] DecisionError),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in semver-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ReleaseError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ReleaseError::Remote(msg.into())
    }
}
