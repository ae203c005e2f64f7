//! Domain logic - pure value types independent of git operations

pub mod branch;
pub mod event;
pub mod prefix;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use branch::Stream;
pub use event::{EventKind, ExistingTag, ReleaseEvent, StreamTags};
pub use prefix::{PrefixConfig, PrefixKind, DEFAULT_RELEASE_PREFIX, DEFAULT_TAG_PREFIX};
pub use prerelease::PreRelease;
pub use tag::{TagDecision, TagType};
pub use version::Version;
