//! Domain logic - pure release rules independent of git operations

pub mod commit;
pub mod phase;
pub mod tag;
pub mod version;

pub use commit::CommitSummary;
pub use phase::{Phase, PhaseSelection};
pub use tag::{parse_tag_version, ReleaseTag, TagPattern, DEFAULT_TAG_PATTERN};
pub use version::Version;
