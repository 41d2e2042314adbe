use crate::domain::{CommitSummary, ReleaseTag, Version};
use crate::note::ReleaseNote;

/// Outcome of a successful meta-data check
#[derive(Debug, Clone, PartialEq)]
pub struct MetaReport {
    /// File name of the generated version header
    pub header_file: String,
    /// Version embedded in the build
    pub artifact_version: Version,
    pub tag: ReleaseTag,
    pub commit: CommitSummary,
    pub previous: Option<ReleaseTag>,
    /// All known release versions, in enumeration order
    pub releases: Vec<Version>,
    pub notes: Vec<ReleaseNote>,
}

/// Commits that make up a release
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeReport {
    pub release: ReleaseTag,
    pub previous: Option<ReleaseTag>,
    /// Newest first
    pub commits: Vec<CommitSummary>,
    pub notes: Vec<ReleaseNote>,
}

impl ChangeReport {
    pub fn is_first_release(&self) -> bool {
        self.previous.is_none()
    }
}
