use crate::domain::Version;
use crate::error::{ReleaseCheckError, Result};
use git2::Oid;
use regex::Regex;

/// Default pattern a tag name must match to be considered a release tag
pub const DEFAULT_TAG_PATTERN: &str = r"^v[0-9]+";

/// A release tag: a tag name, the version it encodes and the commit it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    pub name: String,
    pub version: Version,
    pub commit: Oid,
}

impl ReleaseTag {
    /// Build a release tag from a tag name, parsing the version it encodes.
    ///
    /// The name must be `v<major>.<minor>.<patch>`. A release always carries a
    /// patch component; a name that matched the release pattern but cannot be
    /// parsed is an error, never skipped.
    pub fn from_name(name: impl Into<String>, commit: Oid) -> Result<Self> {
        let name = name.into();
        let version = parse_tag_version(&name)?;
        Ok(ReleaseTag {
            name,
            version,
            commit,
        })
    }
}

/// Extract the version from a release tag name (e.g., "v1.2.3" -> 1.2.3)
pub fn parse_tag_version(name: &str) -> Result<Version> {
    let stripped = name
        .strip_prefix('v')
        .ok_or_else(|| ReleaseCheckError::tag(format!("Malformed release tag '{}'", name)))?;

    let version = Version::parse(stripped).map_err(|e| {
        ReleaseCheckError::tag(format!("Malformed release tag '{}': {}", name, e))
    })?;

    if version.patch.is_none() {
        return Err(ReleaseCheckError::tag(format!(
            "Malformed release tag '{}': missing patch component",
            name
        )));
    }

    Ok(version)
}

/// Release tag naming pattern
#[derive(Debug, Clone)]
pub struct TagPattern {
    regex: Regex,
}

impl TagPattern {
    /// Compile a tag pattern
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            ReleaseCheckError::config(format!("Invalid tag pattern '{}': {}", pattern, e))
        })?;
        Ok(TagPattern { regex })
    }

    /// Check whether a tag name designates a release
    pub fn matches(&self, tag: &str) -> bool {
        self.regex.is_match(tag)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
