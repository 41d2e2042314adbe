use crate::domain::{ReleaseTag, TagPattern};
use crate::error::{ReleaseCheckError, Result};
use crate::git::Repository;
use git2::Oid;
use tracing::debug;

/// Release tags of a repository, derived from its tag list
pub struct ReleaseTagIndex<'a, R: Repository> {
    repo: &'a R,
    pattern: &'a TagPattern,
}

impl<'a, R: Repository> ReleaseTagIndex<'a, R> {
    pub fn new(repo: &'a R, pattern: &'a TagPattern) -> Self {
        ReleaseTagIndex { repo, pattern }
    }

    /// Every tag whose name matches the release pattern, in enumeration order
    ///
    /// A matching tag whose name does not parse as a release version fails the
    /// whole call.
    pub fn all_release_tags(&self) -> Result<Vec<ReleaseTag>> {
        let tags = self
            .repo
            .list_tags()?
            .into_iter()
            .filter(|tag| self.pattern.matches(&tag.name))
            .map(|tag| ReleaseTag::from_name(tag.name, tag.target))
            .collect::<Result<Vec<_>>>()?;

        debug!(count = tags.len(), pattern = self.pattern.as_str(), "indexed release tags");
        Ok(tags)
    }

    /// Release tags pointing at `commit`
    pub fn tags_for_commit(&self, commit: Oid) -> Result<Vec<ReleaseTag>> {
        Ok(self
            .all_release_tags()?
            .into_iter()
            .filter(|tag| tag.commit == commit)
            .collect())
    }

    /// The single release tag of `commit`
    ///
    /// Zero or several release tags on the commit is an error naming it.
    pub fn release_tag_for_commit(&self, commit: Oid) -> Result<ReleaseTag> {
        let mut tags = self.tags_for_commit(commit)?;

        if tags.len() != 1 {
            return Err(ReleaseCheckError::ReleaseTagCount {
                commit: commit.to_string(),
                count: tags.len(),
            });
        }

        Ok(tags.remove(0))
    }
}
