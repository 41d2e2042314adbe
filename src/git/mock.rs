use crate::domain::CommitSummary;
use crate::error::{ReleaseCheckError, Result};
use crate::git::{Repository, TagRef};
use git2::Oid;
use std::path::PathBuf;

/// Mock repository for testing without actual git operations
///
/// History is linear: commits are stored oldest first and each commit's
/// parent is the one added before it.
pub struct MockRepository {
    workdir: PathBuf,
    commits: Vec<CommitSummary>,
    tags: Vec<TagRef>,
    dirty: bool,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            workdir: PathBuf::from("/mock/repo"),
            commits: Vec::new(),
            tags: Vec::new(),
            dirty: false,
        }
    }

    /// Append a commit on top of the current history and return its id
    ///
    /// The id is derived from the commit's position: the little-endian bytes
    /// of `n` repeated five times for the n-th commit.
    pub fn add_commit(&mut self, summary: impl Into<String>) -> Oid {
        let index = u32::try_from(self.commits.len() + 1).unwrap_or(u32::MAX);
        let oid = Oid::from_bytes(&index.to_le_bytes().repeat(5)).unwrap_or_else(|_| Oid::zero());
        let short_id = oid.to_string()[..7].to_string();
        self.commits.push(CommitSummary::new(oid, short_id, summary));
        oid
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.push(TagRef::new(name, oid));
    }

    /// Mark the working tree as carrying modifications
    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    fn position(&self, oid: Oid) -> Result<usize> {
        self.commits
            .iter()
            .position(|c| c.id == oid)
            .ok_or_else(|| ReleaseCheckError::tag(format!("Unknown commit {}", oid)))
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn workdir(&self) -> Result<PathBuf> {
        Ok(self.workdir.clone())
    }

    fn list_tags(&self) -> Result<Vec<TagRef>> {
        Ok(self.tags.clone())
    }

    fn resolve_commit(&self, reference: &str) -> Result<Oid> {
        if let Some(tag) = self.tags.iter().find(|t| t.name == reference) {
            return Ok(tag.target);
        }

        self.commits
            .iter()
            .find(|c| !reference.is_empty() && c.id.to_string().starts_with(reference))
            .map(|c| c.id)
            .ok_or_else(|| ReleaseCheckError::tag(format!("Cannot resolve '{}'", reference)))
    }

    fn commit_summary(&self, oid: Oid) -> Result<CommitSummary> {
        let index = self.position(oid)?;
        Ok(self.commits[index].clone())
    }

    fn is_dirty(&self) -> Result<bool> {
        Ok(self.dirty)
    }

    fn commits_in_range(&self, from: Option<Oid>, to: Oid) -> Result<Vec<CommitSummary>> {
        let end = self.position(to)?;
        let start = match from {
            Some(from) => self.position(from)? + 1,
            None => 0,
        };

        if start > end {
            return Ok(Vec::new());
        }

        Ok(self.commits[start..=end].iter().rev().cloned().collect())
    }
}
