use crate::domain::CommitSummary;
use crate::error::{ReleaseCheckError, Result};
use crate::git::TagRef;
use git2::{Oid, Repository as Git2Repo, Sort, StatusOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }
}

impl super::Repository for Git2Repository {
    fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| ReleaseCheckError::config("Repository has no working tree"))
    }

    fn list_tags(&self) -> Result<Vec<TagRef>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;

            // Tags on trees or blobs cannot designate a release commit
            match reference.peel_to_commit() {
                Ok(commit) => tags.push(TagRef::new(name, commit.id())),
                Err(e) => debug!(tag = name, error = %e, "skipping tag without commit target"),
            }
        }

        Ok(tags)
    }

    fn resolve_commit(&self, reference: &str) -> Result<Oid> {
        let object = self.repo.revparse_single(reference).map_err(|e| {
            ReleaseCheckError::tag(format!("Cannot resolve '{}': {}", reference, e.message()))
        })?;

        let commit = object.peel_to_commit().map_err(|e| {
            ReleaseCheckError::tag(format!(
                "'{}' does not name a commit: {}",
                reference,
                e.message()
            ))
        })?;

        Ok(commit.id())
    }

    fn commit_summary(&self, oid: Oid) -> Result<CommitSummary> {
        let commit = self.repo.find_commit(oid)?;
        let short_id = commit
            .as_object()
            .short_id()?
            .as_str()
            .unwrap_or_default()
            .to_string();
        let summary = commit.summary().unwrap_or("(empty message)").to_string();

        Ok(CommitSummary::new(oid, short_id, summary))
    }

    fn is_dirty(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(false)
            .include_ignored(false)
            .exclude_submodules(true);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(!statuses.is_empty())
    }

    fn commits_in_range(&self, from: Option<Oid>, to: Oid) -> Result<Vec<CommitSummary>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push(to)?;

        if let Some(from) = from {
            revwalk.hide(from)?;
        }

        revwalk
            .map(|oid| self.commit_summary(oid?))
            .collect()
    }
}
