//! Version-control query interface
//!
//! The release checker only reads from version control. This module defines
//! the [Repository] trait covering those reads, with two implementations:
//!
//! - [repository::Git2Repository]: backed by the `git2` crate
//! - [mock::MockRepository]: in-memory history for tests
//!
//! Code that resolves releases or validates them depends on the trait, never on
//! a concrete implementation.
//!
//! ```rust
//! # use check_release::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let commit = repo.resolve_commit("v1.2.3")?;
//! for change in repo.commits_in_range(None, commit)? {
//!     println!("{}", change);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::CommitSummary;
use crate::error::Result;
use git2::Oid;
use std::path::PathBuf;

/// A tag name and the commit it ultimately points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    pub target: Oid,
}

impl TagRef {
    pub fn new(name: impl Into<String>, target: Oid) -> Self {
        TagRef {
            name: name.into(),
            target,
        }
    }
}

/// Read-only version-control operations needed to check a release
///
/// All methods return [crate::error::Result<T>]; implementations map their
/// underlying errors (like `git2::Error`) onto [crate::error::ReleaseCheckError].
pub trait Repository {
    /// Root of the working tree, used as the source for archive extraction
    fn workdir(&self) -> Result<PathBuf>;

    /// Every tag in the repository with the commit it points at
    ///
    /// Annotated tags are peeled to their commit. Enumeration order is stable
    /// for a given repository state and is the order used for tie-breaks.
    fn list_tags(&self) -> Result<Vec<TagRef>>;

    /// Resolve a full SHA, abbreviated SHA or tag name to a commit
    fn resolve_commit(&self, reference: &str) -> Result<Oid>;

    /// Abbreviated id and one-line summary of a commit
    fn commit_summary(&self, oid: Oid) -> Result<CommitSummary>;

    /// Whether tracked files carry uncommitted modifications
    ///
    /// Untracked files do not make the tree dirty.
    fn is_dirty(&self) -> Result<bool>;

    /// Commits reachable from `to` but not from `from`, newest first
    ///
    /// With `from` set to `None` this is the whole history up to `to`.
    fn commits_in_range(&self, from: Option<Oid>, to: Oid) -> Result<Vec<CommitSummary>>;
}
