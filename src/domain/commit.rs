use git2::Oid;
use std::fmt;

/// A commit as shown in change listings: abbreviated id plus one-line summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub id: Oid,
    pub short_id: String,
    pub summary: String,
}

impl CommitSummary {
    pub fn new(id: Oid, short_id: impl Into<String>, summary: impl Into<String>) -> Self {
        CommitSummary {
            id,
            short_id: short_id.into(),
            summary: summary.into(),
        }
    }
}

impl fmt::Display for CommitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.short_id, self.summary)
    }
}
