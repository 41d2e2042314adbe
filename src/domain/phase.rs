use crate::error::{ReleaseCheckError, Result};
use std::fmt;
use std::str::FromStr;

/// A validation phase, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Check release meta data (artifact version vs tag)
    Meta,
    /// List changes since the previous release
    Changes,
    /// Build and run the test suites
    Test,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Meta, Phase::Changes, Phase::Test];

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Meta => "meta",
            Phase::Changes => "changes",
            Phase::Test => "test",
        }
    }
}

impl FromStr for Phase {
    type Err = ReleaseCheckError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "meta" => Ok(Phase::Meta),
            "changes" => Ok(Phase::Changes),
            "test" => Ok(Phase::Test),
            other => Err(ReleaseCheckError::config(format!(
                "Unknown cmd '{}' (expected meta, changes or test)",
                other
            ))),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which phases a run executes. Unselected phases are skipped entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseSelection {
    #[default]
    All,
    Only(Phase),
}

impl PhaseSelection {
    /// Selected phases in fixed execution order
    pub fn phases(&self) -> Vec<Phase> {
        match self {
            PhaseSelection::All => Phase::ALL.to_vec(),
            PhaseSelection::Only(phase) => vec![*phase],
        }
    }
}

impl From<Option<Phase>> for PhaseSelection {
    fn from(phase: Option<Phase>) -> Self {
        match phase {
            Some(phase) => PhaseSelection::Only(phase),
            None => PhaseSelection::All,
        }
    }
}
