//! Process execution interface
//!
//! External build and test steps are opaque shell scripts. A [CommandRunner]
//! runs one script in a directory and reports its combined output; a non-zero
//! exit status is the only failure signal the validator inspects.

pub mod mock;
pub mod shell;

pub use mock::MockRunner;
pub use shell::ShellRunner;

use crate::error::Result;
use std::path::Path;

/// Captured result of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit status, `None` when the process was terminated by a signal
    pub status: Option<i32>,
    /// Interleaved stdout and stderr
    pub output: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs shell scripts on behalf of the validator
pub trait CommandRunner {
    /// Run `script` with `dir` as working directory, capturing combined output
    ///
    /// Returns `Err` only when the script could not be started. A script that
    /// ran and failed is reported through [CommandOutput::status].
    fn run(&self, script: &str, dir: &Path) -> Result<CommandOutput>;
}
