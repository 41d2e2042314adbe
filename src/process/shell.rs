use crate::error::{ReleaseCheckError, Result};
use crate::process::{CommandOutput, CommandRunner};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

const SHELL: &str = "sh";

/// Runs scripts through `sh -c` with stderr folded into stdout
#[derive(Debug, Clone, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        ShellRunner
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, script: &str, dir: &Path) -> Result<CommandOutput> {
        debug!(dir = %dir.display(), script, "running command");

        // `exec 2>&1` keeps stdout and stderr interleaved in one stream
        let output = Command::new(SHELL)
            .arg("-c")
            .arg(format!("exec 2>&1\n{}", script))
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .output()
            .map_err(|e| {
                ReleaseCheckError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to start {}: {}", SHELL, e),
                ))
            })?;

        Ok(CommandOutput {
            status: output.status.code(),
            output: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
