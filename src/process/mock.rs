use crate::error::Result;
use crate::process::{CommandOutput, CommandRunner};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

type SideEffect = Box<dyn Fn(&str, &Path)>;

/// Recording command runner for tests
///
/// Every script is recorded. A script containing one of the configured
/// failure patterns exits with status 1; all others succeed after running the
/// optional side effect (e.g. writing the file a real build would generate).
#[derive(Default)]
pub struct MockRunner {
    calls: RefCell<Vec<(String, PathBuf)>>,
    failures: Vec<(String, String)>,
    side_effect: Option<SideEffect>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any script containing `pattern`, reporting `output`
    pub fn fail_on(mut self, pattern: impl Into<String>, output: impl Into<String>) -> Self {
        self.failures.push((pattern.into(), output.into()));
        self
    }

    /// Run `effect` for every successful script
    pub fn on_run(mut self, effect: impl Fn(&str, &Path) + 'static) -> Self {
        self.side_effect = Some(Box::new(effect));
        self
    }

    /// Scripts run so far, in order
    pub fn scripts(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(s, _)| s.clone()).collect()
    }

    /// Working directories used so far, in order
    pub fn dirs(&self) -> Vec<PathBuf> {
        self.calls.borrow().iter().map(|(_, d)| d.clone()).collect()
    }

    pub fn ran(&self, pattern: &str) -> bool {
        self.calls.borrow().iter().any(|(s, _)| s.contains(pattern))
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, script: &str, dir: &Path) -> Result<CommandOutput> {
        self.calls
            .borrow_mut()
            .push((script.to_string(), dir.to_path_buf()));

        if let Some((_, output)) = self.failures.iter().find(|(p, _)| script.contains(p)) {
            return Ok(CommandOutput {
                status: Some(1),
                output: output.clone(),
            });
        }

        if let Some(effect) = &self.side_effect {
            effect(script, dir);
        }

        Ok(CommandOutput {
            status: Some(0),
            output: String::new(),
        })
    }
}
