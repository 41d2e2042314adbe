//! Release validation
//!
//! [ReleaseValidator] runs up to three phases against one release commit:
//!
//! 1. **meta** - build a pristine export and check that the version baked into
//!    the build agrees with the release tag
//! 2. **changes** - list the commits since the previous release
//! 3. **test** - out-of-tree build, then in-tree build with the test suite
//!    run at normal and elevated privilege
//!
//! Phases run in that order and the first failure ends the run. Release tags
//! are recomputed from the repository in every phase; nothing but the
//! resolved commit is carried between phases.

pub mod report;
pub mod state;

pub use report::{ChangeReport, MetaReport};
pub use state::ValidationState;

use crate::artifact::VersionArtifact;
use crate::build::{
    test_configure_options, SourceArchive, PRIVILEGED_TEST_SCRIPT, PRIVILEGE_CHECK_SCRIPT,
    TEST_SCRIPT,
};
use crate::config::{Config, ValidatorOptions};
use crate::domain::{Phase, ReleaseTag, TagPattern, Version};
use crate::error::{ReleaseCheckError, Result};
use crate::git::Repository;
use crate::note::ReleaseNote;
use crate::process::{CommandOutput, CommandRunner};
use crate::release::{previous_release, ReleaseTagIndex};
use crate::ui;
use git2::Oid;
use std::path::Path;
use tempfile::TempDir;
use tracing::{debug, info};

/// Validates a tagged release against its repository
pub struct ReleaseValidator<'a, R: Repository, C: CommandRunner> {
    repo: &'a R,
    runner: &'a C,
    config: &'a Config,
    options: ValidatorOptions,
    pattern: TagPattern,
    artifact: VersionArtifact,
    state: ValidationState,
}

impl<'a, R: Repository, C: CommandRunner> ReleaseValidator<'a, R, C> {
    pub fn new(
        repo: &'a R,
        runner: &'a C,
        config: &'a Config,
        options: ValidatorOptions,
    ) -> Result<Self> {
        Ok(ReleaseValidator {
            repo,
            runner,
            config,
            pattern: config.project.tag_pattern()?,
            artifact: VersionArtifact::new(&config.project.name)?,
            options,
            state: ValidationState::Idle,
        })
    }

    pub fn state(&self) -> ValidationState {
        self.state
    }

    /// Run every selected phase against `reference` (a SHA or tag name).
    ///
    /// The working tree is checked for modifications once, before anything
    /// else; a dirty tree blocks all phases.
    pub fn run(&mut self, reference: &str) -> Result<()> {
        self.check_repo()?;

        let commit = match self.repo.resolve_commit(reference) {
            Ok(commit) => commit,
            Err(e) => return Err(self.fail(e)),
        };
        info!(reference, commit = %commit, phases = ?self.options.phases, "validating release");

        for phase in self.options.phases.phases() {
            match phase {
                Phase::Meta => ui::display_meta_report(&self.check_meta(commit)?),
                Phase::Changes => ui::display_change_report(&self.list_changes(commit)?),
                Phase::Test => self.run_tests(commit)?,
            }
        }

        self.state = self.state.transition(ValidationState::Done)?;
        Ok(())
    }

    /// Fail if tracked files carry uncommitted modifications
    pub fn check_repo(&mut self) -> Result<()> {
        match self.repo.is_dirty() {
            Ok(false) => Ok(()),
            Ok(true) => Err(self.fail(ReleaseCheckError::DirtyWorkingTree)),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Meta-data check: artifact version must equal the tag version
    pub fn check_meta(&mut self, commit: Oid) -> Result<MetaReport> {
        self.enter(Phase::Meta.into(), |v| v.meta_check(commit))
    }

    /// List the commits in (previous release, release]
    pub fn list_changes(&mut self, commit: Oid) -> Result<ChangeReport> {
        self.enter(Phase::Changes.into(), |v| v.change_listing(commit))
    }

    /// Out-of-tree build, then in-tree build and both test-suite runs
    pub fn run_tests(&mut self, commit: Oid) -> Result<()> {
        self.enter(Phase::Test.into(), |v| v.build_test(commit))
    }

    fn enter<T>(
        &mut self,
        next: ValidationState,
        phase: impl FnOnce(&Self) -> Result<T>,
    ) -> Result<T> {
        self.state = self.state.transition(next)?;
        debug!(state = %next, "entering phase");

        let result = phase(self);
        if result.is_err() {
            self.state = ValidationState::Failed;
        }
        result
    }

    fn fail(&mut self, err: ReleaseCheckError) -> ReleaseCheckError {
        self.state = ValidationState::Failed;
        err
    }

    fn index(&self) -> ReleaseTagIndex<'_, R> {
        ReleaseTagIndex::new(self.repo, &self.pattern)
    }

    fn meta_check(&self, commit: Oid) -> Result<MetaReport> {
        let tag = self.index().release_tag_for_commit(commit)?;
        let artifact_version = self.build_artifact_version(&tag)?;

        if !artifact_version.equals(&tag.version)? {
            return Err(ReleaseCheckError::VersionMismatch {
                artifact: artifact_version.to_string(),
                tag: tag.version.to_string(),
            });
        }

        let releases = self.index().all_release_tags()?;
        let previous = previous_release(&tag.version, &releases)?.cloned();

        let mut notes = Vec::new();
        if previous.is_none() {
            notes.push(ReleaseNote::NoPreviousRelease {
                version: tag.version.to_string(),
            });
        }

        Ok(MetaReport {
            header_file: self.header_file_name(),
            artifact_version,
            commit: self.repo.commit_summary(commit)?,
            tag,
            previous,
            releases: releases.into_iter().map(|t| t.version).collect(),
            notes,
        })
    }

    fn change_listing(&self, commit: Oid) -> Result<ChangeReport> {
        let release = self.index().release_tag_for_commit(commit)?;
        let releases = self.index().all_release_tags()?;
        let previous = previous_release(&release.version, &releases)?.cloned();

        let commits = self
            .repo
            .commits_in_range(previous.as_ref().map(|p| p.commit), release.commit)?;

        let mut notes = Vec::new();
        if let (Some(previous), true) = (&previous, commits.is_empty()) {
            notes.push(ReleaseNote::NoChanges {
                release: release.version.to_string(),
                previous: previous.version.to_string(),
            });
        }

        Ok(ChangeReport {
            release,
            previous,
            commits,
            notes,
        })
    }

    fn build_test(&self, commit: Oid) -> Result<()> {
        let tag = self.index().release_tag_for_commit(commit)?;

        self.assure_privilege()?;

        ui::display_status("Test build w/ separate build directory.");
        self.build_out_of_tree(&tag)?;

        self.run_test_suite(&tag)
    }

    /// Build the release in-tree and read the version from the generated header
    fn build_artifact_version(&self, tag: &ReleaseTag) -> Result<Version> {
        let scratch = scratch_dir()?;
        let archive = self.archive(tag)?;

        self.run_checked(
            &format!("build {}", archive.prefix()),
            &archive.in_tree_build_script("", &self.options.cflags),
            scratch.path(),
        )?;

        let header = archive
            .source_dir(scratch.path())
            .join(&self.config.project.version_header);
        self.artifact.read(&header)
    }

    fn build_out_of_tree(&self, tag: &ReleaseTag) -> Result<()> {
        let scratch = scratch_dir()?;
        let archive = self.archive(tag)?;

        self.run_checked(
            &format!("out-of-tree build {}", archive.prefix()),
            &archive.out_of_tree_build_script(),
            scratch.path(),
        )?;
        Ok(())
    }

    fn run_test_suite(&self, tag: &ReleaseTag) -> Result<()> {
        let build = &self.config.build;
        let configure_options = test_configure_options(
            &build.configure_options,
            self.options.use_valgrind,
            &build.valgrind_flag,
        );

        if configure_options.is_empty() {
            ui::display_status("Running test using default configure options.");
        } else {
            ui::display_status(&format!(
                "Running test using configure options: \"{}\".",
                configure_options
            ));
        }

        let scratch = scratch_dir()?;
        let archive = self.archive(tag)?;

        self.run_checked(
            &format!("build {}", archive.prefix()),
            &archive.in_tree_build_script(&configure_options, &self.options.cflags),
            scratch.path(),
        )?;

        let source_dir = archive.source_dir(scratch.path());
        self.run_checked(TEST_SCRIPT, TEST_SCRIPT, &source_dir)?;
        self.run_checked(PRIVILEGED_TEST_SCRIPT, PRIVILEGED_TEST_SCRIPT, &source_dir)?;
        Ok(())
    }

    /// Obtain elevated privilege up front so the privileged test run cannot
    /// fail on it halfway through the phase
    fn assure_privilege(&self) -> Result<()> {
        let output = self
            .runner
            .run(PRIVILEGE_CHECK_SCRIPT, &self.repo.workdir()?)?;

        if output.success() {
            Ok(())
        } else {
            Err(ReleaseCheckError::PrivilegeUnavailable(
                output.output.trim().to_string(),
            ))
        }
    }

    fn archive(&self, tag: &ReleaseTag) -> Result<SourceArchive> {
        Ok(SourceArchive::new(
            self.repo.workdir()?,
            &self.config.project.name,
            &tag.version,
            tag.commit,
        ))
    }

    fn run_checked(&self, label: &str, script: &str, dir: &Path) -> Result<CommandOutput> {
        let output = self.runner.run(script, dir)?;

        if output.success() {
            Ok(output)
        } else {
            debug!(label, status = ?output.status, "command failed");
            Err(ReleaseCheckError::CommandFailed {
                command: label.to_string(),
                output: output.output,
            })
        }
    }

    fn header_file_name(&self) -> String {
        let header = Path::new(&self.config.project.version_header);
        header
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.config.project.version_header.clone())
    }
}

/// Scratch directory removed when dropped, on every exit path
fn scratch_dir() -> Result<TempDir> {
    Ok(tempfile::Builder::new()
        .prefix("check-release-")
        .tempdir()?)
}
