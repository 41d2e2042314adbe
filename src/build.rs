//! Build scripts for a pristine checkout of a release
//!
//! Every build starts from `git archive` of the release commit unpacked into a
//! scratch directory, so local modifications and untracked files never leak
//! into the candidate. The scripts are plain `sh` and run through a
//! [crate::process::CommandRunner] with the scratch directory as working
//! directory.

use crate::domain::Version;
use git2::Oid;
use std::path::{Path, PathBuf};

/// Validates that elevated privilege can be obtained
pub const PRIVILEGE_CHECK_SCRIPT: &str = "sudo -v";

/// Runs the test suite at normal privilege
pub const TEST_SCRIPT: &str = "make check";

/// Runs the test suite at elevated privilege
pub const PRIVILEGED_TEST_SCRIPT: &str = "sudo make check";

/// Quote a string for safe use as a single `sh` word
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// A release commit exported as `<project>-<version>/` into a scratch directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArchive {
    repo_dir: PathBuf,
    commit: Oid,
    prefix: String,
}

impl SourceArchive {
    pub fn new(repo_dir: impl Into<PathBuf>, project: &str, version: &Version, commit: Oid) -> Self {
        SourceArchive {
            repo_dir: repo_dir.into(),
            commit,
            prefix: format!("{}-{}", project, version),
        }
    }

    /// Directory name the sources unpack into
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Unpacked source tree inside `build_root`
    pub fn source_dir(&self, build_root: &Path) -> PathBuf {
        build_root.join(&self.prefix)
    }

    /// Export, unpack and bootstrap the sources. Leaves the shell in the source tree.
    fn extract_script(&self) -> String {
        format!(
            "set -e\n\
             tarfile={prefix}.tar\n\
             git -C {repo} archive --prefix={prefix}/ --format=tar -o \"$PWD/$tarfile\" {commit}\n\
             tar xf \"$tarfile\"\n\
             cd {prefix}\n\
             autoreconf -i\n",
            prefix = self.prefix,
            repo = shell_quote(&self.repo_dir.to_string_lossy()),
            commit = self.commit,
        )
    }

    /// Build inside the source tree with the given configure options and CFLAGS
    pub fn in_tree_build_script(&self, configure_options: &str, cflags: &str) -> String {
        let mut configure = String::from("./configure");
        if !configure_options.trim().is_empty() {
            configure.push(' ');
            configure.push_str(configure_options.trim());
        }
        configure.push_str(&format!(" CFLAGS={}", shell_quote(cflags)));

        format!("{}{}\nmake -j\n", self.extract_script(), configure)
    }

    /// Build from a `build/` directory separate from the source tree
    pub fn out_of_tree_build_script(&self) -> String {
        format!(
            "{}mkdir build\ncd build\n../configure\nmake -j\n",
            self.extract_script()
        )
    }
}

/// Configure options for the test build, with instrumentation appended when enabled
pub fn test_configure_options(base: &str, use_valgrind: bool, valgrind_flag: &str) -> String {
    let mut options: Vec<&str> = base.split_whitespace().collect();
    if use_valgrind {
        options.push(valgrind_flag);
    }
    options.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archive() -> SourceArchive {
        SourceArchive::new(
            "/src/tpaf",
            "tpaf",
            &Version::new(1, 2, 3),
            Oid::from_bytes(&[0xab; 20]).unwrap(),
        )
    }

    #[test]
    fn test_prefix_and_source_dir() {
        let archive = archive();
        assert_eq!(archive.prefix(), "tpaf-1.2.3");
        assert_eq!(
            archive.source_dir(Path::new("/tmp/x")),
            PathBuf::from("/tmp/x/tpaf-1.2.3")
        );
    }

    #[test]
    fn test_in_tree_script() {
        let script = archive().in_tree_build_script("", "-Werror -O2");
        assert!(script.starts_with("set -e\n"));
        assert!(script.contains(&format!(
            "git -C '/src/tpaf' archive --prefix=tpaf-1.2.3/ --format=tar -o \"$PWD/$tarfile\" {}",
            "ab".repeat(20)
        )));
        assert!(script.contains("autoreconf -i\n"));
        assert!(script.contains("./configure CFLAGS='-Werror -O2'\n"));
        assert!(script.ends_with("make -j\n"));
    }

    #[test]
    fn test_in_tree_script_with_options() {
        let script = archive().in_tree_build_script("--enable-valgrind", "-Werror");
        assert!(script.contains("./configure --enable-valgrind CFLAGS='-Werror'\n"));
    }

    #[test]
    fn test_out_of_tree_script() {
        let script = archive().out_of_tree_build_script();
        assert!(script.contains("mkdir build\ncd build\n../configure\nmake -j\n"));
        assert!(!script.contains("./configure CFLAGS"));
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("plain"), "'plain'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn test_configure_options_appends_valgrind_flag() {
        assert_eq!(test_configure_options("", false, "--enable-valgrind"), "");
        assert_eq!(
            test_configure_options("", true, "--enable-valgrind"),
            "--enable-valgrind"
        );
        assert_eq!(
            test_configure_options(" --prefix=/opt ", true, "--enable-valgrind"),
            "--prefix=/opt --enable-valgrind"
        );
    }
}
