use thiserror::Error;

/// Unified error type for release checking
#[derive(Error, Debug)]
pub enum ReleaseCheckError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    /// Two versions with equal major.minor but differing patch presence were
    /// ordered against each other. Indicates a bug in the caller, not bad input.
    #[error("Inconsistent version comparison: {left} vs {right} (patch presence differs)")]
    InconsistentVersionComparison { left: String, right: String },

    #[error("Repository contains modifications")]
    DirtyWorkingTree,

    #[error("Elevated privilege unavailable: {0}")]
    PrivilegeUnavailable(String),

    #[error("Could not find exactly one release tag for commit {commit} (found {count})")]
    ReleaseTagCount { commit: String, count: usize },

    #[error("Command failed: {command}")]
    CommandFailed { command: String, output: String },

    #[error("Header has version {artifact} and tag suggests {tag}")]
    VersionMismatch { artifact: String, tag: String },

    #[error("Version artifact error: {0}")]
    ArtifactFormat(String),

    #[error("Cannot move from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in check-release
pub type Result<T> = std::result::Result<T, ReleaseCheckError>;

impl ReleaseCheckError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseCheckError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseCheckError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ReleaseCheckError::Tag(msg.into())
    }

    /// Create an artifact error with context
    pub fn artifact(msg: impl Into<String>) -> Self {
        ReleaseCheckError::ArtifactFormat(msg.into())
    }

    /// Captured combined output of a failed external command, if any.
    pub fn command_output(&self) -> Option<&str> {
        match self {
            ReleaseCheckError::CommandFailed { output, .. } => Some(output.as_str()),
            _ => None,
        }
    }

    /// Whether this error signals a defect in the tool rather than bad input
    /// or a failing environment.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ReleaseCheckError::InconsistentVersionComparison { .. }
                | ReleaseCheckError::InvalidTransition { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseCheckError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseCheckError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_version_mismatch_message() {
        let err = ReleaseCheckError::VersionMismatch {
            artifact: "1.2.4".to_string(),
            tag: "1.2.3".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Header has version 1.2.4 and tag suggests 1.2.3"
        );
    }

    #[test]
    fn test_release_tag_count_names_commit() {
        let err = ReleaseCheckError::ReleaseTagCount {
            commit: "abc1234".to_string(),
            count: 0,
        };
        assert!(err.to_string().contains("abc1234"));
        assert!(err.to_string().contains("exactly one release tag"));
    }

    #[test]
    fn test_command_output_only_for_command_failures() {
        let err = ReleaseCheckError::CommandFailed {
            command: "make -j".to_string(),
            output: "error: missing semicolon".to_string(),
        };
        assert_eq!(err.command_output(), Some("error: missing semicolon"));
        assert!(ReleaseCheckError::DirtyWorkingTree.command_output().is_none());
    }

    #[test]
    fn test_inconsistent_comparison_is_internal() {
        let err = ReleaseCheckError::InconsistentVersionComparison {
            left: "1.2".to_string(),
            right: "1.2.0".to_string(),
        };
        assert!(err.is_internal());
        assert!(!ReleaseCheckError::tag("bad").is_internal());
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseCheckError::config("x"), "Configuration error"),
            (ReleaseCheckError::version("x"), "Version parsing error"),
            (ReleaseCheckError::tag("x"), "Tag error"),
            (ReleaseCheckError::artifact("x"), "Version artifact error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
