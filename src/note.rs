use std::fmt;

/// Informational findings reported during validation.
/// These never fail a run; they are printed as `NOTE:` lines.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseNote {
    /// The release is the first of its major line
    NoPreviousRelease { version: String },
    /// The previous release already contains every commit of this one
    NoChanges { release: String, previous: String },
}

impl fmt::Display for ReleaseNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseNote::NoPreviousRelease { version } => {
                write!(f, "Unable to find the release previous to {}", version)
            }
            ReleaseNote::NoChanges { release, previous } => {
                write!(f, "No commits between {} and {}", previous, release)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_previous_release_display() {
        let note = ReleaseNote::NoPreviousRelease {
            version: "1.0.0".to_string(),
        };
        assert_eq!(
            note.to_string(),
            "Unable to find the release previous to 1.0.0"
        );
    }

    #[test]
    fn test_no_changes_display() {
        let note = ReleaseNote::NoChanges {
            release: "1.0.1".to_string(),
            previous: "1.0.0".to_string(),
        };
        assert!(note.to_string().contains("1.0.0 and 1.0.1"));
    }
}
