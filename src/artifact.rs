//! Version artifact parsing
//!
//! A build generates a header containing a line of the form
//!
//! ```text
//! #define TPAF_VERSION "1.2.3"
//! ```
//!
//! where `TPAF` is the upper-cased project name. Only that quoted
//! `<major>.<minor>.<patch>` string is read; nothing else in the file matters.
//! A file without such a line is a meta-check failure.

use crate::domain::Version;
use crate::error::{ReleaseCheckError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Extracts the embedded version from generated build output
#[derive(Debug, Clone)]
pub struct VersionArtifact {
    regex: Regex,
    marker: String,
}

impl VersionArtifact {
    /// Parser for `<PROJECT>_VERSION "<major>.<minor>.<patch>"`
    pub fn new(project: &str) -> Result<Self> {
        let marker = format!("{}_VERSION", project.to_uppercase());
        let regex = Regex::new(&format!(
            r#"{}\s+"([0-9]+)\.([0-9]+)\.([0-9]+)""#,
            regex::escape(&marker)
        ))
        .map_err(|e| ReleaseCheckError::config(format!("Invalid project name '{}': {}", project, e)))?;

        Ok(VersionArtifact { regex, marker })
    }

    /// Extract the version from artifact text
    pub fn parse(&self, text: &str) -> Result<Version> {
        let captures = self.regex.captures(text).ok_or_else(|| {
            ReleaseCheckError::artifact(format!("No {} definition found", self.marker))
        })?;

        let component = |i: usize| -> Result<u32> {
            captures[i].parse::<u32>().map_err(|_| {
                ReleaseCheckError::artifact(format!(
                    "{} component '{}' out of range",
                    self.marker, &captures[i]
                ))
            })
        };

        Ok(Version::new(component(1)?, component(2)?, component(3)?))
    }

    /// Read and parse an artifact file
    pub fn read(&self, path: &Path) -> Result<Version> {
        let text = fs::read_to_string(path).map_err(|e| {
            ReleaseCheckError::artifact(format!("Cannot read {}: {}", path.display(), e))
        })?;

        self.parse(&text).map_err(|e| match e {
            ReleaseCheckError::ArtifactFormat(msg) => {
                ReleaseCheckError::artifact(format!("{} in {}", msg, path.display()))
            }
            other => other,
        })
    }
}
