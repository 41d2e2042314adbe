//! User interface module - report printing and operator messages.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Printing whole reports and failures

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_command_output, display_error, display_note, display_notes, display_status,
    format_change_report, format_meta_report,
};

use crate::error::ReleaseCheckError;
use crate::validator::{ChangeReport, MetaReport};

/// Print the notes and release information of a meta-data check.
pub fn display_meta_report(report: &MetaReport) {
    display_notes(&report.notes);
    print!("{}", format_meta_report(report));
}

/// Print a change listing and its notes.
pub fn display_change_report(report: &ChangeReport) {
    print!("{}", format_change_report(report));
    display_notes(&report.notes);
}

/// Report a fatal failure: captured command output first, then the error line.
pub fn display_failure(err: &ReleaseCheckError) {
    if let Some(output) = err.command_output() {
        display_command_output(output);
    }
    if err.is_internal() {
        display_error(&format!("{} (this is a bug in check-release)", err));
    } else {
        display_error(&err.to_string());
    }
}
