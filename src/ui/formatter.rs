//! Pure formatting functions for UI output.
//!
//! Report text is built here as plain strings so it can be tested; the
//! `display_*` functions only add styling and print.

use console::style;

use crate::note::ReleaseNote;
use crate::validator::{ChangeReport, MetaReport};

/// Terminate a message with a period unless it already ends in punctuation.
fn sentence(message: &str) -> String {
    let trimmed = message.trim_end();
    if trimmed.ends_with(['.', '!', '?', ':']) {
        trimmed.to_string()
    } else {
        format!("{}.", trimmed)
    }
}

/// Format and print a fatal error in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), sentence(message));
}

/// Format and print an informational note.
pub fn display_note(message: &str) {
    println!("{} {}", style("NOTE:").yellow(), sentence(message));
}

/// Format and print a progress message.
pub fn display_status(message: &str) {
    println!("{}", message);
}

/// Print every note attached to a report.
pub fn display_notes(notes: &[ReleaseNote]) {
    for note in notes {
        display_note(&note.to_string());
    }
}

/// Print the captured output of a failed command verbatim.
pub fn display_command_output(output: &str) {
    eprint!("{}", output);
    if !output.is_empty() && !output.ends_with('\n') {
        eprintln!();
    }
}

/// Release information block of the meta-data check.
pub fn format_meta_report(report: &MetaReport) -> String {
    let mut out = String::new();
    out.push_str("Release information:\n");
    out.push_str(&format!(
        "  Header version (from \"{}\"): {}\n",
        report.header_file, report.artifact_version
    ));
    out.push_str(&format!("  Git tag version: {}\n", report.tag.version));
    out.push_str("  Commit:\n");
    out.push_str(&format!("    SHA: {}\n", report.commit.id));
    out.push_str(&format!("    Summary: {}\n", report.commit.summary));

    if let Some(previous) = &report.previous {
        out.push_str(&format!(
            "  Previous release: {} (tag {})\n",
            previous.version, previous.name
        ));
    }

    out.push_str("Releases:\n");
    for version in &report.releases {
        out.push_str(&format!("  {}\n", version));
    }
    out
}

/// Change listing, newest commit first.
pub fn format_change_report(report: &ChangeReport) -> String {
    let mut out = match &report.previous {
        Some(previous) => format!(
            "Changes between {} and {}:\n",
            previous.version, report.release.version
        ),
        None => "Changes in the first release:\n".to_string(),
    };

    for commit in &report.commits {
        out.push_str(&format!(" {} {}\n", commit.short_id, commit.summary));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommitSummary, ReleaseTag, Version};
    use git2::Oid;

    fn tag(name: &str, seed: u8) -> ReleaseTag {
        ReleaseTag::from_name(name, Oid::from_bytes(&[seed; 20]).unwrap()).unwrap()
    }

    #[test]
    fn test_sentence() {
        assert_eq!(sentence("Repository contains modifications"), "Repository contains modifications.");
        assert_eq!(sentence("Done."), "Done.");
    }

    #[test]
    fn test_format_meta_report() {
        let release = tag("v1.1.1", 3);
        let report = MetaReport {
            header_file: "tpaf_version.h".to_string(),
            artifact_version: Version::new(1, 1, 1),
            commit: CommitSummary::new(release.commit, "0303030", "Release 1.1.1"),
            tag: release,
            previous: Some(tag("v1.1.0", 2)),
            releases: vec![Version::new(1, 1, 0), Version::new(1, 1, 1)],
            notes: Vec::new(),
        };

        let text = format_meta_report(&report);
        assert!(text.contains("Header version (from \"tpaf_version.h\"): 1.1.1\n"));
        assert!(text.contains("Git tag version: 1.1.1\n"));
        assert!(text.contains(&format!("SHA: {}\n", "03".repeat(20))));
        assert!(text.contains("Summary: Release 1.1.1\n"));
        assert!(text.contains("Previous release: 1.1.0 (tag v1.1.0)\n"));
        assert!(text.ends_with("Releases:\n  1.1.0\n  1.1.1\n"));
    }

    #[test]
    fn test_format_change_report_with_previous() {
        let report = ChangeReport {
            release: tag("v1.1.0", 3),
            previous: Some(tag("v1.0.0", 1)),
            commits: vec![
                CommitSummary::new(Oid::zero(), "ccc3333", "Bump version"),
                CommitSummary::new(Oid::zero(), "bbb2222", "Fix leak"),
            ],
            notes: Vec::new(),
        };

        assert_eq!(
            format_change_report(&report),
            "Changes between 1.0.0 and 1.1.0:\n ccc3333 Bump version\n bbb2222 Fix leak\n"
        );
    }

    #[test]
    fn test_format_change_report_first_release() {
        let report = ChangeReport {
            release: tag("v1.0.0", 1),
            previous: None,
            commits: vec![CommitSummary::new(Oid::zero(), "aaa1111", "Initial")],
            notes: Vec::new(),
        };

        assert!(format_change_report(&report).starts_with("Changes in the first release:\n"));
    }
}
