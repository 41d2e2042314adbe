use crate::domain::{ReleaseTag, Version};
use crate::error::Result;
use tracing::debug;

/// Find the release immediately preceding `target` within its major line.
///
/// Only tags with the same major version that are strictly older than
/// `target` qualify; the greatest of those (minor first, then patch) wins.
/// When two qualifying tags carry equal versions the one enumerated first is
/// kept. A well-formed history never has such duplicates, so which one wins
/// is implementation-defined.
///
/// Returns `Ok(None)` when `target` is the first release of its major line.
pub fn previous_release<'t>(
    target: &Version,
    tags: &'t [ReleaseTag],
) -> Result<Option<&'t ReleaseTag>> {
    let mut candidate: Option<&ReleaseTag> = None;

    for tag in tags {
        let version = &tag.version;

        if version.major != target.major || version.minor > target.minor {
            continue;
        }

        if version.minor == target.minor && version.ge(target)? {
            continue;
        }

        candidate = match candidate {
            Some(best) if !version.gt(&best.version)? => Some(best),
            _ => Some(tag),
        };
    }

    debug!(
        target = %target,
        previous = candidate.map(|t| t.name.as_str()).unwrap_or("none"),
        "resolved previous release"
    );

    Ok(candidate)
}
