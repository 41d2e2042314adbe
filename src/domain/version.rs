use crate::error::{ReleaseCheckError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Release version: `major.minor` with an optional patch component.
///
/// A version without a patch is still in development (no patch assigned yet).
/// Ordering is only defined between versions whose patch presence agrees at
/// equal `major.minor`, so this type deliberately does not implement
/// `PartialOrd`/`Ord`. Use [`Version::compare`] and the relational helpers
/// derived from it instead. `PartialEq` is structural identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

impl Version {
    /// Create a version with a patch component
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch: Some(patch),
        }
    }

    /// Create a version whose patch has not been assigned yet
    pub fn unpatched(major: u32, minor: u32) -> Self {
        Version {
            major,
            minor,
            patch: None,
        }
    }

    /// Parse `"major.minor"` or `"major.minor.patch"`.
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    /// Total order over versions with matching patch presence.
    ///
    /// Major is the primary key, then minor, then patch. Comparing a
    /// patch-absent against a patch-present version at the same
    /// `major.minor` yields [`ReleaseCheckError::InconsistentVersionComparison`].
    pub fn compare(&self, other: &Version) -> Result<Ordering> {
        let outer = self
            .major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor));
        if outer != Ordering::Equal {
            return Ok(outer);
        }

        match (self.patch, other.patch) {
            (Some(a), Some(b)) => Ok(a.cmp(&b)),
            (None, None) => Ok(Ordering::Equal),
            _ => Err(ReleaseCheckError::InconsistentVersionComparison {
                left: self.to_string(),
                right: other.to_string(),
            }),
        }
    }

    pub fn equals(&self, other: &Version) -> Result<bool> {
        Ok(self.compare(other)? == Ordering::Equal)
    }

    pub fn lt(&self, other: &Version) -> Result<bool> {
        Ok(self.compare(other)? == Ordering::Less)
    }

    pub fn le(&self, other: &Version) -> Result<bool> {
        Ok(self.compare(other)? != Ordering::Greater)
    }

    pub fn gt(&self, other: &Version) -> Result<bool> {
        Ok(self.compare(other)? == Ordering::Greater)
    }

    pub fn ge(&self, other: &Version) -> Result<bool> {
        Ok(self.compare(other)? != Ordering::Less)
    }
}

impl FromStr for Version {
    type Err = ReleaseCheckError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 2 && parts.len() != 3 {
            return Err(ReleaseCheckError::version(format!(
                "Invalid version format: '{}' - expected X.Y or X.Y.Z",
                s
            )));
        }

        // Digits only: `u32::from_str` would also take a leading '+'
        let component = |name: &str, part: &str| {
            let invalid =
                || ReleaseCheckError::version(format!("Invalid {} version: '{}'", name, part));
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse::<u32>().map_err(|_| invalid())
        };

        let major = component("major", parts[0])?;
        let minor = component("minor", parts[1])?;
        let patch = match parts.get(2) {
            Some(part) => Some(component("patch", part)?),
            None => None,
        };

        Ok(Version {
            major,
            minor,
            patch,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(patch) = self.patch {
            write!(f, ".{}", patch)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse_full() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_unpatched() {
        let v = Version::parse("4.0").unwrap();
        assert_eq!(v, Version::unpatched(4, 0));
        assert_eq!(v.patch, None);
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(Version::parse("1").is_err());
        assert!(Version::parse("1.2.3.4").is_err());
        assert!(Version::parse("1.x.3").is_err());
        assert!(Version::parse("").is_err());
        assert!(Version::parse("-1.0.0").is_err());
    }

    #[test]
    fn test_version_parse_rejects_signed_components() {
        assert!(Version::parse("1.+1.0").is_err());
        assert!(Version::parse("+1.1").is_err());
        assert!(Version::parse("1.1.+0").is_err());
        assert!(Version::parse("1. 1.0").is_err());
    }

    #[test]
    fn test_version_display() {
        assert_eq!(Version::new(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(Version::unpatched(1, 2).to_string(), "1.2");
    }

    #[test]
    fn test_render_then_parse_yields_equal_version() {
        for v in [
            Version::new(0, 0, 0),
            Version::new(1, 10, 7),
            Version::unpatched(3, 1),
        ] {
            let parsed = Version::parse(&v.to_string()).unwrap();
            assert!(parsed.equals(&v).unwrap());
        }
    }

    #[test]
    fn test_compare_major_dominates() {
        let a = Version::new(1, 9, 9);
        let b = Version::new(2, 0, 0);
        assert_eq!(a.compare(&b).unwrap(), Ordering::Less);
        assert_eq!(b.compare(&a).unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_compare_minor_then_patch() {
        assert!(Version::new(1, 1, 9).lt(&Version::new(1, 2, 0)).unwrap());
        assert!(Version::new(1, 2, 1).gt(&Version::new(1, 2, 0)).unwrap());
        assert!(Version::new(1, 2, 1).ge(&Version::new(1, 2, 1)).unwrap());
        assert!(Version::new(1, 2, 1).le(&Version::new(1, 2, 1)).unwrap());
    }

    #[test]
    fn test_compare_unpatched_pair() {
        let a = Version::unpatched(1, 2);
        assert!(a.equals(&Version::unpatched(1, 2)).unwrap());
        assert!(a.lt(&Version::unpatched(1, 3)).unwrap());
    }

    #[test]
    fn test_mixed_patch_presence_differing_minor_is_defined() {
        assert!(Version::unpatched(1, 2).lt(&Version::new(1, 3, 0)).unwrap());
        assert!(Version::new(2, 0, 0).gt(&Version::unpatched(1, 9)).unwrap());
    }

    #[test]
    fn test_mixed_patch_presence_same_minor_is_rejected() {
        let err = Version::unpatched(1, 2)
            .compare(&Version::new(1, 2, 0))
            .unwrap_err();
        assert!(matches!(
            err,
            ReleaseCheckError::InconsistentVersionComparison { .. }
        ));
        assert!(Version::new(1, 2, 0)
            .equals(&Version::unpatched(1, 2))
            .is_err());
    }

    #[test]
    fn test_total_order_over_patched_versions() {
        let versions: Vec<Version> = (0..3)
            .flat_map(|major| {
                (0..3).flat_map(move |minor| (0..3).map(move |patch| Version::new(major, minor, patch)))
            })
            .collect();

        for a in &versions {
            for b in &versions {
                let ab = a.compare(b).unwrap();
                let ba = b.compare(a).unwrap();
                assert_eq!(ab, ba.reverse());
                assert_eq!(ab == Ordering::Equal, a == b);

                for c in &versions {
                    if a.lt(b).unwrap() && b.lt(c).unwrap() {
                        assert!(a.lt(c).unwrap(), "{} < {} < {}", a, b, c);
                    }
                }
            }
        }
    }
}
