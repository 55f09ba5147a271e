use crate::error::{ChangelogError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Aliases accepted wherever a bump kind is given as free-form text
pub const BUMP_ALIASES: &[(&str, ChangeKind)] = &[
    ("major", ChangeKind::Major),
    ("maj", ChangeKind::Major),
    ("minor", ChangeKind::Minor),
    ("min", ChangeKind::Minor),
    ("feature", ChangeKind::Minor),
    ("feat", ChangeKind::Minor),
    ("patch", ChangeKind::Patch),
    ("bug", ChangeKind::Patch),
    ("bugfix", ChangeKind::Patch),
];

/// Semantic change carried by a commit, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    #[serde(alias = "maj")]
    Major,
    #[serde(alias = "min", alias = "feature", alias = "feat")]
    Minor,
    #[serde(alias = "bug", alias = "bugfix")]
    Patch,
    None,
}

impl ChangeKind {
    /// All kinds in the order buckets are displayed
    pub const DISPLAY_ORDER: [ChangeKind; 4] = [
        ChangeKind::Major,
        ChangeKind::Minor,
        ChangeKind::Patch,
        ChangeKind::None,
    ];

    /// Resolve a bump kind from a free-form hint (case-insensitive alias lookup)
    pub fn resolve_bump(hint: &str) -> Result<Self> {
        let needle = hint.trim().to_lowercase();
        BUMP_ALIASES
            .iter()
            .find(|(alias, _)| *alias == needle)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| ChangelogError::unknown_bump_kind(hint))
    }

    /// Rank used to pick the most significant of several matches
    pub fn significance(&self) -> u8 {
        match self {
            ChangeKind::Major => 3,
            ChangeKind::Minor => 2,
            ChangeKind::Patch => 1,
            ChangeKind::None => 0,
        }
    }
}

impl FromStr for ChangeKind {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        ChangeKind::resolve_bump(s)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Major => write!(f, "major"),
            ChangeKind::Minor => write!(f, "minor"),
            ChangeKind::Patch => write!(f, "patch"),
            ChangeKind::None => write!(f, "none"),
        }
    }
}

/// Semantic version representation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: Option<String>,
}

impl Version {
    /// Create a new release version (no pre-release tag)
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre_release: None,
        }
    }

    /// Attach a pre-release tag
    pub fn with_pre_release(mut self, pre_release: impl Into<String>) -> Self {
        self.pre_release = Some(pre_release.into());
        self
    }

    /// Parse a version such as "v1.2.3" or "1.2.3-beta.1"
    pub fn parse(text: &str) -> Result<Self> {
        let re = Regex::new(r"^[vV]?(\d+)\.(\d+)\.(\d+)(?:-([0-9A-Za-z.-]+))?$")
            .map_err(|e| ChangelogError::parse(e.to_string()))?;

        let captures = re.captures(text.trim()).ok_or_else(|| {
            ChangelogError::parse(format!(
                "Invalid version format: '{}' - expected [v]X.Y.Z[-PRERELEASE]",
                text
            ))
        })?;

        let component = |index: usize, name: &str| -> Result<u64> {
            captures[index].parse::<u64>().map_err(|_| {
                ChangelogError::parse(format!("Invalid {} version: {}", name, &captures[index]))
            })
        };

        let major = component(1, "major")?;
        let minor = component(2, "minor")?;
        let patch = component(3, "patch")?;

        let pre_release = match captures.get(4) {
            Some(pre) => {
                semver::Prerelease::new(pre.as_str()).map_err(|e| {
                    ChangelogError::parse(format!(
                        "Invalid pre-release '{}': {}",
                        pre.as_str(),
                        e
                    ))
                })?;
                Some(pre.as_str().to_string())
            }
            None => None,
        };

        Ok(Version {
            major,
            minor,
            patch,
            pre_release,
        })
    }

    /// Read a next-version hint as an explicit version.
    ///
    /// Hints that do not start with a digit (after an optional `v`) are bump
    /// kinds and yield `Ok(None)`. Version-shaped hints must parse fully.
    pub fn parse_explicit(hint: &str) -> Result<Option<Self>> {
        let trimmed = hint.trim();
        let digits = trimmed
            .strip_prefix(|c: char| c == 'v' || c == 'V')
            .unwrap_or(trimmed);
        if !digits.starts_with(|c: char| c.is_ascii_digit()) {
            return Ok(None);
        }
        Version::parse(trimmed).map(Some)
    }

    /// Resolve a bump kind from a free-form hint
    pub fn resolve_bump(hint: &str) -> Result<ChangeKind> {
        ChangeKind::resolve_bump(hint)
    }

    /// Total semver precedence ordering against another version
    pub fn compare_with(&self, other: &Version) -> Ordering {
        self.cmp(other)
    }

    /// Bump version according to change kind; any pre-release tag is dropped
    ///
    /// Fails when the bumped component is already `u64::MAX`.
    pub fn bump(&self, kind: ChangeKind) -> Result<Self> {
        let increment = |value: u64, name: &str| {
            value.checked_add(1).ok_or_else(|| {
                ChangelogError::parse(format!(
                    "Cannot bump {} version of {}: component overflow",
                    name, self
                ))
            })
        };

        Ok(match kind {
            ChangeKind::Major => Version::new(increment(self.major, "major")?, 0, 0),
            ChangeKind::Minor => Version::new(self.major, increment(self.minor, "minor")?, 0),
            ChangeKind::Patch => {
                Version::new(self.major, self.minor, increment(self.patch, "patch")?)
            }
            ChangeKind::None => self.clone(),
        })
    }

    /// Whether this version carries a pre-release tag
    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }
}

fn compare_pre_release(a: &str, b: &str) -> Ordering {
    match (semver::Prerelease::new(a), semver::Prerelease::new(b)) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => compare_pre_release(a, b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Version {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre_release {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("v1.2.3").unwrap();
        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 2);
        assert_eq!(v.patch, 3);
        assert_eq!(v.pre_release, None);
    }

    #[test]
    fn test_version_parse_without_v() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_pre_release() {
        let v = Version::parse("v2.0.0-beta.1").unwrap();
        assert_eq!(v, Version::new(2, 0, 0).with_pre_release("beta.1"));
        assert!(v.is_pre_release());
    }

    #[test]
    fn test_version_parse_invalid() {
        for input in ["1.2", "v1.2.3.4", "", "vx.y.z", "1.2.3-", "1.2.3-beta..1", "1.-2.3"] {
            assert!(
                matches!(Version::parse(input), Err(ChangelogError::Parse(_))),
                "expected parse error for '{}'",
                input
            );
        }
    }

    #[test]
    fn test_version_display_normalizes() {
        assert_eq!(Version::parse("v1.2.3").unwrap().to_string(), "1.2.3");
        assert_eq!(Version::parse("V01.02.03").unwrap().to_string(), "1.2.3");
        assert_eq!(
            Version::parse("1.0.0-rc.1").unwrap().to_string(),
            "1.0.0-rc.1"
        );
    }

    #[test]
    fn test_version_ordering() {
        let v = |s: &str| Version::parse(s).unwrap();
        assert_eq!(v("1.2.3").compare_with(&v("1.2.3")), Ordering::Equal);
        assert_eq!(v("2.0.0").compare_with(&v("1.9.9")), Ordering::Greater);
        assert_eq!(v("1.10.0").compare_with(&v("1.9.0")), Ordering::Greater);
        assert_eq!(v("1.0.0").compare_with(&v("1.0.0-rc.1")), Ordering::Greater);
        assert_eq!(v("1.0.0-alpha").compare_with(&v("1.0.0-beta")), Ordering::Less);
        assert_eq!(v("1.0.0-rc.2").compare_with(&v("1.0.0-rc.10")), Ordering::Less);
    }

    #[test]
    fn test_version_bump_major() {
        let bumped = Version::new(1, 2, 3).bump(ChangeKind::Major).unwrap();
        assert_eq!(bumped, Version::new(2, 0, 0));
    }

    #[test]
    fn test_version_bump_minor() {
        let bumped = Version::new(1, 2, 3).bump(ChangeKind::Minor).unwrap();
        assert_eq!(bumped, Version::new(1, 3, 0));
    }

    #[test]
    fn test_version_bump_patch() {
        let bumped = Version::new(1, 2, 3).bump(ChangeKind::Patch).unwrap();
        assert_eq!(bumped, Version::new(1, 2, 4));
    }

    #[test]
    fn test_bump_always_increases() {
        for input in ["0.0.0", "1.2.3", "1.2.3-beta", "9.99.999-rc.1"] {
            let v = Version::parse(input).unwrap();
            for kind in [ChangeKind::Major, ChangeKind::Minor, ChangeKind::Patch] {
                assert_eq!(v.bump(kind).unwrap().compare_with(&v), Ordering::Greater);
            }
        }
    }

    #[test]
    fn test_version_bump_component_overflow() {
        let v = Version::parse("18446744073709551615.0.0").unwrap();
        assert!(matches!(v.bump(ChangeKind::Major), Err(ChangelogError::Parse(_))));
        assert_eq!(v.bump(ChangeKind::Minor).unwrap().to_string(), "18446744073709551615.1.0");

        let v = Version::new(1, u64::MAX, u64::MAX);
        assert!(v.bump(ChangeKind::Minor).is_err());
        assert!(v.bump(ChangeKind::Patch).is_err());
        assert_eq!(v.bump(ChangeKind::Major).unwrap(), Version::new(2, 0, 0));
    }

    #[test]
    fn test_parse_explicit_hint() {
        assert_eq!(
            Version::parse_explicit("v1.5.0").unwrap(),
            Some(Version::new(1, 5, 0))
        );
        assert_eq!(Version::parse_explicit("minor").unwrap(), None);
        assert_eq!(Version::parse_explicit("vague").unwrap(), None);
        assert!(matches!(
            Version::parse_explicit("v1.2"),
            Err(ChangelogError::Parse(_))
        ));
        assert!(matches!(
            Version::parse_explicit("2"),
            Err(ChangelogError::Parse(_))
        ));
    }

    #[test]
    fn test_resolve_bump_aliases() {
        assert_eq!(
            Version::resolve_bump("maj").unwrap(),
            Version::resolve_bump("major").unwrap()
        );
        assert_eq!(ChangeKind::resolve_bump("FEAT").unwrap(), ChangeKind::Minor);
        assert_eq!(ChangeKind::resolve_bump("Min").unwrap(), ChangeKind::Minor);
        assert_eq!(ChangeKind::resolve_bump("bugfix").unwrap(), ChangeKind::Patch);
        assert_eq!("bug".parse::<ChangeKind>().unwrap(), ChangeKind::Patch);
    }

    #[test]
    fn test_resolve_bump_unknown() {
        assert!(matches!(
            Version::resolve_bump("bogus"),
            Err(ChangelogError::UnknownBumpKind(hint)) if hint == "bogus"
        ));
    }
}
