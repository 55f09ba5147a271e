use crate::domain::version::{ChangeKind, Version};
use crate::error::Result;
use chrono::{DateTime, Utc};

/// A published release of a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Tag the release points at, used as a comparison endpoint
    pub tag_name: String,
    pub version: Version,
    pub published_at: Option<DateTime<Utc>>,
}

impl Release {
    /// Create a release whose tag is the version prefixed with `v`
    pub fn new(version: Version) -> Self {
        Release {
            tag_name: format!("v{}", version),
            version,
            published_at: None,
        }
    }

    /// Create a release from its tag name, parsing the version out of it
    pub fn from_tag(tag_name: impl Into<String>) -> Result<Self> {
        let tag_name = tag_name.into();
        let version = Version::parse(&tag_name)?;
        Ok(Release {
            tag_name,
            version,
            published_at: None,
        })
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }
}

/// Releases of a repository, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Releases {
    releases: Vec<Release>,
}

impl Releases {
    pub fn new(releases: Vec<Release>) -> Self {
        Releases { releases }
    }

    /// The most recent release, if any
    pub fn latest(&self) -> Option<&Release> {
        self.releases.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Release> {
        self.releases.iter()
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// Compute the next version from a hint.
    ///
    /// An explicit version string is taken as-is. Otherwise the hint is resolved
    /// as a bump kind and applied to the latest release (0.0.0 when there is none).
    pub fn next(&self, hint: &str) -> Result<Version> {
        if let Some(explicit) = Version::parse_explicit(hint)? {
            return Ok(explicit);
        }

        let kind = ChangeKind::resolve_bump(hint)?;
        let current = self
            .latest()
            .map(|release| release.version.clone())
            .unwrap_or_else(|| Version::new(0, 0, 0));

        current.bump(kind)
    }
}

impl IntoIterator for Releases {
    type Item = Release;
    type IntoIter = std::vec::IntoIter<Release>;

    fn into_iter(self) -> Self::IntoIter {
        self.releases.into_iter()
    }
}
