use crate::domain::Version;
use std::fmt;

/// Non-fatal issues found while building a preview.
/// These are reported to the user while output continues.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewWarning {
    /// Requested next version does not exceed the comparison baseline
    InvalidNextVersion { next: Version, baseline: String },
    /// Range resolved but the forge returned no commits for it
    NoCommits { comparison: String },
}

impl fmt::Display for PreviewWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewWarning::InvalidNextVersion { next, baseline } => {
                write!(
                    f,
                    "Next version '{}' does not exceed baseline '{}', rendering changes only",
                    next, baseline
                )
            }
            PreviewWarning::NoCommits { comparison } => {
                write!(f, "No commits found for '{}'", comparison)
            }
        }
    }
}
