use crate::domain::release::Release;
use crate::error::{ChangelogError, Result};
use std::fmt;

/// Two endpoints (tag, branch or sha) between which commits are listed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub from: String,
    pub to: String,
}

impl Comparison {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Comparison {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}...{}", self.from, self.to)
    }
}

/// Resolve the comparison range from optional user hints.
///
/// `to` falls back to the default branch and `from` to the latest release's tag.
/// Refs are not validated here; the forge rejects unknown ones.
pub fn resolve(
    from_hint: Option<&str>,
    to_hint: Option<&str>,
    latest_release: Option<&Release>,
    default_branch: &str,
) -> Result<Comparison> {
    let to = to_hint.unwrap_or(default_branch);

    let from = match (from_hint, latest_release) {
        (Some(from), _) => from.to_string(),
        (None, Some(release)) => release.tag_name.clone(),
        (None, None) => return Err(ChangelogError::NoBaselineFound),
    };

    Ok(Comparison::new(from, to))
}
