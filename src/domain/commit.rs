use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Length of the abbreviated hash shown in release notes
const SHORT_SHA_LEN: usize = 7;

/// A commit or merged pull request between two revisions, as returned by the forge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub title: String,
    pub author: String,
    pub merged_at: DateTime<Utc>,
    #[serde(default)]
    pub labels: BTreeSet<String>,
    pub url: String,
}

impl Commit {
    /// Create a commit without labels or url
    pub fn new(
        sha: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        merged_at: DateTime<Utc>,
    ) -> Self {
        Commit {
            sha: sha.into(),
            title: title.into(),
            author: author.into(),
            merged_at,
            labels: BTreeSet::new(),
            url: String::new(),
        }
    }

    /// Add labels to the existing set
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Set the web url of the commit or pull request
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Abbreviated hash (first seven characters)
    pub fn short_sha(&self) -> &str {
        match self.sha.char_indices().nth(SHORT_SHA_LEN) {
            Some((idx, _)) => &self.sha[..idx],
            None => &self.sha,
        }
    }

    /// Check whether the commit carries a label
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }
}
