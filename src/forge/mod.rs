//! Forge access abstraction layer
//!
//! This module provides a trait-based abstraction over the code forge API,
//! allowing the preview pipeline to run against the real service or an
//! in-memory double.
//!
//! # Overview
//!
//! The primary abstraction is the [Forge] trait. The concrete implementations are:
//!
//! - [github::GitHubForge]: blocking client for the GitHub REST API
//! - [mock::MockForge]: in-memory implementation for testing
//!
//! Code that needs forge data should take a `&dyn Forge` (or a generic `F: Forge`)
//! rather than constructing a client itself.
//!
//! ```rust
//! # use changelog_preview::forge::Forge;
//! # use changelog_preview::domain::comparison;
//! # fn example(forge: &dyn Forge) -> changelog_preview::Result<()> {
//! let repository = forge.get_repository("zenstruck/changelog")?;
//! let releases = forge.list_releases(&repository)?;
//! let range = comparison::resolve(None, None, releases.latest(), &repository.default_branch)?;
//! let commits = forge.get_commits(&repository, &range)?;
//! # Ok(())
//! # }
//! ```

pub mod github;
pub mod mock;

pub use github::GitHubForge;
pub use mock::MockForge;

use crate::domain::{Commit, Comparison, Releases, Repository};
use crate::error::Result;

/// Read-only forge operations needed to build a changelog
///
/// ## Error Handling
///
/// Implementations map transport failures to [crate::error::ChangelogError::Forge]
/// and use the specific variants below for conditions the pipeline reports.
pub trait Forge: Send + Sync {
    /// Fetch a repository by its `owner/name` identifier
    ///
    /// # Returns
    /// * `Ok(Repository)` - Repository metadata, with its parent when it is a fork
    /// * `Err(RepositoryNotFound)` - If the forge has no such repository
    fn get_repository(&self, identifier: &str) -> Result<Repository>;

    /// List published releases, most recent first
    ///
    /// Drafts and releases whose tag is not a semantic version are left out.
    fn list_releases(&self, repository: &Repository) -> Result<Releases>;

    /// Fetch the commits (merged pull requests where available) in a range
    ///
    /// # Returns
    /// * `Ok(Vec<Commit>)` - Commits in forge order
    /// * `Err(InvalidComparisonRange)` - If either ref is unknown or the range is rejected
    fn get_commits(&self, repository: &Repository, comparison: &Comparison)
        -> Result<Vec<Commit>>;
}
