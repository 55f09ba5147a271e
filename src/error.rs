use thiserror::Error;

/// Unified error type for changelog preview operations
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Version parsing error: {0}")]
    Parse(String),

    #[error("Unknown bump kind '{0}': use major (maj), minor (min, feature, feat) or patch (bug, bugfix)")]
    UnknownBumpKind(String),

    #[error("No release found to start the changelog from, use the --from option")]
    NoBaselineFound,

    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),

    #[error("Invalid comparison range: {0}")]
    InvalidComparisonRange(String),

    #[error("Unable to detect repository: {0}")]
    RepositoryUndetectable(String),

    #[error("Forge request failed: {0}")]
    Forge(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in changelog-preview
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create a version parsing error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        ChangelogError::Parse(msg.into())
    }

    /// Create an unknown bump kind error for the given hint
    pub fn unknown_bump_kind(hint: impl Into<String>) -> Self {
        ChangelogError::UnknownBumpKind(hint.into())
    }

    /// Create a repository-not-found error for the given identifier
    pub fn repository_not_found(identifier: impl Into<String>) -> Self {
        ChangelogError::RepositoryNotFound(identifier.into())
    }

    /// Create an invalid comparison range error with context
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        ChangelogError::InvalidComparisonRange(msg.into())
    }

    /// Create a repository detection error with context
    pub fn undetectable(msg: impl Into<String>) -> Self {
        ChangelogError::RepositoryUndetectable(msg.into())
    }

    /// Create a forge transport error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        ChangelogError::Forge(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogError::Config(msg.into())
    }
}

impl From<reqwest::Error> for ChangelogError {
    fn from(err: reqwest::Error) -> Self {
        ChangelogError::Forge(err.to_string())
    }
}
