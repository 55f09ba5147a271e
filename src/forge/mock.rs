use crate::domain::{Commit, Comparison, Release, Releases, Repository};
use crate::error::{ChangelogError, Result};
use crate::forge::Forge;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory forge for testing without network access
pub struct MockForge {
    repositories: HashMap<String, Repository>,
    releases: HashMap<String, Vec<Release>>,
    commits: HashMap<(String, String), Vec<Commit>>,
    requests: Mutex<Vec<String>>,
}

impl MockForge {
    /// Create a new empty mock forge
    pub fn new() -> Self {
        MockForge {
            repositories: HashMap::new(),
            releases: HashMap::new(),
            commits: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Register a repository under its `owner/name` identifier
    pub fn add_repository(&mut self, repository: Repository) {
        self.repositories
            .insert(repository.identifier(), repository);
    }

    /// Register releases for a repository, most recent first
    pub fn set_releases(&mut self, identifier: impl Into<String>, releases: Vec<Release>) {
        self.releases.insert(identifier.into(), releases);
    }

    /// Register the commits returned for a range of a repository
    pub fn set_commits(
        &mut self,
        identifier: impl Into<String>,
        comparison: &Comparison,
        commits: Vec<Commit>,
    ) {
        self.commits
            .insert((identifier.into(), comparison.to_string()), commits);
    }

    /// Requests made so far, e.g. `get_repository owner/name`
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn record(&self, request: String) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
    }
}

impl Default for MockForge {
    fn default() -> Self {
        Self::new()
    }
}

impl Forge for MockForge {
    fn get_repository(&self, identifier: &str) -> Result<Repository> {
        self.record(format!("get_repository {}", identifier));
        self.repositories
            .get(identifier)
            .cloned()
            .ok_or_else(|| ChangelogError::repository_not_found(identifier))
    }

    fn list_releases(&self, repository: &Repository) -> Result<Releases> {
        self.record(format!("list_releases {}", repository));
        Ok(Releases::new(
            self.releases
                .get(&repository.identifier())
                .cloned()
                .unwrap_or_default(),
        ))
    }

    fn get_commits(
        &self,
        repository: &Repository,
        comparison: &Comparison,
    ) -> Result<Vec<Commit>> {
        self.record(format!("get_commits {} {}", repository, comparison));
        self.commits
            .get(&(repository.identifier(), comparison.to_string()))
            .cloned()
            .ok_or_else(|| ChangelogError::invalid_range(format!("{} in {}", comparison, repository)))
    }
}
