//! GitHub implementation of the [Forge] trait
//!
//! Uses the GitHub REST API v3 with a blocking HTTP client. Requests are made
//! one after another; there is no retry logic.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, Response};
use reqwest::{header, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::Forge;
use crate::config::ForgeConfig;
use crate::domain::repository::split_identifier;
use crate::domain::{Commit, Comparison, Release, Releases, Repository};
use crate::error::{ChangelogError, Result};

/// Page size requested from list endpoints
const PER_PAGE: u32 = 100;

/// Repository as returned by `GET /repos/{owner}/{name}`
#[derive(Debug, Deserialize)]
struct GitHubRepo {
    name: String,
    owner: GitHubUser,
    #[serde(default)]
    default_branch: Option<String>,
    #[serde(default)]
    parent: Option<Box<GitHubRepo>>,
}

#[derive(Debug, Deserialize)]
struct GitHubUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GitHubRelease {
    tag_name: String,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct GitHubCompare {
    #[serde(default)]
    commits: Vec<GitHubCommit>,
}

#[derive(Debug, Deserialize)]
struct GitHubCommit {
    sha: String,
    #[serde(default)]
    html_url: String,
    commit: GitHubCommitDetail,
    #[serde(default)]
    author: Option<GitHubUser>,
}

#[derive(Debug, Deserialize)]
struct GitHubCommitDetail {
    message: String,
    #[serde(default)]
    author: Option<GitHubSignature>,
    #[serde(default)]
    committer: Option<GitHubSignature>,
}

#[derive(Debug, Deserialize)]
struct GitHubSignature {
    name: String,
    date: DateTime<Utc>,
}

/// Pull request as returned by `GET /repos/{o}/{n}/commits/{sha}/pulls`
#[derive(Debug, Deserialize)]
struct GitHubPull {
    number: u64,
    title: String,
    #[serde(default)]
    html_url: String,
    #[serde(default)]
    user: Option<GitHubUser>,
    #[serde(default)]
    labels: Vec<GitHubLabel>,
    #[serde(default)]
    merged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    merge_commit_sha: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubLabel {
    name: String,
}

/// Blocking GitHub REST client
pub struct GitHubForge {
    client: Client,
    api_url: Url,
}

impl GitHubForge {
    /// Create a client from forge settings, reading the token from the configured env var
    pub fn new(config: &ForgeConfig) -> Result<Self> {
        Self::with_token(config, config.token())
    }

    /// Create a client with an explicit token (or none for anonymous access)
    pub fn with_token(config: &ForgeConfig, token: Option<String>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        if let Some(token) = token {
            let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ChangelogError::config(format!("Invalid API token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        } else {
            tracing::debug!("no API token configured, using anonymous access");
        }

        let api_url = Url::parse(&config.api_url).map_err(|e| {
            ChangelogError::config(format!("Invalid API url '{}': {}", config.api_url, e))
        })?;
        if api_url.cannot_be_a_base() {
            return Err(ChangelogError::config(format!(
                "Invalid API url '{}'",
                config.api_url
            )));
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(GitHubForge { client, api_url })
    }

    /// Append percent-encoded path segments to the API base url
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| ChangelogError::config(format!("Invalid API url '{}'", self.api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get(&self, url: Url) -> Result<Response> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url.clone()).send()?;
        tracing::trace!(status = %response.status(), %url, "response");
        Ok(response)
    }

    fn pulls_for_commit(&self, repository: &Repository, sha: &str) -> Result<Vec<GitHubPull>> {
        let url = self.endpoint([
            "repos",
            repository.owner.as_str(),
            repository.name.as_str(),
            "commits",
            sha,
            "pulls",
        ])?;
        let response = ensure_success(self.get(url)?)?;
        parse_json(response)
    }
}

impl Forge for GitHubForge {
    fn get_repository(&self, identifier: &str) -> Result<Repository> {
        let (owner, name) = split_identifier(identifier)
            .ok_or_else(|| ChangelogError::repository_not_found(identifier))?;
        let url = self.endpoint(["repos", owner, name])?;

        let response = self.get(url)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ChangelogError::repository_not_found(identifier));
        }

        let gh_repo: GitHubRepo = parse_json(ensure_success(response)?)?;
        Ok(to_repository(gh_repo))
    }

    fn list_releases(&self, repository: &Repository) -> Result<Releases> {
        let mut url = self.endpoint([
            "repos",
            repository.owner.as_str(),
            repository.name.as_str(),
            "releases",
        ])?;
        url.query_pairs_mut()
            .append_pair("per_page", &PER_PAGE.to_string());
        let response = ensure_success(self.get(url)?)?;
        let gh_releases: Vec<GitHubRelease> = parse_json(response)?;
        Ok(to_releases(gh_releases))
    }

    fn get_commits(
        &self,
        repository: &Repository,
        comparison: &Comparison,
    ) -> Result<Vec<Commit>> {
        // slashes in refs stay path separators, everything else is encoded
        let range = comparison.to_string();
        let mut url = self.endpoint(
            ["repos", repository.owner.as_str(), repository.name.as_str(), "compare"]
                .into_iter()
                .chain(range.split('/')),
        )?;
        url.query_pairs_mut()
            .append_pair("per_page", &PER_PAGE.to_string());

        let mut compare_commits = Vec::new();
        let mut next = Some(url);
        while let Some(url) = next {
            let response = self.get(url)?;
            if matches!(
                response.status(),
                StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY
            ) {
                return Err(ChangelogError::invalid_range(format!(
                    "{} in {}",
                    comparison, repository
                )));
            }
            let response = ensure_success(response)?;
            next = parse_next_link(&response)
                .map(|link| Url::parse(&link))
                .transpose()
                .map_err(|e| ChangelogError::forge(format!("Invalid pagination link: {}", e)))?;
            let page: GitHubCompare = parse_json(response)?;
            compare_commits.extend(page.commits);
        }

        tracing::info!(
            count = compare_commits.len(),
            %comparison,
            "fetched commits, resolving pull requests"
        );

        collect_commits(compare_commits, |sha| {
            self.pulls_for_commit(repository, sha)
        })
    }
}

/// Turn a non-success response into a forge error carrying status and body
fn ensure_success(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().unwrap_or_default();
    Err(ChangelogError::forge(format!(
        "GitHub API error {}: {}",
        status,
        body.trim()
    )))
}

fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json()
        .map_err(|e| ChangelogError::forge(format!("Failed to parse response: {}", e)))
}

/// Extract the `rel="next"` URL from GitHub's Link header
fn parse_next_link(response: &Response) -> Option<String> {
    let link_header = response.headers().get(header::LINK)?.to_str().ok()?;
    next_link(link_header)
}

fn next_link(link_header: &str) -> Option<String> {
    link_header
        .split(',')
        .find(|part| part.contains("rel=\"next\""))
        .and_then(|part| part.split(';').next())
        .map(|url| {
            url.trim()
                .trim_start_matches('<')
                .trim_end_matches('>')
                .to_string()
        })
}

/// Map the API repository; the parent is taken one level deep only
fn to_repository(gh_repo: GitHubRepo) -> Repository {
    let parent = gh_repo.parent.map(|parent| {
        let branch = parent.default_branch.unwrap_or_else(|| "main".to_string());
        Repository::new(parent.owner.login, parent.name, branch)
    });
    let branch = gh_repo.default_branch.unwrap_or_else(|| "main".to_string());
    let repository = Repository::new(gh_repo.owner.login, gh_repo.name, branch);

    match parent {
        Some(parent) => repository.with_parent(parent),
        None => repository,
    }
}

fn to_releases(gh_releases: Vec<GitHubRelease>) -> Releases {
    let releases = gh_releases
        .into_iter()
        .filter(|release| !release.draft)
        .filter_map(|gh_release| match Release::from_tag(&gh_release.tag_name) {
            Ok(release) => Some(match gh_release.published_at {
                Some(published_at) => release.with_published_at(published_at),
                None => release,
            }),
            Err(e) => {
                tracing::debug!(tag = %gh_release.tag_name, error = %e, "skipping release");
                None
            }
        })
        .collect();
    Releases::new(releases)
}

/// Build the changelog entries for a range.
///
/// Each commit is replaced by the merged pull request it belongs to; a pull
/// request is reported once however many of its commits are in the range.
fn collect_commits<F>(compare_commits: Vec<GitHubCommit>, mut pulls_for: F) -> Result<Vec<Commit>>
where
    F: FnMut(&str) -> Result<Vec<GitHubPull>>,
{
    let mut seen_pulls = HashSet::new();
    let mut commits = Vec::new();

    for gh_commit in compare_commits {
        let merged_pull = pulls_for(&gh_commit.sha)?
            .into_iter()
            .find(|pull| pull.merged_at.is_some());

        match merged_pull {
            Some(pull) => {
                if seen_pulls.insert(pull.number) {
                    commits.push(pull_to_commit(pull, &gh_commit.sha));
                }
            }
            None => commits.push(commit_to_commit(gh_commit)),
        }
    }

    Ok(commits)
}

fn pull_to_commit(pull: GitHubPull, fallback_sha: &str) -> Commit {
    let sha = pull
        .merge_commit_sha
        .unwrap_or_else(|| fallback_sha.to_string());
    let author = pull
        .user
        .map(|user| user.login)
        .unwrap_or_else(|| "ghost".to_string());
    let merged_at = pull.merged_at.unwrap_or_else(Utc::now);

    Commit::new(sha, pull.title, author, merged_at)
        .with_labels(pull.labels.into_iter().map(|label| label.name))
        .with_url(pull.html_url)
}

fn commit_to_commit(gh_commit: GitHubCommit) -> Commit {
    let detail = gh_commit.commit;
    let title = detail.message.lines().next().unwrap_or_default().to_string();
    let signature = detail.committer.or(detail.author);
    let merged_at = signature
        .as_ref()
        .map(|signature| signature.date)
        .unwrap_or_else(Utc::now);
    let author = match (gh_commit.author, signature) {
        (Some(user), _) => user.login,
        (None, Some(signature)) => signature.name,
        (None, None) => "ghost".to_string(),
    };

    Commit::new(gh_commit.sha, title, author, merged_at).with_url(gh_commit.html_url)
}
