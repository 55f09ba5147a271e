//! Repository detection from the local git configuration.
//!
//! Only `<dir>/.git/config` is read; parent directories are not searched, so
//! running from a subdirectory of a checkout requires `--repository`.

use crate::error::{ChangelogError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Location of the git config relative to the working directory
pub const GIT_CONFIG_PATH: &str = ".git/config";

/// Path of the git config file for a working directory
pub fn git_config_path(dir: &Path) -> PathBuf {
    dir.join(GIT_CONFIG_PATH)
}

/// Detect the `owner/name` of the GitHub repository checked out in `dir`
pub fn detect_repository(dir: &Path) -> Result<String> {
    let config_path = git_config_path(dir);
    if !config_path.is_file() {
        return Err(ChangelogError::undetectable(format!(
            "no git config found at {}, use the --repository option",
            config_path.display()
        )));
    }
    parse_repository_from(&config_path)
}

/// Scan the remotes of a git config file, in file order, for a GitHub url.
pub fn parse_repository_from(config_path: &Path) -> Result<String> {
    let config = git2::Config::open(config_path).map_err(|e| {
        ChangelogError::undetectable(format!("cannot read {}: {}", config_path.display(), e))
    })?;

    let mut entries = config
        .entries(None)
        .map_err(|e| ChangelogError::undetectable(e.to_string()))?;

    while let Some(entry) = entries.next() {
        let entry = entry.map_err(|e| ChangelogError::undetectable(e.to_string()))?;
        let (Some(name), Some(value)) = (entry.name(), entry.value()) else {
            continue;
        };

        if !name.starts_with("remote.") || !name.ends_with(".url") {
            continue;
        }

        match github_identifier(value) {
            Some(identifier) => {
                tracing::debug!(remote = name, %identifier, "detected repository");
                return Ok(identifier);
            }
            None => tracing::debug!(remote = name, url = value, "not a GitHub remote"),
        }
    }

    Err(ChangelogError::undetectable(format!(
        "no GitHub remote url in {}",
        config_path.display()
    )))
}

/// Extract `owner/name` from a GitHub remote url (https or ssh form)
pub fn github_identifier(url: &str) -> Option<String> {
    let re = Regex::new(r"github\.com[:/]([\w-]+/[\w-]+)").ok()?;
    re.captures(url)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}
