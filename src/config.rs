use crate::domain::version::{ChangeKind, BUMP_ALIASES};
use crate::error::{ChangelogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "changelog.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".changelog.toml";

/// Represents the complete configuration for changelog-preview.
///
/// Contains the classification tables and the forge connection settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub forge: ForgeConfig,
}

/// Returns the default label table.
fn default_labels() -> HashMap<String, ChangeKind> {
    let mut map = HashMap::new();
    map.insert("breaking-change".to_string(), ChangeKind::Major);
    map.insert("BC".to_string(), ChangeKind::Major);
    map.insert("enhancement".to_string(), ChangeKind::Minor);
    map.insert("feature".to_string(), ChangeKind::Minor);
    map.insert("bug".to_string(), ChangeKind::Patch);
    map
}

/// Returns the default title keyword table (the bump alias table).
fn default_keywords() -> HashMap<String, ChangeKind> {
    BUMP_ALIASES
        .iter()
        .map(|(alias, kind)| (alias.to_string(), *kind))
        .collect()
}

/// Tables used to classify commits.
///
/// Labels are matched exactly; keywords are matched case-insensitively against
/// the words of a commit title.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ClassifierConfig {
    #[serde(default = "default_labels")]
    pub labels: HashMap<String, ChangeKind>,

    #[serde(default = "default_keywords")]
    pub keywords: HashMap<String, ChangeKind>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            labels: default_labels(),
            keywords: default_keywords(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

fn default_user_agent() -> String {
    format!("changelog-preview/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

/// Connection settings for the forge API.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ForgeConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Environment variable holding the API token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        ForgeConfig {
            api_url: default_api_url(),
            token_env: default_token_env(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ForgeConfig {
    /// Read the API token from the configured environment variable, ignoring blank values
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `changelog.toml` in current directory
/// 3. `.changelog.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    if let Some(path) = config_path {
        return parse_config_file(Path::new(path));
    }

    let local = Path::new(LOCAL_CONFIG_FILE);
    if local.exists() {
        return parse_config_file(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(USER_CONFIG_FILE);
        if user_config.exists() {
            return parse_config_file(&user_config);
        }
    }

    Ok(Config::default())
}

fn parse_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), "loading configuration");
    parse_config(&content)
        .map_err(|e| ChangelogError::config(format!("{}: {}", path.display(), e)))
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| ChangelogError::config(e.to_string()))
}
