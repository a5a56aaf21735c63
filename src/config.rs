use crate::error::Result;
use crate::version::VersionScheme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILE: &str = "release-notes.toml";

/// Represents the complete configuration for release-notes.
///
/// Contains GitHub access settings, release defaults, the change classification
/// mode and the optional Jira connection.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub github: GithubConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub classification: ClassificationConfig,

    #[serde(default)]
    pub jira: Option<JiraConfig>,
}

/// Returns the default access token cache file name.
fn default_token_file() -> String {
    ".access_token".to_string()
}

/// GitHub connection settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GithubConfig {
    /// API root for GitHub Enterprise; unset means api.github.com
    #[serde(default)]
    pub api_url: Option<String>,

    #[serde(default = "default_token_file")]
    pub token_file: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig {
            api_url: None,
            token_file: default_token_file(),
        }
    }
}

fn default_depth() -> usize {
    1
}

fn default_draft() -> bool {
    true
}

/// Defaults for the release being built.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Branch to release from; unset means the current local branch, then `master`
    #[serde(default)]
    pub target_branch: Option<String>,

    #[serde(default)]
    pub version_scheme: VersionScheme,

    /// How many merge levels to descend into when collecting commits
    #[serde(default = "default_depth")]
    pub depth: usize,

    #[serde(default = "default_draft")]
    pub draft: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            target_branch: None,
            version_scheme: VersionScheme::default(),
            depth: default_depth(),
            draft: default_draft(),
        }
    }
}

/// How changes get their types.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationMode {
    /// Ask for every change
    #[default]
    Prompt,
    /// Keep only pull requests and ask for each of them
    PullRequest,
    /// Keep every change at the default type
    Default,
    /// Derive types from the Jira issues a change mentions
    Jira,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ClassificationConfig {
    #[serde(default)]
    pub mode: ClassificationMode,
}

fn default_jira_token_env() -> String {
    "JIRA_TOKEN".to_string()
}

fn default_issue_pattern() -> String {
    "[A-Z][A-Z0-9]+-[0-9]+".to_string()
}

/// Jira connection used by the `jira` classification mode.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JiraConfig {
    pub url: String,

    #[serde(default)]
    pub username: Option<String>,

    /// Environment variable holding the API token
    #[serde(default = "default_jira_token_env")]
    pub token_env: String,

    /// Regex matching issue keys in change summaries
    #[serde(default = "default_issue_pattern")]
    pub pattern: String,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-notes.toml` in current directory
/// 3. `release-notes.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE).exists() {
        fs::read_to_string(CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.github.token_file, ".access_token");
        assert_eq!(config.github.api_url, None);
        assert_eq!(config.release.depth, 1);
        assert!(config.release.draft);
        assert_eq!(config.release.version_scheme, VersionScheme::Semantic);
        assert_eq!(config.classification.mode, ClassificationMode::Prompt);
        assert!(config.jira.is_none());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_classification_modes() {
        let cases = vec![
            ("prompt", ClassificationMode::Prompt),
            ("pull-request", ClassificationMode::PullRequest),
            ("default", ClassificationMode::Default),
            ("jira", ClassificationMode::Jira),
        ];

        for (text, expected) in cases {
            let config: Config =
                toml::from_str(&format!("[classification]\nmode = \"{}\"", text)).unwrap();
            assert_eq!(config.classification.mode, expected);
        }
    }

    #[test]
    fn test_unknown_mode_is_error() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[classification]\nmode = \"guess\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_jira_defaults() {
        let config: Config = toml::from_str("[jira]\nurl = \"https://jira.example.com\"").unwrap();
        let jira = config.jira.unwrap();
        assert_eq!(jira.token_env, "JIRA_TOKEN");
        assert_eq!(jira.pattern, "[A-Z][A-Z0-9]+-[0-9]+");
        assert_eq!(jira.username, None);
    }
}
