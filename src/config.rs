use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};

/// Environment variable consulted when no `--config` path is given.
pub const CONFIG_ENV_VAR: &str = "TPIE_RELEASE_CONFIG";

/// File name searched for in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "tpie-release.toml";

/// Represents the complete configuration for tpie-release.
///
/// Contains file locations, repository coordinates and the bot identity used
/// when committing the generated changelog.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub bot: BotConfig,
}

fn default_descriptor() -> PathBuf {
    PathBuf::from("TPie-Plus/TPie-Plus.csproj")
}

fn default_manifest() -> PathBuf {
    PathBuf::from("TPie-Plus/pluginmaster.json")
}

fn default_changelog() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

/// Locations of the three files the release steps read and rewrite.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathsConfig {
    #[serde(default = "default_descriptor")]
    pub descriptor: PathBuf,

    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    #[serde(default = "default_changelog")]
    pub changelog: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            descriptor: default_descriptor(),
            manifest: default_manifest(),
            changelog: default_changelog(),
        }
    }
}

fn default_owner() -> String {
    "k8thekat".to_string()
}

fn default_project() -> String {
    "TPie-Plus".to_string()
}

fn default_integration_branch() -> String {
    "development".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_download_link() -> String {
    "https://github.com/{owner}/{project}/releases/download/{version}/latest.zip".to_string()
}

/// Repository coordinates used for links and for the branch guard.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryConfig {
    #[serde(default = "default_owner")]
    pub owner: String,

    #[serde(default = "default_project")]
    pub project: String,

    /// The only branch changelog generation may run from.
    #[serde(default = "default_integration_branch")]
    pub integration_branch: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    /// Template with `{owner}`, `{project}` and `{version}` placeholders.
    #[serde(default = "default_download_link")]
    pub download_link: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            owner: default_owner(),
            project: default_project(),
            integration_branch: default_integration_branch(),
            remote: default_remote(),
            download_link: default_download_link(),
        }
    }
}

impl RepositoryConfig {
    /// Formats the release download link for `version`.
    pub fn download_link_for(&self, version: &str) -> String {
        self.download_link
            .replace("{owner}", &self.owner)
            .replace("{project}", &self.project)
            .replace("{version}", version)
    }

    /// Link to a commit page on the hosting service.
    pub fn commit_url(&self, hash: &str) -> String {
        format!(
            "https://github.com/{}/{}/commit/{}",
            self.owner, self.project, hash
        )
    }
}

fn default_bot_name() -> String {
    "github-actions[bot]".to_string()
}

fn default_bot_email() -> String {
    "68672235+github-actions[bot]@users.noreply.github.com".to_string()
}

/// Identity the changelog commit is authored under.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BotConfig {
    #[serde(default = "default_bot_name")]
    pub name: String,

    #[serde(default = "default_bot_email")]
    pub email: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            name: default_bot_name(),
            email: default_bot_email(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. Path named by the `TPIE_RELEASE_CONFIG` environment variable
/// 3. `tpie-release.toml` in current directory
/// 4. `.tpie-release.toml` in user config directory
/// 5. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        PathBuf::from(path)
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else {
        match dirs::config_dir().map(|dir| dir.join(format!(".{}", LOCAL_CONFIG_FILE))) {
            Some(path) if path.exists() => path,
            _ => {
                tracing::debug!("no configuration file found, using defaults");
                return Ok(Config::default());
            }
        }
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path)
        .map_err(|e| ReleaseError::config(format!("cannot read {}: {}", path.display(), e)))?;
    parse_config(&config_str)
}

/// Parses a TOML configuration document.
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| ReleaseError::config(e.to_string()))
}
