//! Process-wide configuration for the mulled tools
//!
//! Registry endpoints, repository names and filesystem roots are supplied
//! here at startup instead of being hardcoded at call sites.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub quay: QuayConfig,

    #[serde(default)]
    pub conda: CondaConfig,

    #[serde(default)]
    pub anaconda: AnacondaConfig,

    #[serde(default)]
    pub github: GithubConfig,

    #[serde(default)]
    pub singularity: SingularityConfig,

    #[serde(default)]
    pub recipes: RecipesConfig,

    #[serde(default)]
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuayConfig {
    #[serde(default = "default_quay_api_url")]
    pub api_url: String,

    /// Host containers are pulled from, as used in `docker pull` lines.
    #[serde(default = "default_pull_host")]
    pub pull_host: String,

    #[serde(default = "default_organization")]
    pub organization: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CondaConfig {
    #[serde(default = "default_channel")]
    pub channel: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnacondaConfig {
    #[serde(default = "default_anaconda_url")]
    pub url: String,

    #[serde(default = "default_platform")]
    pub platform: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "default_github_api_url")]
    pub api_url: String,

    #[serde(default = "default_github_raw_url")]
    pub raw_url: String,

    #[serde(default = "default_recipes_repo")]
    pub recipes_repo: String,

    #[serde(default = "default_combinations_repo")]
    pub combinations_repo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingularityConfig {
    #[serde(default = "default_depot_url")]
    pub depot_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipesConfig {
    /// Local checkout of the recipes repository; when absent, recipes are
    /// fetched from GitHub.
    #[serde(default)]
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_docker_bin")]
    pub docker_bin: String,

    #[serde(default = "default_singularity_bin")]
    pub singularity_bin: String,

    #[serde(default = "default_conda_bin")]
    pub conda_bin: String,
}

impl Default for QuayConfig {
    fn default() -> Self {
        Self {
            api_url: default_quay_api_url(),
            pull_host: default_pull_host(),
            organization: default_organization(),
        }
    }
}

impl Default for CondaConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
        }
    }
}

impl Default for AnacondaConfig {
    fn default() -> Self {
        Self {
            url: default_anaconda_url(),
            platform: default_platform(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_github_api_url(),
            raw_url: default_github_raw_url(),
            recipes_repo: default_recipes_repo(),
            combinations_repo: default_combinations_repo(),
        }
    }
}

impl Default for SingularityConfig {
    fn default() -> Self {
        Self {
            depot_url: default_depot_url(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            docker_bin: default_docker_bin(),
            singularity_bin: default_singularity_bin(),
            conda_bin: default_conda_bin(),
        }
    }
}

fn default_quay_api_url() -> String {
    "https://quay.io/api/v1/repository".to_string()
}

fn default_pull_host() -> String {
    "quay.io".to_string()
}

fn default_organization() -> String {
    "biocontainers".to_string()
}

fn default_channel() -> String {
    "bioconda".to_string()
}

fn default_anaconda_url() -> String {
    "https://anaconda.org".to_string()
}

fn default_platform() -> String {
    "linux-64".to_string()
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_github_raw_url() -> String {
    "https://raw.githubusercontent.com".to_string()
}

fn default_recipes_repo() -> String {
    "bioconda/bioconda-recipes".to_string()
}

fn default_combinations_repo() -> String {
    "BioContainers/multi-package-containers".to_string()
}

fn default_depot_url() -> String {
    "https://depot.galaxyproject.org/singularity/".to_string()
}

fn default_docker_bin() -> String {
    "docker".to_string()
}

fn default_singularity_bin() -> String {
    "singularity".to_string()
}

fn default_conda_bin() -> String {
    "conda".to_string()
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("org", "mulled", "mulled") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.mulled/config.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.quay.organization, "biocontainers");
        assert_eq!(config.conda.channel, "bioconda");
        assert_eq!(config.anaconda.platform, "linux-64");
        assert_eq!(config.github.recipes_repo, "bioconda/bioconda-recipes");
        assert!(config.recipes.local_path.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.quay.api_url, config.quay.api_url);
        assert_eq!(parsed.singularity.depot_url, config.singularity.depot_url);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Config = toml::from_str("[conda]\nchannel = \"conda-forge\"\n").unwrap();
        assert_eq!(parsed.conda.channel, "conda-forge");
        assert_eq!(parsed.quay.organization, "biocontainers");
    }
}
