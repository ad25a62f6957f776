use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(s) = path.to_str() {
        if let Some(stripped) = s.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if s == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

/// Configuration for codex-vcs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaygroundConfig {
    /// Location of the user store (users.json)
    pub store_path: PathBuf,
    /// Host used to expand `owner/repo` remote shorthand
    #[serde(default = "defaults::default_remote_host")]
    pub remote_host: String,
}

impl PlaygroundConfig {
    /// Load configuration from the config file, falling back to
    /// defaults when none exists, with environment-variable overrides.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        tracing::debug!("loading codex-vcs config from {:?}", config_path);
        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default_config()?
        };

        if let Ok(path) = env::var("CODEX_VCS_STORE") {
            config.store_path = expand_tilde(&PathBuf::from(path));
        }

        if let Ok(host) = env::var("CODEX_VCS_REMOTE_HOST") {
            config.remote_host = host;
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let mut config: PlaygroundConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config.store_path = expand_tilde(&config.store_path);

        Ok(config)
    }

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    /// Get default config file path
    pub fn config_file_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".config/codex-vcs/config.yaml"))
            .context("Could not determine home directory for config file")
    }

    fn default_config() -> Result<Self> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(PlaygroundConfig {
            store_path: home.join(".local/share/codex-vcs/users.json"),
            remote_host: defaults::default_remote_host(),
        })
    }
}

mod defaults {
    pub(crate) fn default_remote_host() -> String {
        "github.com".to_string()
    }
}
