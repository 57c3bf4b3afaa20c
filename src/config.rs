use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_HOMEPAGE: &str = "about:home";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_homepage")]
    pub homepage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_dir: Option<PathBuf>,
}

fn default_enabled() -> bool {
    true
}

fn default_homepage() -> String {
    DEFAULT_HOMEPAGE.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            homepage: default_homepage(),
            profile_dir: None,
        }
    }
}

impl AppConfig {
    /// Load config from path. If the file is missing or empty, write and return the defaults.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file: {}", path.display()))?;
            if raw.trim().is_empty() {
                return Self::write_default(path);
            }
            let cfg: Self = toml::from_str(&raw)
                .with_context(|| format!("failed to parse config file: {}", path.display()))?;
            return Ok(cfg);
        }

        Self::write_default(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config dir: {}", parent.display()))?;
        }
        let serialized = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(path, serialized)
            .with_context(|| format!("failed to write config file: {}", path.display()))
    }

    pub fn profile_dir(&self) -> PathBuf {
        self.profile_dir.clone().unwrap_or_else(default_profile_dir)
    }

    pub fn store_path(&self) -> PathBuf {
        self.profile_dir()
            .join("workspaces")
            .join("Workspaces.json")
    }

    fn write_default(path: &Path) -> Result<Self> {
        let cfg = Self::default();
        cfg.save(path)?;
        Ok(cfg)
    }
}

fn config_home() -> PathBuf {
    let home = std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    home.join(".config").join("tabspaces")
}

pub fn default_config_path() -> PathBuf {
    config_home().join("tabspaces.toml")
}

fn default_profile_dir() -> PathBuf {
    config_home().join("profile")
}
