use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::host::{SessionHost, TabId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabAssignment {
    pub tab: TabId,
    pub workspace: String,
}

/// Tabs plus their workspace assignments, kept between CLI runs.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub host: SessionHost,
    #[serde(default)]
    pub assignments: Vec<TabAssignment>,
}

pub fn session_path(profile_dir: &Path) -> PathBuf {
    profile_dir.join("session.json")
}

impl Session {
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), error = %err, "failed to parse session file");
                Self::default()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Self::default(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read session file");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create session dir: {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(self).context("failed to serialize session")?;
        fs::write(path, serialized)
            .with_context(|| format!("failed to write session file: {}", path.display()))
    }

    pub fn from_parts(host: SessionHost, assignments: BTreeMap<TabId, String>) -> Self {
        Self {
            host,
            assignments: assignments
                .into_iter()
                .map(|(tab, workspace)| TabAssignment { tab, workspace })
                .collect(),
        }
    }

    pub fn into_parts(self) -> (SessionHost, Vec<(TabId, String)>) {
        let assignments = self
            .assignments
            .into_iter()
            .map(|a| (a.tab, a.workspace))
            .collect();
        (self.host, assignments)
    }
}
