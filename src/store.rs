use anyhow::{Context, Result};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::workspace::{Workspace, WorkspaceSet};

/// JSON-backed workspace list. The file is the source of truth; `cache`
/// mirrors it and is dropped after every write.
#[derive(Debug)]
pub struct WorkspaceStore {
    path: PathBuf,
    cache: Option<WorkspaceSet>,
}

impl WorkspaceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an empty `{}` document if the file does not exist yet.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        tracing::debug!(path = %self.path.display(), "creating empty workspace store");
        self.ensure_parent()?;
        fs::write(&self.path, "{}")
            .with_context(|| format!("failed to create workspace store: {}", self.path.display()))
    }

    /// Never fails: a missing or unreadable document is an empty set.
    pub fn load(&mut self) -> WorkspaceSet {
        if let Some(cached) = &self.cache {
            return cached.clone();
        }
        let set = self.read_from_disk();
        self.cache = Some(set.clone());
        set
    }

    pub fn append(&mut self, workspace: Workspace) -> Result<()> {
        let mut set = self.read_from_disk();
        tracing::info!(uuid = %workspace.uuid, name = %workspace.name, "saving workspace");
        set.workspaces.push(workspace);
        self.write(&set)
    }

    pub fn replace(&mut self, set: &WorkspaceSet) -> Result<()> {
        self.write(set)
    }

    pub fn remove(&mut self, uuid: &str) -> Result<()> {
        let mut set = self.read_from_disk();
        tracing::info!(uuid, "removing workspace");
        set.workspaces.retain(|w| w.uuid != uuid);
        self.write(&set)
    }

    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    fn read_from_disk(&self) -> WorkspaceSet {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => WorkspaceSet::default(),
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to parse workspace store, treating as empty"
                );
                WorkspaceSet::default()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => WorkspaceSet::default(),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to read workspace store, treating as empty"
                );
                WorkspaceSet::default()
            }
        }
    }

    fn write(&mut self, set: &WorkspaceSet) -> Result<()> {
        // Invalidate up front so a failed write leaves the next load() hitting disk.
        self.invalidate();
        self.ensure_parent()?;
        let serialized =
            serde_json::to_string_pretty(set).context("failed to serialize workspaces")?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("failed to write workspace store: {}", self.path.display()))
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create store dir: {}", parent.display()))?;
        }
        Ok(())
    }
}
