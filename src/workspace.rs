use std::collections::HashSet;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_WORKSPACE_NAME: &str = "Default Workspace";
pub const NEW_WORKSPACE_NAME: &str = "New Workspace";

/// Icons offered when creating a workspace.
pub const ICON_CHOICES: [&str; 7] = ["🏠", "📄", "💹", "💼", "📧", "✅", "👥"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub uuid: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub used: bool,
}

/// The persisted document: `{ "workspaces": [...] }`. Order is display order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSet {
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextActions {
    pub can_open: bool,
    pub can_delete: bool,
    pub can_set_default: bool,
}

impl Workspace {
    pub fn new(name: &str, icon: Option<String>, is_default: bool) -> Self {
        Self {
            uuid: Uuid::new_v4().to_string(),
            name: name.to_string(),
            icon: icon.filter(|i| !i.is_empty()),
            default: is_default,
            used: false,
        }
    }

    pub fn has_icon(&self) -> bool {
        self.icon.as_deref().is_some_and(|i| !i.is_empty())
    }

    /// The icon, or the uppercased first character of the name when none is set.
    pub fn display_icon(&self) -> String {
        if let Some(icon) = self.icon.as_deref().filter(|i| !i.is_empty()) {
            return icon.to_string();
        }
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

impl WorkspaceSet {
    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    pub fn get(&self, uuid: &str) -> Option<&Workspace> {
        self.workspaces.iter().find(|w| w.uuid == uuid)
    }

    pub fn contains(&self, uuid: &str) -> bool {
        self.get(uuid).is_some()
    }

    pub fn active(&self) -> Option<&Workspace> {
        self.workspaces.iter().find(|w| w.used)
    }

    pub fn default_workspace(&self) -> Option<&Workspace> {
        self.workspaces.iter().find(|w| w.default)
    }

    /// Marks `uuid` as the only used entry. Walks the whole set so that an
    /// inconsistent prior state (several used entries) is repaired.
    pub fn mark_used(&mut self, uuid: &str) {
        for ws in self.workspaces.iter_mut() {
            ws.used = ws.uuid == uuid;
        }
    }

    pub fn mark_default(&mut self, uuid: &str) {
        for ws in self.workspaces.iter_mut() {
            ws.default = ws.uuid == uuid;
        }
    }

    /// Workspace that follows the active one, wrapping to the first entry.
    pub fn next_after_active(&self) -> Option<&Workspace> {
        let next_idx = self
            .workspaces
            .iter()
            .position(|w| w.used)
            .map_or(0, |idx| idx + 1);
        self.workspaces
            .get(next_idx)
            .or_else(|| self.workspaces.first())
    }

    /// Where to go when `removed` is deleted. Deleting a background workspace
    /// keeps the active one; deleting the active one goes to the default
    /// workspace if it is a different one, else the first remaining entry.
    pub fn fallback_for(&self, removed: &str) -> Option<&Workspace> {
        self.active()
            .filter(|w| w.uuid != removed)
            .or_else(|| self.default_workspace().filter(|w| w.uuid != removed))
            .or_else(|| self.workspaces.iter().find(|w| w.uuid != removed))
    }

    /// Startup pick: default, else used, else first.
    pub fn startup_choice(&self) -> Option<&Workspace> {
        self.default_workspace()
            .or_else(|| self.active())
            .or_else(|| self.workspaces.first())
    }

    pub fn context_actions(&self, uuid: &str) -> Option<ContextActions> {
        let ws = self.get(uuid)?;
        Some(ContextActions {
            can_open: !ws.used,
            can_delete: self.workspaces.len() > 1 && !ws.default,
            can_set_default: !ws.default,
        })
    }

    pub fn check_invariants(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for ws in &self.workspaces {
            if !seen.insert(ws.uuid.as_str()) {
                bail!("duplicate workspace uuid: {}", ws.uuid);
            }
        }

        let defaults = self.workspaces.iter().filter(|w| w.default).count();
        if defaults > 1 {
            bail!("{defaults} workspaces are flagged default");
        }

        let used = self.workspaces.iter().filter(|w| w.used).count();
        if !self.workspaces.is_empty() && used != 1 {
            bail!("expected exactly one active workspace, found {used}");
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample(uuid: &str, name: &str) -> Workspace {
    Workspace {
        uuid: uuid.to_string(),
        name: name.to_string(),
        icon: None,
        default: false,
        used: false,
    }
}
