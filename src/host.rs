use std::fmt;

use serde::{Deserialize, Serialize};

use crate::workspace::{Workspace, WorkspaceSet};

/// Opaque handle to a tab owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the workspaces panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelEntry {
    pub uuid: String,
    pub name: String,
    pub icon: String,
    pub has_icon: bool,
}

/// What the host shows for the workspaces button and panel.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WorkspacePanel {
    pub current: Option<PanelEntry>,
    pub others: Vec<PanelEntry>,
}

impl PanelEntry {
    fn from_workspace(ws: &Workspace) -> Self {
        Self {
            uuid: ws.uuid.clone(),
            name: ws.name.clone(),
            icon: ws.display_icon(),
            has_icon: ws.has_icon(),
        }
    }
}

impl WorkspacePanel {
    pub fn from_set(set: &WorkspaceSet) -> Self {
        Self {
            current: set.active().map(PanelEntry::from_workspace),
            others: set
                .workspaces
                .iter()
                .filter(|w| !w.used)
                .map(PanelEntry::from_workspace)
                .collect(),
        }
    }

    /// True when there is nothing to switch to.
    pub fn is_empty(&self) -> bool {
        self.others.is_empty()
    }
}

/// The browser side of tab management. The switcher only changes tab
/// visibility through these calls.
pub trait TabHost {
    fn tabs(&self) -> Vec<TabId>;
    fn is_pinned(&self, tab: TabId) -> bool;
    fn is_hidden(&self, tab: TabId) -> bool;
    /// Opens a tab at `url` and makes it the selected tab.
    fn create(&mut self, url: &str) -> TabId;
    fn show(&mut self, tab: TabId);
    fn hide(&mut self, tab: TabId);
    fn remove(&mut self, tab: TabId);
    fn select(&mut self, tab: TabId);
    /// Root scope attribute used for per-workspace styling.
    fn set_root_workspace(&mut self, uuid: Option<&str>);
    fn workspaces_changed(&mut self, _panel: &WorkspacePanel) {}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRecord {
    pub id: TabId,
    pub url: String,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub hidden: bool,
}

/// In-memory tab strip that round-trips through the session file.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SessionHost {
    #[serde(default)]
    pub tabs: Vec<TabRecord>,
    #[serde(default)]
    pub selected: Option<TabId>,
    #[serde(default)]
    pub root_workspace: Option<String>,
    #[serde(default)]
    next_id: u64,
    #[serde(skip)]
    panel: Option<WorkspacePanel>,
}

impl SessionHost {
    pub fn tab(&self, tab: TabId) -> Option<&TabRecord> {
        self.tabs.iter().find(|t| t.id == tab)
    }

    pub fn set_pinned(&mut self, tab: TabId, pinned: bool) {
        if let Some(record) = self.tab_mut(tab) {
            record.pinned = pinned;
            if pinned {
                record.hidden = false;
            }
        }
    }

    pub fn navigate(&mut self, tab: TabId, url: &str) {
        if let Some(record) = self.tab_mut(tab) {
            record.url = url.to_string();
        }
    }

    pub fn visible_tabs(&self) -> Vec<TabId> {
        self.tabs.iter().filter(|t| !t.hidden).map(|t| t.id).collect()
    }

    /// Last panel pushed by the switcher in this process.
    pub fn panel(&self) -> Option<&WorkspacePanel> {
        self.panel.as_ref()
    }

    fn tab_mut(&mut self, tab: TabId) -> Option<&mut TabRecord> {
        self.tabs.iter_mut().find(|t| t.id == tab)
    }

    fn allocate_id(&mut self) -> TabId {
        let used_max = self.tabs.iter().map(|t| t.id.0 + 1).max().unwrap_or(0);
        self.next_id = self.next_id.max(used_max);
        let id = TabId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl TabHost for SessionHost {
    fn tabs(&self) -> Vec<TabId> {
        self.tabs.iter().map(|t| t.id).collect()
    }

    fn is_pinned(&self, tab: TabId) -> bool {
        self.tab(tab).is_some_and(|t| t.pinned)
    }

    fn is_hidden(&self, tab: TabId) -> bool {
        self.tab(tab).is_some_and(|t| t.hidden)
    }

    fn create(&mut self, url: &str) -> TabId {
        let id = self.allocate_id();
        self.tabs.push(TabRecord {
            id,
            url: url.to_string(),
            pinned: false,
            hidden: false,
        });
        self.selected = Some(id);
        id
    }

    fn show(&mut self, tab: TabId) {
        if let Some(record) = self.tab_mut(tab) {
            record.hidden = false;
        }
    }

    fn hide(&mut self, tab: TabId) {
        if let Some(record) = self.tab_mut(tab).filter(|r| !r.pinned) {
            record.hidden = true;
        }
    }

    fn remove(&mut self, tab: TabId) {
        self.tabs.retain(|t| t.id != tab);
        if self.selected == Some(tab) {
            self.selected = self.tabs.iter().find(|t| !t.hidden).map(|t| t.id);
        }
    }

    fn select(&mut self, tab: TabId) {
        if self.tab(tab).is_some() {
            self.selected = Some(tab);
        }
    }

    fn set_root_workspace(&mut self, uuid: Option<&str>) {
        self.root_workspace = uuid.map(str::to_string);
    }

    fn workspaces_changed(&mut self, panel: &WorkspacePanel) {
        self.panel = Some(panel.clone());
    }
}
