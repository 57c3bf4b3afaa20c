use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};

use crate::{
    host::{TabHost, TabId, WorkspacePanel},
    store::WorkspaceStore,
    workspace::{ContextActions, DEFAULT_WORKSPACE_NAME, Workspace, WorkspaceSet},
};

/// Active-workspace state machine. Owns the tab -> workspace mapping; the host
/// only knows tabs by their opaque id.
pub struct WorkspaceSwitcher<H: TabHost> {
    store: WorkspaceStore,
    host: H,
    assignments: BTreeMap<TabId, String>,
    homepage: String,
    enabled: bool,
}

impl<H: TabHost> WorkspaceSwitcher<H> {
    pub fn new(store: WorkspaceStore, host: H, homepage: impl Into<String>) -> Self {
        Self {
            store,
            host,
            assignments: BTreeMap::new(),
            homepage: homepage.into(),
            enabled: true,
        }
    }

    /// Restores assignments saved from an earlier session, dropping tabs the
    /// host no longer has and workspaces the store no longer knows.
    pub fn with_assignments(mut self, saved: impl IntoIterator<Item = (TabId, String)>) -> Self {
        let live = self.host.tabs();
        let set = self.store.load();
        self.assignments = saved
            .into_iter()
            .filter(|(tab, uuid)| {
                if !set.contains(uuid) {
                    tracing::debug!(%tab, uuid, "dropping assignment to unknown workspace");
                    return false;
                }
                live.contains(tab)
            })
            .collect();
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn ensure_enabled(&self) -> Result<()> {
        if !self.enabled {
            bail!("workspaces are disabled");
        }
        Ok(())
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_parts(self) -> (H, BTreeMap<TabId, String>) {
        (self.host, self.assignments)
    }

    pub fn workspaces(&mut self) -> WorkspaceSet {
        self.store.load()
    }

    pub fn workspace_of(&self, tab: TabId) -> Option<&str> {
        self.assignments.get(&tab).map(String::as_str)
    }

    /// Tabs tagged with `uuid`, in host order.
    pub fn tabs_in(&self, uuid: &str) -> Vec<TabId> {
        self.host
            .tabs()
            .into_iter()
            .filter(|tab| self.workspace_of(*tab) == Some(uuid))
            .collect()
    }

    pub fn panel(&mut self) -> WorkspacePanel {
        WorkspacePanel::from_set(&self.store.load())
    }

    /// Startup: create the default workspace on first run, otherwise activate
    /// the default, else the used, else the first workspace.
    pub fn initialize(&mut self) -> Result<()> {
        if !self.enabled {
            tracing::debug!("workspaces disabled, skipping initialization");
            return Ok(());
        }
        self.store.ensure_exists()?;
        tracing::debug!(path = %self.store.path().display(), "loading workspaces");

        let mut set = self.store.load();
        if set.is_empty() {
            tracing::info!("no workspaces found, creating the default one");
            self.create_workspace(DEFAULT_WORKSPACE_NAME, true, None)?;
            return Ok(());
        }

        let Some(chosen) = set.startup_choice().cloned() else {
            return Ok(());
        };
        if !chosen.used {
            set.mark_used(&chosen.uuid);
            self.store.replace(&set)?;
        }
        self.change_workspace(&chosen.uuid, true)
    }

    pub fn change_workspace(&mut self, uuid: &str, is_init: bool) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let mut set = self.store.load();
        if !set.contains(uuid) {
            bail!("workspace not found: {uuid}");
        }

        set.mark_used(uuid);
        if let Err(err) = set.check_invariants() {
            tracing::warn!(error = %err, "workspace set is inconsistent");
        }
        // Persist before touching tabs so an interrupted switch still points at `uuid`.
        self.store.replace(&set)?;
        tracing::info!(uuid, is_init, "changing workspace");

        let mut first_tab = None;
        for tab in self.host.tabs() {
            if self.host.is_pinned(tab) || self.workspace_of(tab) != Some(uuid) {
                continue;
            }
            if first_tab.is_none() {
                first_tab = Some(tab);
                self.host.select(tab);
            }
            self.host.show(tab);
        }

        if first_tab.is_none() && !is_init {
            let tab = self.open_tab_in(uuid);
            tracing::debug!(uuid, %tab, "workspace had no tabs, opened one");
        }

        for tab in self.host.tabs() {
            if !self.host.is_pinned(tab) && self.workspace_of(tab) != Some(uuid) {
                self.host.hide(tab);
            }
        }

        self.host.set_root_workspace(Some(uuid));
        self.store.replace(&set)?;
        self.host.workspaces_changed(&WorkspacePanel::from_set(&set));
        Ok(())
    }

    /// Creates a workspace, hands it every unassigned tab (or a fresh home
    /// page tab when there are none) and switches to it.
    pub fn create_workspace(
        &mut self,
        name: &str,
        is_default: bool,
        icon: Option<String>,
    ) -> Result<Option<String>> {
        if !self.enabled {
            return Ok(None);
        }
        let name = name.trim();
        if name.is_empty() {
            bail!("workspace name must not be empty");
        }

        let workspace = Workspace::new(name, icon, is_default);
        let uuid = workspace.uuid.clone();
        self.store.append(workspace)?;
        if is_default {
            let mut set = self.store.load();
            set.mark_default(&uuid);
            self.store.replace(&set)?;
        }

        let unassigned: Vec<TabId> = self
            .host
            .tabs()
            .into_iter()
            .filter(|tab| !self.assignments.contains_key(tab))
            .collect();
        if unassigned.is_empty() {
            self.open_tab_in(&uuid);
        }
        for tab in unassigned {
            self.assignments.insert(tab, uuid.clone());
        }

        self.change_workspace(&uuid, false)?;
        Ok(Some(uuid))
    }

    /// Switches away from `uuid`, closes its tabs and drops it from the store.
    /// The active workspace stays active unless it is the one being removed;
    /// then the switch goes to the default workspace, else the first remaining one.
    pub fn remove_workspace(&mut self, uuid: &str) -> Result<()> {
        self.ensure_enabled()?;
        let set = self.store.load();
        if !set.contains(uuid) {
            bail!("workspace not found: {uuid}");
        }
        let fallback = set
            .fallback_for(uuid)
            .map(|w| w.uuid.clone())
            .with_context(|| format!("cannot remove the only workspace: {uuid}"))?;

        self.change_workspace(&fallback, false)?;
        for tab in self.tabs_in(uuid) {
            self.host.remove(tab);
            self.assignments.remove(&tab);
        }
        self.store.remove(uuid)?;
        self.refresh_panel();
        Ok(())
    }

    pub fn set_default(&mut self, uuid: &str) -> Result<()> {
        let mut set = self.store.load();
        if !set.contains(uuid) {
            bail!("workspace not found: {uuid}");
        }
        set.mark_default(uuid);
        self.store.replace(&set)?;
        self.refresh_panel();
        Ok(())
    }

    /// Activates the next workspace in display order, wrapping around.
    pub fn cycle_next(&mut self) -> Result<Option<String>> {
        if !self.enabled {
            return Ok(None);
        }
        let set = self.store.load();
        let Some(next) = set.next_after_active().map(|w| w.uuid.clone()) else {
            return Ok(None);
        };
        self.change_workspace(&next, false)?;
        Ok(Some(next))
    }

    pub fn context_actions(&mut self, uuid: &str) -> Result<ContextActions> {
        self.store
            .load()
            .context_actions(uuid)
            .with_context(|| format!("workspace not found: {uuid}"))
    }

    /// Closes `tab`. Losing the last tab of a workspace opens a replacement in
    /// that workspace and re-applies the switch.
    pub fn close_tab(&mut self, tab: TabId) -> Result<()> {
        let owner = self.assignments.get(&tab).cloned();
        let was_last = !self.host.is_pinned(tab)
            && owner.as_deref().is_some_and(|uuid| {
                self.tabs_in(uuid)
                    .into_iter()
                    .filter(|t| !self.host.is_pinned(*t))
                    .count()
                    == 1
            });

        self.host.remove(tab);
        self.assignments.remove(&tab);

        let Some(uuid) = owner else {
            return Ok(());
        };
        if !self.enabled || !was_last || !self.store.load().contains(&uuid) {
            return Ok(());
        }
        tracing::debug!(uuid, %tab, "closed the last tab of a workspace");
        self.open_tab_in(&uuid);
        self.change_workspace(&uuid, false)
    }

    /// Adopts an unassigned, visible tab into the active workspace. Returns
    /// whether the tab was adopted.
    pub fn location_changed(&mut self, tab: TabId) -> bool {
        if !self.enabled
            || self.assignments.contains_key(&tab)
            || !self.host.tabs().contains(&tab)
            || self.host.is_hidden(tab)
        {
            return false;
        }
        let Some(active) = self.store.load().active().map(|w| w.uuid.clone()) else {
            return false;
        };
        tracing::debug!(%tab, uuid = %active, "adopting tab into active workspace");
        self.assignments.insert(tab, active);
        true
    }

    /// Re-tags `tabs` with `uuid` and switches to that workspace.
    pub fn move_tabs(&mut self, tabs: &[TabId], uuid: &str) -> Result<()> {
        if !self.store.load().contains(uuid) {
            bail!("workspace not found: {uuid}");
        }
        let live = self.host.tabs();
        for tab in tabs {
            if !live.contains(tab) {
                tracing::warn!(%tab, "skipping unknown tab");
                continue;
            }
            self.assignments.insert(*tab, uuid.to_string());
        }
        self.change_workspace(uuid, false)
    }

    /// Workspaces switched off: forget the cache and show every tab.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.store.invalidate();
        for tab in self.host.tabs() {
            self.host.show(tab);
        }
        self.host.set_root_workspace(None);
    }

    fn open_tab_in(&mut self, uuid: &str) -> TabId {
        let tab = self.host.create(&self.homepage);
        self.assignments.insert(tab, uuid.to_string());
        tab
    }

    fn refresh_panel(&mut self) {
        let panel = self.panel();
        self.host.workspaces_changed(&panel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{host::SessionHost, workspace::sample};

    const HOME: &str = "about:home";

    fn new_switcher(dir: &tempfile::TempDir) -> WorkspaceSwitcher<SessionHost> {
        let store = WorkspaceStore::new(dir.path().join("Workspaces.json"));
        WorkspaceSwitcher::new(store, SessionHost::default(), HOME)
    }

    fn seed(dir: &tempfile::TempDir, workspaces: Vec<Workspace>) {
        let mut store = WorkspaceStore::new(dir.path().join("Workspaces.json"));
        store.replace(&WorkspaceSet { workspaces }).unwrap();
    }

    fn check(sw: &mut WorkspaceSwitcher<SessionHost>) -> WorkspaceSet {
        let set = sw.workspaces();
        set.check_invariants().unwrap();
        set
    }

    fn active(sw: &mut WorkspaceSwitcher<SessionHost>) -> String {
        sw.workspaces().active().unwrap().uuid.clone()
    }

    fn create(sw: &mut WorkspaceSwitcher<SessionHost>, name: &str) -> String {
        let uuid = sw.create_workspace(name, false, None).unwrap().unwrap();
        check(sw);
        uuid
    }

    #[test]
    fn initialize_creates_default_workspace_and_adopts_tabs() {
        let dir = tempfile::tempdir().unwrap();
        let mut sw = new_switcher(&dir);
        let existing = sw.host_mut().create("https://example.com");

        sw.initialize().unwrap();
        let set = check(&mut sw);
        assert_eq!(set.len(), 1);
        let ws = &set.workspaces[0];
        assert_eq!(ws.name, DEFAULT_WORKSPACE_NAME);
        assert!(ws.default && ws.used);
        assert_eq!(sw.workspace_of(existing), Some(ws.uuid.as_str()));
        assert_eq!(sw.host().tabs(), vec![existing]);
        assert_eq!(sw.host().root_workspace.as_deref(), Some(ws.uuid.as_str()));
    }

    #[test]
    fn initialize_prefers_default_over_used() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = sample("a", "A");
        a.used = true;
        let mut b = sample("b", "B");
        b.default = true;
        seed(&dir, vec![a, b]);

        let mut sw = new_switcher(&dir);
        sw.initialize().unwrap();
        check(&mut sw);
        assert_eq!(active(&mut sw), "b");
        // Initialization never opens tabs for an empty workspace.
        assert!(sw.host().tabs().is_empty());
    }

    #[test]
    fn initialize_falls_back_to_first_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        seed(&dir, vec![sample("a", "A"), sample("b", "B")]);

        let mut sw = new_switcher(&dir);
        sw.initialize().unwrap();

        let mut reopened = new_switcher(&dir);
        assert_eq!(active(&mut reopened), "a");
        check(&mut reopened);
    }

    #[test]
    fn change_workspace_shows_only_target_tabs() {
        let dir = tempfile::tempdir().unwrap();
        let mut sw = new_switcher(&dir);
        let first = sw.host_mut().create("https://one.example");
        sw.initialize().unwrap();
        let home = active(&mut sw);

        let pinned = sw.host_mut().create("https://pinned.example");
        sw.host_mut().set_pinned(pinned, true);
        assert!(sw.location_changed(pinned));

        let work = create(&mut sw, "Work");
        let work_tabs = sw.tabs_in(&work);
        assert_eq!(work_tabs.len(), 1);
        assert_eq!(sw.host().tab(work_tabs[0]).unwrap().url, HOME);
        assert!(sw.host().is_hidden(first));
        assert!(!sw.host().is_hidden(pinned));
        assert_eq!(sw.host().selected, Some(work_tabs[0]));

        sw.change_workspace(&home, false).unwrap();
        check(&mut sw);
        assert_eq!(active(&mut sw), home);
        assert_eq!(sw.host().visible_tabs(), vec![first, pinned]);
        assert_eq!(sw.host().selected, Some(first));
        assert_eq!(sw.host().root_workspace.as_deref(), Some(home.as_str()));

        sw.change_workspace(&home, false).unwrap();
        assert_eq!(sw.host().visible_tabs(), vec![first, pinned]);
        assert_eq!(sw.host().tabs().len(), 3);
    }

    #[test]
    fn change_workspace_opens_tab_for_empty_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = sample("a", "A");
        a.used = true;
        seed(&dir, vec![a, sample("b", "B")]);

        let mut sw = new_switcher(&dir);
        sw.change_workspace("b", false).unwrap();
        check(&mut sw);
        let tabs = sw.tabs_in("b");
        assert_eq!(tabs.len(), 1);
        assert_eq!(sw.host().visible_tabs(), tabs);
    }

    #[test]
    fn change_workspace_rejects_unknown_uuid() {
        let dir = tempfile::tempdir().unwrap();
        let mut sw = new_switcher(&dir);
        sw.initialize().unwrap();
        let err = sw.change_workspace("nope", false).unwrap_err();
        assert!(err.to_string().contains("workspace not found"));
    }

    #[test]
    fn closing_last_tab_opens_replacement() {
        let dir = tempfile::tempdir().unwrap();
        let mut sw = new_switcher(&dir);
        sw.initialize().unwrap();
        let uuid = active(&mut sw);
        let tabs = sw.tabs_in(&uuid);
        assert_eq!(tabs.len(), 1);

        sw.close_tab(tabs[0]).unwrap();
        check(&mut sw);
        let after = sw.tabs_in(&uuid);
        assert_eq!(after.len(), 1);
        assert_ne!(after[0], tabs[0]);
        assert_eq!(sw.host().visible_tabs(), after);
    }

    #[test]
    fn closing_one_of_several_tabs_opens_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut sw = new_switcher(&dir);
        sw.initialize().unwrap();
        let extra = sw.host_mut().create("https://two.example");
        assert!(sw.location_changed(extra));

        sw.close_tab(extra).unwrap();
        assert_eq!(sw.host().tabs().len(), 1);
    }

    #[test]
    fn cycle_next_wraps_around() {
        let dir = tempfile::tempdir().unwrap();
        seed(
            &dir,
            vec![sample("a", "A"), sample("b", "B"), sample("c", "C")],
        );
        let mut sw = new_switcher(&dir);

        // Nothing active yet: start at the first entry.
        assert_eq!(sw.cycle_next().unwrap().as_deref(), Some("a"));
        sw.change_workspace("b", false).unwrap();
        assert_eq!(sw.cycle_next().unwrap().as_deref(), Some("c"));
        check(&mut sw);
        assert_eq!(sw.cycle_next().unwrap().as_deref(), Some("a"));
        assert_eq!(active(&mut sw), "a");
    }

    #[test]
    fn removing_active_workspace_switches_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut sw = new_switcher(&dir);
        sw.initialize().unwrap();
        let a = active(&mut sw);
        let b = create(&mut sw, "B");
        let c = create(&mut sw, "C");
        sw.change_workspace(&b, false).unwrap();
        let b_tabs = sw.tabs_in(&b);
        assert!(!b_tabs.is_empty());

        sw.remove_workspace(&b).unwrap();
        let set = check(&mut sw);
        assert_eq!(set.active().unwrap().uuid, a);
        let ids: Vec<_> = set.workspaces.iter().map(|w| w.uuid.clone()).collect();
        assert_eq!(ids, vec![a, c]);
        for tab in b_tabs {
            assert!(!sw.host().tabs().contains(&tab));
            assert!(sw.workspace_of(tab).is_none());
        }
    }

    #[test]
    fn removing_background_workspace_keeps_active_one() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = sample("a", "A");
        a.used = true;
        let mut c = sample("c", "C");
        c.default = true;
        seed(&dir, vec![a, sample("b", "B"), c]);

        let mut sw = new_switcher(&dir);
        sw.remove_workspace("b").unwrap();
        let set = check(&mut sw);
        assert_eq!(set.active().unwrap().uuid, "a");
        assert!(!set.contains("b"));
    }

    #[test]
    fn disabled_switcher_refuses_removal_and_cycling() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = sample("a", "A");
        a.used = true;
        seed(&dir, vec![a, sample("b", "B")]);

        let mut sw = new_switcher(&dir);
        sw.disable();
        assert!(sw.remove_workspace("a").is_err());
        assert_eq!(sw.cycle_next().unwrap(), None);

        let set = check(&mut sw);
        assert_eq!(set.len(), 2);
        assert_eq!(set.active().unwrap().uuid, "a");
    }

    #[test]
    fn removing_default_workspace_uses_first_other() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = sample("a", "A");
        a.default = true;
        a.used = true;
        seed(&dir, vec![a, sample("b", "B")]);

        let mut sw = new_switcher(&dir);
        sw.remove_workspace("a").unwrap();
        let set = check(&mut sw);
        assert_eq!(set.len(), 1);
        assert_eq!(set.active().unwrap().uuid, "b");
    }

    #[test]
    fn removing_only_workspace_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut sw = new_switcher(&dir);
        sw.initialize().unwrap();
        let only = active(&mut sw);
        assert!(sw.remove_workspace(&only).is_err());
        assert_eq!(sw.workspaces().len(), 1);
    }

    #[test]
    fn set_default_keeps_a_single_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = sample("a", "A");
        a.default = true;
        a.used = true;
        seed(&dir, vec![a, sample("b", "B")]);

        let mut sw = new_switcher(&dir);
        sw.set_default("b").unwrap();
        let set = check(&mut sw);
        assert!(!set.get("a").unwrap().default);
        assert!(set.get("b").unwrap().default);
        assert!(!sw.context_actions("b").unwrap().can_delete);
        assert!(sw.context_actions("a").unwrap().can_delete);
    }

    #[test]
    fn creating_default_workspace_clears_previous_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut sw = new_switcher(&dir);
        sw.initialize().unwrap();
        let old = active(&mut sw);

        let new = sw
            .create_workspace("Focus", true, Some("✅".into()))
            .unwrap()
            .unwrap();
        let set = check(&mut sw);
        assert!(!set.get(&old).unwrap().default);
        let created = set.get(&new).unwrap();
        assert!(created.default && created.used);
        assert_eq!(created.icon.as_deref(), Some("✅"));
    }

    #[test]
    fn create_rejects_blank_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut sw = new_switcher(&dir);
        assert!(sw.create_workspace("   ", false, None).is_err());
        assert!(sw.workspaces().is_empty());
    }

    #[test]
    fn location_change_adopts_only_visible_unassigned_tabs() {
        let dir = tempfile::tempdir().unwrap();
        let mut sw = new_switcher(&dir);
        sw.initialize().unwrap();
        let home = active(&mut sw);
        let work = create(&mut sw, "Work");

        let fresh = sw.host_mut().create("https://fresh.example");
        assert!(sw.location_changed(fresh));
        assert_eq!(sw.workspace_of(fresh), Some(work.as_str()));
        assert!(!sw.location_changed(fresh));

        let hidden = sw.host_mut().create("https://hidden.example");
        sw.host_mut().hide(hidden);
        assert!(!sw.location_changed(hidden));
        assert!(sw.workspace_of(hidden).is_none());

        assert!(!sw.location_changed(TabId(999)));
        assert_ne!(home, work);
    }

    #[test]
    fn move_tabs_retags_and_switches() {
        let dir = tempfile::tempdir().unwrap();
        let mut sw = new_switcher(&dir);
        sw.initialize().unwrap();
        let home = active(&mut sw);
        let work = create(&mut sw, "Work");
        let work_tab = sw.tabs_in(&work)[0];

        sw.move_tabs(&[work_tab], &home).unwrap();
        check(&mut sw);
        assert_eq!(active(&mut sw), home);
        assert_eq!(sw.workspace_of(work_tab), Some(home.as_str()));
        assert!(!sw.host().is_hidden(work_tab));
        assert!(sw.move_tabs(&[work_tab], "missing").is_err());
    }

    #[test]
    fn disable_shows_everything_and_freezes_switching() {
        let dir = tempfile::tempdir().unwrap();
        let mut sw = new_switcher(&dir);
        sw.initialize().unwrap();
        let home = active(&mut sw);
        create(&mut sw, "Work");
        assert_eq!(sw.host().visible_tabs().len(), 1);

        sw.disable();
        assert_eq!(sw.host().visible_tabs().len(), 2);
        assert!(sw.host().root_workspace.is_none());

        sw.change_workspace(&home, false).unwrap();
        assert_eq!(sw.host().visible_tabs().len(), 2);
        assert_eq!(sw.create_workspace("Later", false, None).unwrap(), None);
    }

    #[test]
    fn panel_is_pushed_to_host() {
        let dir = tempfile::tempdir().unwrap();
        let mut sw = new_switcher(&dir);
        sw.initialize().unwrap();
        let panel = sw.host().panel().cloned().unwrap();
        assert_eq!(panel.current.unwrap().name, DEFAULT_WORKSPACE_NAME);
        assert!(panel.others.is_empty());

        create(&mut sw, "Work");
        let panel = sw.host().panel().cloned().unwrap();
        assert_eq!(panel.current.unwrap().name, "Work");
        assert_eq!(panel.others.len(), 1);
    }

    #[test]
    fn restored_assignments_skip_dead_tabs() {
        let dir = tempfile::tempdir().unwrap();
        seed(&dir, vec![sample("a", "A")]);
        let mut host = SessionHost::default();
        let live = host.create(HOME);
        let store = WorkspaceStore::new(dir.path().join("Workspaces.json"));
        let sw = WorkspaceSwitcher::new(store, host, HOME)
            .with_assignments([(live, "a".to_string()), (TabId(42), "a".to_string())]);
        assert_eq!(sw.assignments.len(), 1);
        assert_eq!(sw.workspace_of(live), Some("a"));
    }

    #[test]
    fn restored_assignments_skip_unknown_workspaces() {
        let dir = tempfile::tempdir().unwrap();
        seed(&dir, vec![sample("a", "A")]);
        let mut host = SessionHost::default();
        let kept = host.create(HOME);
        let orphan = host.create(HOME);
        let store = WorkspaceStore::new(dir.path().join("Workspaces.json"));
        let sw = WorkspaceSwitcher::new(store, host, HOME)
            .with_assignments([(kept, "a".to_string()), (orphan, "gone".to_string())]);
        assert_eq!(sw.workspace_of(kept), Some("a"));
        assert!(sw.workspace_of(orphan).is_none());
    }
}
