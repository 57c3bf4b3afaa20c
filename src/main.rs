mod config;
mod host;
mod lock;
mod logging;
mod session;
mod store;
mod switcher;
mod workspace;

use anyhow::{Context, Result, anyhow, bail};
use clap::{ArgAction, Parser, Subcommand, ValueHint};
use config::{AppConfig, default_config_path};
use host::{SessionHost, TabHost, TabId};
use lock::acquire_profile_lock;
use session::{Session, session_path};
use std::{path::PathBuf, process};
use store::WorkspaceStore;
use switcher::WorkspaceSwitcher;
use workspace::{ICON_CHOICES, NEW_WORKSPACE_NAME, WorkspaceSet};

#[derive(Debug, Parser)]
#[command(
    name = "tabspaces",
    version,
    about = "tabspaces: group browser tabs into switchable workspaces",
    long_about = "No subcommand: list workspaces. Workspace arguments accept a uuid or a name.",
    after_help = "Config is saved at ~/.config/tabspaces/tabspaces.toml (or the path provided via --config)."
)]
struct Cli {
    /// Path to config TOML. Defaults to ~/.config/tabspaces/tabspaces.toml
    #[arg(short, long, value_name = "PATH", global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the active workspace and the others
    List,
    /// Apply the startup policy, as when a browser window opens
    Start,
    /// Create a workspace and switch to it
    Create {
        #[arg(default_value = NEW_WORKSPACE_NAME)]
        name: String,
        #[arg(long)]
        icon: Option<String>,
        /// Make it the default workspace
        #[arg(long)]
        default: bool,
    },
    /// Switch to a workspace
    Switch { workspace: String },
    /// Switch to the next workspace, wrapping around
    Next,
    /// Delete a workspace and close its tabs
    Delete { workspace: String },
    /// Mark a workspace as the default one
    SetDefault { workspace: String },
    /// Show which actions are available for a workspace
    Actions { workspace: String },
    /// List the icons offered for new workspaces
    Icons,
    /// Turn workspaces on
    Enable,
    /// Turn workspaces off and show every tab
    Disable,
    /// Manage tabs in the session
    #[command(subcommand)]
    Tab(TabCommand),
    /// Show the tabspaces version and exit
    Version,
}

#[derive(Debug, Subcommand)]
enum TabCommand {
    /// List tabs with their workspace
    List,
    /// Open a tab; it joins the active workspace
    Open {
        url: String,
        #[arg(long)]
        pinned: bool,
    },
    /// Close a tab
    Close { id: u64 },
    /// Navigate a tab to a new location
    Visit { id: u64, url: String },
    /// Move tabs to a workspace and switch to it
    Move {
        #[arg(long)]
        to: String,
        #[arg(required = true)]
        ids: Vec<u64>,
    },
}

type Switcher = WorkspaceSwitcher<SessionHost>;

fn main() {
    if let Err(err) = try_main() {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Version) => {
            print_version();
            return Ok(());
        }
        Some(Command::Icons) => {
            println!("{}", ICON_CHOICES.join(" "));
            return Ok(());
        }
        _ => {}
    }

    logging::init(cli.verbose);

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let mut cfg = AppConfig::load_or_init(&config_path)
        .with_context(|| format!("failed to load config at {}", config_path.display()))?;

    let profile_dir = cfg.profile_dir();
    let _lock = acquire_profile_lock(&profile_dir)?;

    match cli.command {
        Some(Command::Enable) => {
            cfg.enabled = true;
            cfg.save(&config_path)?;
            with_switcher(&cfg, |sw| {
                sw.initialize()?;
                print_workspaces(sw);
                Ok(())
            })
        }
        Some(Command::Disable) => {
            cfg.enabled = false;
            cfg.save(&config_path)?;
            with_switcher(&cfg, |sw| {
                sw.disable();
                println!(
                    "workspaces disabled; {} tab(s) visible",
                    sw.host().visible_tabs().len()
                );
                Ok(())
            })
        }
        Some(Command::Tab(cmd)) => with_switcher(&cfg, |sw| run_tab_command(sw, cmd)),
        Some(Command::Start) => with_switcher(&cfg, |sw| {
            require_enabled(sw)?;
            sw.initialize()?;
            print_workspaces(sw);
            Ok(())
        }),
        command => with_switcher(&cfg, |sw| {
            require_enabled(sw)?;
            if sw.workspaces().is_empty() {
                sw.initialize()?;
            }
            run_workspace_command(sw, command)
        }),
    }
}

fn print_version() {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
}

/// Builds a switcher over the saved session, runs `f`, then saves the session
/// back even when `f` failed part way.
fn with_switcher(cfg: &AppConfig, f: impl FnOnce(&mut Switcher) -> Result<()>) -> Result<()> {
    let profile_dir = cfg.profile_dir();
    let path = session_path(&profile_dir);
    let (host, assignments) = Session::load(&path).into_parts();

    let store = WorkspaceStore::new(cfg.store_path());
    let mut sw = WorkspaceSwitcher::new(store, host, cfg.homepage.clone())
        .with_assignments(assignments);
    sw.set_enabled(cfg.enabled);

    let result = f(&mut sw);
    let (host, assignments) = sw.into_parts();
    Session::from_parts(host, assignments).save(&path)?;
    result
}

fn require_enabled(sw: &Switcher) -> Result<()> {
    sw.ensure_enabled()
        .map_err(|err| anyhow!("{err} (run `tabspaces enable`)"))
}

fn run_workspace_command(sw: &mut Switcher, command: Option<Command>) -> Result<()> {
    match command {
        None | Some(Command::List) => {}
        Some(Command::Create {
            name,
            icon,
            default,
        }) => {
            if let Some(uuid) = sw.create_workspace(&name, default, icon)? {
                println!("created workspace '{}' ({uuid})", name.trim());
            }
        }
        Some(Command::Switch { workspace }) => {
            let uuid = resolve_workspace(&sw.workspaces(), &workspace)?;
            if !sw.context_actions(&uuid)?.can_open {
                println!("already in that workspace");
            }
            sw.change_workspace(&uuid, false)?;
        }
        Some(Command::Next) => {
            sw.cycle_next()?;
        }
        Some(Command::Delete { workspace }) => {
            let uuid = resolve_workspace(&sw.workspaces(), &workspace)?;
            if !sw.context_actions(&uuid)?.can_delete {
                bail!("cannot delete the default workspace or the only workspace");
            }
            sw.remove_workspace(&uuid)?;
            println!("deleted workspace {uuid}");
        }
        Some(Command::SetDefault { workspace }) => {
            let uuid = resolve_workspace(&sw.workspaces(), &workspace)?;
            if !sw.context_actions(&uuid)?.can_set_default {
                println!("already the default workspace");
                return Ok(());
            }
            sw.set_default(&uuid)?;
        }
        Some(Command::Actions { workspace }) => {
            let uuid = resolve_workspace(&sw.workspaces(), &workspace)?;
            let actions = sw.context_actions(&uuid)?;
            println!("open:        {}", on_off(actions.can_open));
            println!("delete:      {}", on_off(actions.can_delete));
            println!("set default: {}", on_off(actions.can_set_default));
            return Ok(());
        }
        Some(other) => unreachable!("{other:?} is handled in try_main"),
    }
    print_workspaces(sw);
    Ok(())
}

fn run_tab_command(sw: &mut Switcher, cmd: TabCommand) -> Result<()> {
    match cmd {
        TabCommand::List => {}
        TabCommand::Open { url, pinned } => {
            let tab = sw.host_mut().create(&url);
            if pinned {
                sw.host_mut().set_pinned(tab, true);
            }
            sw.location_changed(tab);
            println!("opened tab {tab}");
        }
        TabCommand::Close { id } => {
            let tab = existing_tab(sw, id)?;
            sw.close_tab(tab)?;
            println!("closed tab {tab}");
        }
        TabCommand::Visit { id, url } => {
            let tab = existing_tab(sw, id)?;
            sw.host_mut().navigate(tab, &url);
            if sw.location_changed(tab) {
                println!("tab {tab} joined the active workspace");
            }
        }
        TabCommand::Move { to, ids } => {
            require_enabled(sw)?;
            let uuid = resolve_workspace(&sw.workspaces(), &to)?;
            let tabs = ids
                .into_iter()
                .map(|id| existing_tab(sw, id))
                .collect::<Result<Vec<_>>>()?;
            sw.move_tabs(&tabs, &uuid)?;
        }
    }
    print_tabs(sw);
    Ok(())
}

fn existing_tab(sw: &Switcher, id: u64) -> Result<TabId> {
    let tab = TabId(id);
    if sw.host().tab(tab).is_none() {
        bail!("tab not found: {id}");
    }
    Ok(tab)
}

/// Matches a uuid first, then a unique name.
fn resolve_workspace(set: &WorkspaceSet, query: &str) -> Result<String> {
    if let Some(ws) = set.get(query) {
        return Ok(ws.uuid.clone());
    }

    let by_name: Vec<_> = set.workspaces.iter().filter(|w| w.name == query).collect();
    match by_name.as_slice() {
        [ws] => return Ok(ws.uuid.clone()),
        [] => {}
        _ => bail!("workspace name '{query}' is ambiguous; use the uuid"),
    }

    let available = if set.is_empty() {
        "<none>".to_string()
    } else {
        set.workspaces
            .iter()
            .map(|w| w.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    Err(anyhow!("workspace not found: {query}. available: {available}"))
}

fn print_workspaces(sw: &mut Switcher) {
    let set = sw.workspaces();
    let pushed = sw.host().panel().cloned();
    let panel = pushed.unwrap_or_else(|| sw.panel());
    match &panel.current {
        Some(current) => println!("{} {}  (active)", current.icon, current.name),
        None => println!("no active workspace"),
    }
    if panel.is_empty() {
        println!("  no other workspaces");
    }
    for entry in &panel.others {
        println!("  {} {}", entry.icon, entry.name);
    }
    for ws in &set.workspaces {
        let tabs = sw.tabs_in(&ws.uuid).len();
        let default = if ws.default { "  default" } else { "" };
        println!("    {}  {} tab(s){default}", ws.uuid, tabs);
    }
}

fn print_tabs(sw: &mut Switcher) {
    let set = sw.workspaces();
    let host = sw.host();
    if host.tabs.is_empty() {
        println!("no tabs");
        return;
    }
    for record in &host.tabs {
        let workspace = sw
            .workspace_of(record.id)
            .map(|uuid| workspace_label(&set, uuid))
            .unwrap_or_else(|| "-".to_string());
        let mut flags = Vec::new();
        if host.selected == Some(record.id) {
            flags.push("selected");
        }
        if record.pinned {
            flags.push("pinned");
        }
        if record.hidden {
            flags.push("hidden");
        }
        println!(
            "{:>4}  {:<20}  {:<18}  {}",
            record.id,
            workspace,
            flags.join(","),
            record.url
        );
    }
}

fn workspace_label(set: &WorkspaceSet, uuid: &str) -> String {
    set.get(uuid)
        .map(|ws| ws.name.clone())
        .unwrap_or_else(|| uuid.to_string())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "available" } else { "disabled" }
}
