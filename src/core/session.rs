//! # Session Persistence
//!
//! Save/restore the back stack to `~/.navgraph/sessions/<app>.json`.
//!
//! A snapshot holds, per entry, the route, its parameters and the selected
//! tab (for tabbed entries), plus the splash state. Shared-element tokens are
//! never written: a restored detail entry renders plainly.
//!
//! Restoring replays `navigate` for each saved entry, so a snapshot written
//! by an older route table is validated against the current one and
//! rejected as a whole if any entry no longer fits.
//!
//! All writes use atomic rename (write `.tmp`, then `rename()`) for crash safety.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::SampleApp;
use crate::core::config::{ResolvedConfig, navgraph_dir};
use crate::core::controller::NavController;
use crate::core::error::NavError;
use crate::core::route::Params;
use crate::core::splash::{SplashMachine, SplashState};
use crate::core::state::App;
use crate::core::tabs::Tab;
use crate::graphs::{SampleGraph, controller, initial_tab};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SavedEntry {
    pub route: String,
    #[serde(default)]
    pub params: Params,
    /// Key of the selected tab, for tabbed entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SavedSession {
    pub app: SampleApp,
    pub saved_at: DateTime<Utc>,
    pub splash: SplashState,
    /// Root first.
    pub stack: Vec<SavedEntry>,
}

impl SavedSession {
    pub fn capture<G: SampleGraph>(app: &App<G>) -> Self {
        let stack = app
            .nav
            .entries()
            .map(|entry| SavedEntry {
                route: entry.route().to_string(),
                params: entry.params().clone(),
                tab: app.nav.tab_for(entry.id()).map(|t| t.key().to_string()),
            })
            .collect();
        Self {
            app: G::APP,
            saved_at: Utc::now(),
            splash: app.splash.state(),
            stack,
        }
    }

    /// Rebuilds an `App` by replaying the saved stack on a fresh controller.
    pub fn restore<G: SampleGraph>(&self, config: &ResolvedConfig) -> Result<App<G>, NavError> {
        let (root, above) = self.stack.split_first().ok_or(NavError::EmptyStack)?;
        if root.route != G::ROOT_ROUTE {
            return Err(NavError::RouteNotOnStack(G::ROOT_ROUTE.to_string()));
        }

        let initial = initial_tab::<G>(config.initial_tab_for(G::APP));
        let mut nav = controller::<G>(initial)?;
        restore_tab(&mut nav, root)?;
        for saved in above {
            nav.navigate(&saved.route, saved.params.clone())?;
            restore_tab(&mut nav, saved)?;
        }

        info!(
            "Restored {:?} session from {} ({} entries)",
            self.app,
            self.saved_at.to_rfc3339(),
            self.stack.len()
        );
        Ok(App::from_parts(config, nav, SplashMachine::resume(self.splash)))
    }
}

fn restore_tab<T: Tab>(
    nav: &mut NavController<T>,
    saved: &SavedEntry,
) -> Result<(), NavError> {
    let Some(name) = saved.tab.as_deref() else {
        return Ok(());
    };
    match T::parse(name) {
        Some(tab) => {
            nav.navigate_to_tab(tab)?;
        }
        None => warn!("Ignoring unknown saved tab '{}' on {}", name, saved.route),
    }
    Ok(())
}

/// Returns `~/.navgraph/sessions/`, creating it if needed.
pub fn sessions_dir() -> io::Result<PathBuf> {
    let dir = navgraph_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?
        .join("sessions");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn session_path(dir: &Path, app: SampleApp) -> PathBuf {
    dir.join(format!("{}.json", app.key()))
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

pub fn save_session_in(dir: &Path, session: &SavedSession) -> io::Result<()> {
    atomic_write_json(&session_path(dir, session.app), session)
}

/// Loads the saved session for `app`. `Ok(None)` if there is none yet.
pub fn load_session_from(dir: &Path, app: SampleApp) -> io::Result<Option<SavedSession>> {
    let path = session_path(dir, app);
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(&path)?;
    let session: SavedSession =
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if session.app != app {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} holds a {:?} session", path.display(), session.app),
        ));
    }
    Ok(Some(session))
}

/// Save the current back stack. This is the single entry point for session
/// persistence: call from the TUI on a SaveSession effect or on quit.
pub fn save_current_session<G: SampleGraph>(app: &App<G>) {
    let result = sessions_dir().and_then(|dir| save_session_in(&dir, &SavedSession::capture(app)));
    match result {
        Ok(()) => debug!("Session saved: {:?} (depth {})", G::APP, app.nav.depth()),
        Err(e) => warn!("Failed to save session: {}", e),
    }
}

/// Restores the last session for `G` when enabled, otherwise (or when the
/// snapshot is missing, unreadable or no longer valid) starts fresh.
pub fn restore_or_fresh<G: SampleGraph>(config: &ResolvedConfig) -> Result<App<G>, NavError> {
    if config.restore_session {
        match sessions_dir().and_then(|dir| load_session_from(&dir, G::APP)) {
            Ok(Some(saved)) => match saved.restore::<G>(config) {
                Ok(app) => return Ok(app),
                Err(e) => warn!("Discarding saved {:?} session: {}", G::APP, e),
            },
            Ok(None) => debug!("No saved {:?} session", G::APP),
            Err(e) => warn!("Failed to load session: {}", e),
        }
    }
    App::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::graphs::{Crane, CraneScreen, HomeSection, Jetsnack};
    use tempfile::TempDir;

    fn config() -> ResolvedConfig {
        ResolvedConfig::default()
    }

    #[test]
    fn test_capture_and_restore_stack() {
        let mut app = App::<Jetsnack>::new(&config()).unwrap();
        let home = app.nav.current_entry().id();
        update(&mut app, Action::SplashTimeout).unwrap();
        update(&mut app, Action::SelectTab(HomeSection::Cart)).unwrap();
        update(&mut app, Action::OpenItem { from: home, index: 1 }).unwrap();

        let saved = SavedSession::capture(&app);
        assert_eq!(saved.stack.len(), 2);
        assert_eq!(saved.stack[0].tab.as_deref(), Some("cart"));
        assert_eq!(saved.stack[1].tab, None);

        let restored = saved.restore::<Jetsnack>(&config()).unwrap();
        assert_eq!(restored.nav.depth(), 2);
        assert_eq!(restored.nav.current_entry().path(), "snack/6?origin=cart");
        assert_eq!(restored.nav.selected_tab(), Some(HomeSection::Cart));
        assert!(restored.splash.is_completed());
        assert!(restored.nav.active_transition().is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut app = App::<Crane>::new(&config()).unwrap();
        update(&mut app, Action::SelectTab(CraneScreen::Eat)).unwrap();
        update(&mut app, Action::OpenCalendar).unwrap();
        let saved = SavedSession::capture(&app);

        save_session_in(dir.path(), &saved).unwrap();
        assert!(dir.path().join("crane.json").exists());
        assert!(!dir.path().join("crane.tmp").exists());

        let loaded = load_session_from(dir.path(), SampleApp::Crane).unwrap().unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_load_missing_session() {
        let dir = TempDir::new().unwrap();
        assert!(load_session_from(dir.path(), SampleApp::Jetsnack).unwrap().is_none());
    }

    #[test]
    fn test_load_corrupt_session() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("crane.json"), "{ not json").unwrap();
        let err = load_session_from(dir.path(), SampleApp::Crane).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_empty_snapshot_rejected() {
        let saved = SavedSession {
            app: SampleApp::Crane,
            saved_at: Utc::now(),
            splash: SplashState::Completed,
            stack: Vec::new(),
        };
        assert_eq!(saved.restore::<Crane>(&config()).err(), Some(NavError::EmptyStack));
    }

    #[test]
    fn test_stale_snapshot_rejected() {
        let saved = SavedSession {
            app: SampleApp::Jetsnack,
            saved_at: Utc::now(),
            splash: SplashState::Completed,
            stack: vec![
                SavedEntry {
                    route: "home".into(),
                    params: Params::new(),
                    tab: None,
                },
                SavedEntry {
                    route: "snack".into(),
                    params: Params::new(),
                    tab: None,
                },
            ],
        };
        assert!(matches!(
            saved.restore::<Jetsnack>(&config()),
            Err(NavError::MissingParameter { .. })
        ));
    }

    #[test]
    fn test_unknown_saved_tab_is_ignored() {
        let saved = SavedSession {
            app: SampleApp::Crane,
            saved_at: Utc::now(),
            splash: SplashState::Shown,
            stack: vec![SavedEntry {
                route: "home".into(),
                params: Params::new(),
                tab: Some("fly".into()),
            }],
        };
        let app = saved.restore::<Crane>(&config()).unwrap();
        assert_eq!(app.nav.selected_tab(), Some(CraneScreen::Here));
        assert!(!app.splash.is_completed());
    }
}
