//! # Actions
//!
//! Everything that can happen in a running sample becomes an `Action`.
//! User presses Enter on a snack? That's `Action::OpenItem { .. }`.
//! Splash timer fires? That's `Action::SplashTimeout`.
//!
//! `update()` applies one action to the state and returns an `Effect`
//! telling the adapter what to do next. No I/O here.
//!
//! ```text
//! App + Action  →  update()  →  App' + Effect
//! ```
//!
//! Navigation contract violations come back as `Err(NavError)` and are not
//! swallowed: the adapter stops on them.

use chrono::NaiveDate;
use log::{debug, info};

use crate::core::entry::EntryId;
use crate::core::error::NavError;
use crate::core::location::{CameraTarget, Coordinate};
use crate::core::route::Params;
use crate::core::state::App;
use crate::core::tabs::Tab;
use crate::graphs::SampleGraph;

#[derive(Debug, Clone, PartialEq)]
pub enum Action<T> {
    Navigate { route: String, params: Params },
    /// Deep link such as `snack/3?origin=feed`.
    OpenPath(String),
    /// Tap on row `index` of the list shown by the tabbed entry `from`.
    OpenItem { from: EntryId, index: usize },
    OpenCalendar,
    SelectTab(T),
    Back,
    SplashTimeout,
    TransitionFinished,
    ChangePeople(i8),
    SelectDate(NaiveDate),
    LocationUpdated(Option<Coordinate>),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Back was pressed on the root entry; the host decides (usually quits).
    BackAtRoot,
    /// The map just became visible or its location changed.
    CenterMap(CameraTarget),
    /// The back stack changed and is worth persisting.
    SaveSession,
}

pub fn update<G: SampleGraph>(app: &mut App<G>, action: Action<G::Tab>) -> Result<Effect, NavError> {
    match action {
        Action::Navigate { route, params } => {
            let entry = app.nav.navigate(&route, params)?;
            app.status_message = G::screen_title(&entry);
            Ok(Effect::SaveSession)
        }
        Action::OpenPath(path) => {
            let entry = app.nav.navigate_path(&path)?;
            info!("Opened deep link {}", entry.path());
            app.status_message = G::screen_title(&entry);
            Ok(Effect::SaveSession)
        }
        Action::OpenItem { from, index } => {
            let Some(tab) = app.nav.tab_for(from) else {
                debug!("Ignoring item tap from {from}: not a tabbed entry");
                return Ok(Effect::None);
            };
            let Some(item) = G::catalog(tab).get(index) else {
                debug!("No item {index} under {:?}", tab);
                return Ok(Effect::None);
            };
            match G::open_item(&mut app.nav, from, tab, item)? {
                Some(entry) => {
                    app.status_message = G::screen_title(&entry);
                    Ok(Effect::SaveSession)
                }
                None => Ok(Effect::None),
            }
        }
        Action::OpenCalendar => match G::CALENDAR_ROUTE {
            Some(route) => {
                let entry = app.nav.navigate(route, Params::new())?;
                app.status_message = G::screen_title(&entry);
                Ok(Effect::SaveSession)
            }
            None => Ok(Effect::None),
        },
        Action::SelectTab(tab) => {
            let change = app.nav.navigate_to_tab(tab)?;
            app.status_message = change.to.title().to_string();
            if !change.reselected && app.map_visible() {
                return Ok(Effect::CenterMap(app.camera_target()));
            }
            Ok(Effect::None)
        }
        Action::Back => match app.nav.back() {
            Some(current) => {
                let live = app.nav.entries().map(|e| e.id());
                let released = app.search.prune(live);
                if released > 0 {
                    debug!("Released {released} screen scope(s)");
                }
                app.status_message = if app.nav.is_on_tab_host() {
                    String::new()
                } else {
                    G::screen_title(&current)
                };
                Ok(Effect::SaveSession)
            }
            None => Ok(Effect::BackAtRoot),
        },
        Action::SplashTimeout => {
            if app.splash.dismiss() && app.map_visible() {
                return Ok(Effect::CenterMap(app.camera_target()));
            }
            Ok(Effect::None)
        }
        Action::TransitionFinished => {
            app.nav.complete_transition();
            Ok(Effect::None)
        }
        Action::ChangePeople(delta) => {
            let search = app.home_search_mut()?;
            search.adjust_people(delta);
            let people = search.people;
            app.status_message = format!("{people} people");
            Ok(Effect::None)
        }
        Action::SelectDate(day) => {
            let search = app.home_search_mut()?;
            search.dates.select(day);
            let label = search.dates.label();
            app.status_message = label;
            Ok(Effect::None)
        }
        Action::LocationUpdated(location) => {
            app.device_location = location;
            if app.map_visible() {
                return Ok(Effect::CenterMap(app.camera_target()));
            }
            Ok(Effect::None)
        }
        Action::Quit => Ok(Effect::Quit),
    }
}
