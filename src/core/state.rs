//! # Application State
//!
//! Core state for one running sample app. Domain logic only, no TUI types.
//! Presentation state lives in the `tui` module.
//!
//! ```text
//! App<G>
//! ├── nav: NavController<G::Tab>           // back stack, tabs, live token
//! ├── splash: SplashMachine                // Shown → Completed
//! ├── search: ScopedStore<SearchState>     // per home entry, edited by calendar
//! ├── device_location: Option<Coordinate>  // last fix, if any
//! ├── fallback_location: Coordinate        // used when there is no fix
//! ├── map_zoom: f32
//! └── status_message: String               // status bar text
//! ```
//!
//! State changes only happen through `update(app, action)` in action.rs.

use std::marker::PhantomData;

use chrono::NaiveDate;

use crate::core::config::ResolvedConfig;
use crate::core::controller::NavController;
use crate::core::error::NavError;
use crate::core::location::{CameraTarget, Coordinate, camera_target};
use crate::core::scope::ScopedStore;
use crate::core::splash::SplashMachine;
use crate::core::tabs::Tab;
use crate::graphs::{CatalogItem, SampleGraph, controller, initial_tab};

/// Most travellers a search can hold.
pub const MAX_PEOPLE: u8 = 4;

/// A date range being picked one day at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateSelection {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateSelection {
    /// First pick sets the start, a later day sets the end. Picking a day
    /// before the start, or picking once the range is complete, starts over.
    pub fn select(&mut self, day: NaiveDate) {
        match (self.start, self.end) {
            (Some(start), None) if day > start => self.end = Some(day),
            _ => {
                self.start = Some(day);
                self.end = None;
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn nights(&self) -> Option<i64> {
        Some((self.end? - self.start?).num_days())
    }

    pub fn label(&self) -> String {
        match (self.start, self.end) {
            (None, _) => "Select Dates".to_string(),
            (Some(start), None) => format!("{}", start.format("%b %-d")),
            (Some(start), Some(end)) => {
                format!("{} - {}", start.format("%b %-d"), end.format("%b %-d"))
            }
        }
    }
}

/// Search criteria owned by a home entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub people: u8,
    pub dates: DateSelection,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            people: 1,
            dates: DateSelection::default(),
        }
    }
}

impl SearchState {
    /// Adds `delta` travellers, keeping the count within `1..=MAX_PEOPLE`.
    pub fn adjust_people(&mut self, delta: i8) {
        let people = (self.people as i16 + delta as i16).clamp(1, MAX_PEOPLE as i16);
        self.people = people as u8;
    }
}

pub struct App<G: SampleGraph> {
    pub nav: NavController<G::Tab>,
    pub splash: SplashMachine,
    pub search: ScopedStore<SearchState>,
    pub device_location: Option<Coordinate>,
    pub fallback_location: Coordinate,
    pub map_zoom: f32,
    pub status_message: String,
    graph: PhantomData<G>,
}

impl<G: SampleGraph> App<G> {
    /// Fresh state: root entry on the configured initial tab, splash shown.
    pub fn new(config: &ResolvedConfig) -> Result<Self, NavError> {
        let initial = initial_tab::<G>(config.initial_tab_for(G::APP));
        Ok(Self::from_parts(config, controller::<G>(initial)?, SplashMachine::new()))
    }

    /// Wraps an existing controller and splash machine.
    pub fn from_parts(
        config: &ResolvedConfig,
        nav: NavController<G::Tab>,
        splash: SplashMachine,
    ) -> Self {
        Self {
            nav,
            splash,
            search: ScopedStore::new(),
            device_location: config.device_location,
            fallback_location: config.fallback_location,
            map_zoom: config.map_zoom,
            status_message: String::new(),
            graph: PhantomData,
        }
    }

    /// Where the map should centre right now.
    pub fn camera_target(&self) -> CameraTarget {
        camera_target(self.device_location, self.fallback_location, self.map_zoom)
    }

    /// Whether the map is on screen: splash done, tabbed screen on top,
    /// map tab selected.
    pub fn map_visible(&self) -> bool {
        self.splash.is_completed()
            && self.nav.is_on_tab_host()
            && self.nav.selected_tab().is_some_and(<G::Tab as Tab>::shows_map)
    }

    /// Catalog of the tab selected on the visible tabbed screen. Empty when
    /// something else is on top.
    pub fn visible_catalog(&self) -> &'static [CatalogItem] {
        if !self.nav.is_on_tab_host() {
            return &[];
        }
        self.nav.selected_tab().map(G::catalog).unwrap_or(&[])
    }

    /// Search state of the nearest home entry, if it has been touched.
    pub fn home_search(&self) -> Option<&SearchState> {
        let home = self.nav.get_back_stack_entry(G::TAB_HOST).ok()?;
        self.search.get(home.id())
    }

    /// Search state of the nearest home entry, created on first use. Screens
    /// pushed above home (the calendar) edit home's state through this.
    pub fn home_search_mut(&mut self) -> Result<&mut SearchState, NavError> {
        let home = self.nav.get_back_stack_entry(G::TAB_HOST)?.id();
        Ok(self.search.get_or_insert_with(home, SearchState::default))
    }
}
