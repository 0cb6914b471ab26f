//! # Tab Machine
//!
//! Lateral navigation inside one tabbed screen. States are the tabs of a
//! closed enum; every tab is reachable from every other in one step.
//!
//! ```text
//!   Sleep ◄──► Eat ◄──► Here
//!     ▲                  ▲
//!     └──────────────────┘
//! ```
//!
//! Reselecting the active tab does not change state, but the change record is
//! still produced (with `reselected = true`) so observers can replay entry
//! animations.

use std::fmt;

/// Duration of the tab content slide/fade, in milliseconds.
pub const TAB_ANIMATION_MS: u64 = 600;

/// A closed set of tabs for one tabbed screen.
pub trait Tab: Copy + Eq + fmt::Debug + Send + 'static {
    /// Every tab, in display order.
    const ALL: &'static [Self];

    /// Tab selected when the screen is first shown.
    fn initial() -> Self;

    fn title(self) -> &'static str;

    /// Nested route of the tab's content, e.g. `home/feed`.
    fn route(self) -> &'static str;

    /// Whether the tab's content is the map.
    fn shows_map(self) -> bool {
        false
    }

    fn ordinal(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Short identifier: the last segment of the nested route (`feed`).
    fn key(self) -> &'static str {
        let route = self.route();
        route.rsplit('/').next().unwrap_or(route)
    }

    /// Looks a tab up by key, title (both case-insensitive) or nested route.
    fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| {
            t.key().eq_ignore_ascii_case(name)
                || t.title().eq_ignore_ascii_case(name)
                || t.route() == name
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    Left,
    Right,
}

/// Record of one `select` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabChange<T> {
    pub from: T,
    pub to: T,
    pub reselected: bool,
}

impl<T: Tab> TabChange<T> {
    /// Content slides left when moving to a later tab, right otherwise.
    pub fn direction(&self) -> SlideDirection {
        if self.from.ordinal() < self.to.ordinal() {
            SlideDirection::Left
        } else {
            SlideDirection::Right
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabMachine<T> {
    selected: T,
}

impl<T: Tab> Default for TabMachine<T> {
    fn default() -> Self {
        Self::new(T::initial())
    }
}

impl<T: Tab> TabMachine<T> {
    pub fn new(initial: T) -> Self {
        Self { selected: initial }
    }

    pub fn selected(&self) -> T {
        self.selected
    }

    pub fn select(&mut self, tab: T) -> TabChange<T> {
        let change = TabChange {
            from: self.selected,
            to: tab,
            reselected: self.selected == tab,
        };
        self.selected = tab;
        change
    }
}
