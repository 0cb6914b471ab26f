//! # Sample Navigation Graphs
//!
//! Each sample app is a `SampleGraph`: the routes it registers, the tabs of
//! its home screen, the catalog each tab lists, and what tapping an item
//! does. The core knows nothing about either app; everything app-specific
//! is here.
//!
//! ```text
//! Crane                               Jetsnack
//! home (tabs: Sleep│Eat│Here)         home (tabs: Home│Search│My Cart│Profile)
//! ├── calendar                        └── snack/{snackId}?origin={origin}
//! └── details/{itemId}
//! ```

pub mod crane;
pub mod jetsnack;

pub use crane::{Crane, CraneScreen};
pub use jetsnack::{HomeSection, Jetsnack};

use std::sync::Arc;

use log::warn;

use crate::SampleApp;
use crate::core::controller::NavController;
use crate::core::entry::{EntryId, NavigationEntry};
use crate::core::error::NavError;
use crate::core::route::{Params, RouteRegistry};
use crate::core::tabs::Tab;

/// One row in a tab's list. Held by the data layer; navigation only ever
/// carries `id` or `slug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: i64,
    pub slug: &'static str,
    pub name: &'static str,
    pub subtitle: &'static str,
}

pub trait SampleGraph: 'static {
    type Tab: Tab;

    const APP: SampleApp;
    const ROOT_ROUTE: &'static str;
    /// Route whose entries own a tab machine.
    const TAB_HOST: &'static str;
    /// Route of the date picker, for graphs that have one.
    const CALENDAR_ROUTE: Option<&'static str> = None;

    /// Builds the route registry. Called once at start-up.
    fn registry() -> Result<RouteRegistry, NavError>;

    /// Items listed under `tab`. Empty for tabs that show something else.
    fn catalog(tab: Self::Tab) -> &'static [CatalogItem];

    /// Navigates for a tap on `item`, listed under `tab`, on entry `from`.
    /// Returns `Ok(None)` when the tap was dropped.
    fn open_item(
        nav: &mut NavController<Self::Tab>,
        from: EntryId,
        tab: Self::Tab,
        item: &CatalogItem,
    ) -> Result<Option<NavigationEntry>, NavError>;

    /// Heading for an entry that is not the tab host.
    fn screen_title(entry: &NavigationEntry) -> String {
        entry.route().to_string()
    }
}

/// Resolves a configured tab name, falling back to the graph's default.
pub fn initial_tab<G: SampleGraph>(configured: Option<&str>) -> G::Tab {
    match configured {
        None => G::Tab::initial(),
        Some(name) => G::Tab::parse(name).unwrap_or_else(|| {
            warn!("Unknown initial tab '{}' for {:?}, using default", name, G::APP);
            G::Tab::initial()
        }),
    }
}

/// A fresh controller for `G`: root entry on top, tab machine attached.
pub fn controller<G: SampleGraph>(initial: G::Tab) -> Result<NavController<G::Tab>, NavError> {
    let registry = Arc::new(G::registry()?);
    NavController::new(registry, G::ROOT_ROUTE, Params::new())?.with_tab_host(G::TAB_HOST, initial)
}

/// Looks up a catalog item by id across all tabs.
pub fn find_item<G: SampleGraph>(id: i64) -> Option<&'static CatalogItem> {
    G::Tab::ALL
        .iter()
        .flat_map(|&tab| G::catalog(tab).iter())
        .find(|item| item.id == id)
}

/// Looks up a catalog item by slug across all tabs.
pub fn find_item_by_slug<G: SampleGraph>(slug: &str) -> Option<&'static CatalogItem> {
    G::Tab::ALL
        .iter()
        .flat_map(|&tab| G::catalog(tab).iter())
        .find(|item| item.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_tab_from_config() {
        assert_eq!(initial_tab::<Crane>(Some("eat")), CraneScreen::Eat);
        assert_eq!(initial_tab::<Crane>(None), CraneScreen::Here);
        assert_eq!(initial_tab::<Jetsnack>(Some("bogus")), HomeSection::Feed);
    }

    #[test]
    fn test_controller_starts_at_root_with_tabs() {
        let nav = controller::<Jetsnack>(HomeSection::Cart).unwrap();
        assert_eq!(nav.current_entry().route(), Jetsnack::ROOT_ROUTE);
        assert_eq!(nav.selected_tab(), Some(HomeSection::Cart));
    }

    #[test]
    fn test_find_item() {
        assert_eq!(find_item::<Jetsnack>(3).map(|i| i.name), Some("Eclair"));
        assert!(find_item::<Jetsnack>(999).is_none());
        assert_eq!(
            find_item_by_slug::<Crane>("madrid").map(|i| i.name),
            Some("Madrid, Spain")
        );
    }
}
