//! # Crane
//!
//! Travel booking. The home screen is tabbed (`Sleep`, `Eat`, `Here`) and
//! opens on `Here`, the map. The calendar is pushed on top of home and
//! edits home's search state through `get_back_stack_entry("home")`.
//! Tapping an explore item opens its details plainly; Crane has no
//! shared-element transitions.

use crate::SampleApp;
use crate::core::controller::NavController;
use crate::core::entry::{EntryId, NavigationEntry};
use crate::core::error::NavError;
use crate::core::route::{ParamKind, Route, RouteRegistry, params};
use crate::core::tabs::Tab;
use crate::graphs::{CatalogItem, SampleGraph, find_item_by_slug};

pub const HOME_ROUTE: &str = "home";
pub const CALENDAR_ROUTE: &str = "calendar";
pub const DETAILS_ROUTE: &str = "details";
pub const ITEM_ID_PARAM: &str = "itemId";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraneScreen {
    Sleep,
    Eat,
    Here,
}

impl Tab for CraneScreen {
    const ALL: &'static [Self] = &[CraneScreen::Sleep, CraneScreen::Eat, CraneScreen::Here];

    fn initial() -> Self {
        CraneScreen::Here
    }

    fn title(self) -> &'static str {
        match self {
            CraneScreen::Sleep => "Sleep",
            CraneScreen::Eat => "Eat",
            CraneScreen::Here => "Here",
        }
    }

    fn route(self) -> &'static str {
        match self {
            CraneScreen::Sleep => "home/sleep",
            CraneScreen::Eat => "home/eat",
            CraneScreen::Here => "home/here",
        }
    }

    fn shows_map(self) -> bool {
        self == CraneScreen::Here
    }
}

const fn item(id: i64, slug: &'static str, name: &'static str, subtitle: &'static str) -> CatalogItem {
    CatalogItem {
        id,
        slug,
        name,
        subtitle,
    }
}

const HOTELS: &[CatalogItem] = &[
    item(101, "khumbu-valley", "Khumbu Valley, Nepal", "1 Available Property"),
    item(102, "madrid", "Madrid, Spain", "2 Available Properties"),
    item(103, "bali", "Bali, Indonesia", "3 Available Properties"),
    item(104, "rome", "Rome, Italy", "4 Available Properties"),
    item(105, "granada", "Granada, Spain", "5 Available Properties"),
    item(106, "maldives", "Maldives", "6 Available Properties"),
    item(107, "washington-dc", "Washington D.C.", "7 Available Properties"),
    item(108, "barcelona", "Barcelona, Spain", "8 Available Properties"),
    item(109, "crete", "Crete, Greece", "9 Available Properties"),
];

const RESTAURANTS: &[CatalogItem] = &[
    item(201, "khumbu-valley", "Khumbu Valley, Nepal", "1286 Restaurants"),
    item(202, "madrid", "Madrid, Spain", "2241 Restaurants"),
    item(203, "bali", "Bali, Indonesia", "876 Restaurants"),
    item(204, "rome", "Rome, Italy", "118 Restaurants"),
    item(205, "granada", "Granada, Spain", "3113 Restaurants"),
    item(206, "maldives", "Maldives", "4364 Restaurants"),
    item(207, "washington-dc", "Washington D.C.", "2987 Restaurants"),
    item(208, "barcelona", "Barcelona, Spain", "784 Restaurants"),
    item(209, "crete", "Crete, Greece", "1112 Restaurants"),
];

pub struct Crane;

impl SampleGraph for Crane {
    type Tab = CraneScreen;

    const APP: SampleApp = SampleApp::Crane;
    const ROOT_ROUTE: &'static str = HOME_ROUTE;
    const TAB_HOST: &'static str = HOME_ROUTE;
    const CALENDAR_ROUTE: Option<&'static str> = Some(CALENDAR_ROUTE);

    fn registry() -> Result<RouteRegistry, NavError> {
        let mut registry = RouteRegistry::new();
        registry.register(Route::new(HOME_ROUTE))?;
        registry.register(Route::new(CALENDAR_ROUTE))?;
        registry.register(Route::new(DETAILS_ROUTE).required(ITEM_ID_PARAM, ParamKind::Str))?;
        Ok(registry)
    }

    fn catalog(tab: CraneScreen) -> &'static [CatalogItem] {
        match tab {
            CraneScreen::Sleep => HOTELS,
            CraneScreen::Eat => RESTAURANTS,
            CraneScreen::Here => &[],
        }
    }

    fn open_item(
        nav: &mut NavController<CraneScreen>,
        _from: EntryId,
        _tab: CraneScreen,
        item: &CatalogItem,
    ) -> Result<Option<NavigationEntry>, NavError> {
        nav.navigate(DETAILS_ROUTE, params([(ITEM_ID_PARAM, item.slug)]))
            .map(Some)
    }

    fn screen_title(entry: &NavigationEntry) -> String {
        match entry.route() {
            CALENDAR_ROUTE => "Select Dates".to_string(),
            DETAILS_ROUTE => entry
                .str(ITEM_ID_PARAM)
                .and_then(find_item_by_slug::<Crane>)
                .map(|item| item.name.to_string())
                .unwrap_or_else(|| entry.path().to_string()),
            other => other.to_string(),
        }
    }
}
