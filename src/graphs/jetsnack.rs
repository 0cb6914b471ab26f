//! # Jetsnack
//!
//! Food ordering. The home screen hosts a bottom bar of four sections and
//! opens on the feed. Tapping a snack pushes `snack/{snackId}?origin=...`
//! with a shared-element token so the snack image can fly from the list
//! into the detail header. A second tap that lands after the first has
//! already navigated is dropped.

use crate::SampleApp;
use crate::core::controller::NavController;
use crate::core::entry::{EntryId, NavigationEntry};
use crate::core::error::NavError;
use crate::core::route::{ParamKind, Route, RouteRegistry};
use crate::core::tabs::Tab;
use crate::core::transition::ORIGIN_PARAM;
use crate::graphs::{CatalogItem, SampleGraph, find_item};

pub const HOME_ROUTE: &str = "home";
pub const SNACK_DETAIL_ROUTE: &str = "snack";
pub const SNACK_ID_KEY: &str = "snackId";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeSection {
    Feed,
    Search,
    Cart,
    Profile,
}

impl Tab for HomeSection {
    const ALL: &'static [Self] = &[
        HomeSection::Feed,
        HomeSection::Search,
        HomeSection::Cart,
        HomeSection::Profile,
    ];

    fn initial() -> Self {
        HomeSection::Feed
    }

    fn title(self) -> &'static str {
        match self {
            HomeSection::Feed => "Home",
            HomeSection::Search => "Search",
            HomeSection::Cart => "My Cart",
            HomeSection::Profile => "Profile",
        }
    }

    fn route(self) -> &'static str {
        match self {
            HomeSection::Feed => "home/feed",
            HomeSection::Search => "home/search",
            HomeSection::Cart => "home/cart",
            HomeSection::Profile => "home/profile",
        }
    }
}

const fn snack(id: i64, slug: &'static str, name: &'static str) -> CatalogItem {
    CatalogItem {
        id,
        slug,
        name,
        subtitle: "A tag line",
    }
}

const FEED: &[CatalogItem] = &[
    snack(1, "cupcake", "Cupcake"),
    snack(2, "donut", "Donut"),
    snack(3, "eclair", "Eclair"),
    snack(4, "froyo", "Froyo"),
    snack(5, "gingerbread", "Gingerbread"),
    snack(6, "honeycomb", "Honeycomb"),
    snack(7, "ice-cream-sandwich", "Ice Cream Sandwich"),
    snack(8, "jellybean", "Jellybean"),
    snack(9, "kitkat", "KitKat"),
    snack(10, "lollipop", "Lollipop"),
];

const SEARCH: &[CatalogItem] = &[
    snack(11, "marshmallow", "Marshmallow"),
    snack(12, "nougat", "Nougat"),
    snack(13, "oreo", "Oreo"),
    snack(14, "pie", "Pie"),
    snack(15, "chips", "Chips"),
    snack(16, "pretzels", "Pretzels"),
];

const CART: &[CatalogItem] = &[
    snack(4, "froyo", "Froyo"),
    snack(6, "honeycomb", "Honeycomb"),
    snack(8, "jellybean", "Jellybean"),
];

pub struct Jetsnack;

impl SampleGraph for Jetsnack {
    type Tab = HomeSection;

    const APP: SampleApp = SampleApp::Jetsnack;
    const ROOT_ROUTE: &'static str = HOME_ROUTE;
    const TAB_HOST: &'static str = HOME_ROUTE;

    fn registry() -> Result<RouteRegistry, NavError> {
        let mut registry = RouteRegistry::new();
        registry.register(Route::new(HOME_ROUTE))?;
        registry.register(
            Route::new(SNACK_DETAIL_ROUTE)
                .required(SNACK_ID_KEY, ParamKind::Int)
                .optional(ORIGIN_PARAM, ParamKind::Str),
        )?;
        Ok(registry)
    }

    fn catalog(tab: HomeSection) -> &'static [CatalogItem] {
        match tab {
            HomeSection::Feed => FEED,
            HomeSection::Search => SEARCH,
            HomeSection::Cart => CART,
            HomeSection::Profile => &[],
        }
    }

    fn open_item(
        nav: &mut NavController<HomeSection>,
        from: EntryId,
        tab: HomeSection,
        item: &CatalogItem,
    ) -> Result<Option<NavigationEntry>, NavError> {
        nav.navigate_to_item(from, SNACK_DETAIL_ROUTE, SNACK_ID_KEY, item.id, tab.key())
    }

    fn screen_title(entry: &NavigationEntry) -> String {
        match entry.route() {
            SNACK_DETAIL_ROUTE => entry
                .int(SNACK_ID_KEY)
                .and_then(find_item::<Jetsnack>)
                .map(|item| item.name.to_string())
                .unwrap_or_else(|| entry.path().to_string()),
            other => other.to_string(),
        }
    }
}
