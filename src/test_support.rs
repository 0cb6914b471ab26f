//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::core::controller::{NavController, NavEvent};
use crate::core::route::{ParamKind, Params, Route, RouteRegistry};
use crate::core::tabs::Tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    First,
    Second,
    Third,
}

impl Tab for Pane {
    const ALL: &'static [Self] = &[Pane::First, Pane::Second, Pane::Third];

    fn initial() -> Self {
        Pane::First
    }

    fn title(self) -> &'static str {
        match self {
            Pane::First => "First",
            Pane::Second => "Second",
            Pane::Third => "Third",
        }
    }

    fn route(self) -> &'static str {
        match self {
            Pane::First => "home/first",
            Pane::Second => "home/second",
            Pane::Third => "home/third",
        }
    }
}

/// `home` (tabbed root), `list`, and `detail/{itemId}?origin={origin}`.
pub fn test_registry() -> RouteRegistry {
    let mut registry = RouteRegistry::new();
    registry.register(Route::new("home")).unwrap();
    registry.register(Route::new("list")).unwrap();
    registry
        .register(
            Route::new("detail")
                .required("itemId", ParamKind::Int)
                .optional("origin", ParamKind::Str),
        )
        .unwrap();
    registry
}

/// A controller rooted at `home`, with `home` as the tab host.
pub fn test_controller() -> NavController<Pane> {
    NavController::new(Arc::new(test_registry()), "home", Params::new())
        .unwrap()
        .with_tab_host("home", Pane::initial())
        .unwrap()
}

/// Subscribes a recorder and returns the shared event log.
pub fn recorded(nav: &mut NavController<Pane>) -> Rc<RefCell<Vec<NavEvent<Pane>>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    nav.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}
