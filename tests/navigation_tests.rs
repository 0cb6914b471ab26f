//! End-to-end navigation behavior through the public API.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use navgraph::core::action::{Action, Effect, update};
use navgraph::core::config::ResolvedConfig;
use navgraph::core::splash::{SplashMachine, SplashState};
use navgraph::core::state::App;
use navgraph::core::tabs::{SlideDirection, Tab};
use navgraph::core::{
    NavController, NavError, NavEvent, ParamKind, ParamValue, Params, Route, RouteRegistry, params,
};
use navgraph::graphs::crane::{CALENDAR_ROUTE, HOME_ROUTE};
use navgraph::graphs::{Crane, CraneScreen, HomeSection, Jetsnack, SampleGraph, controller};

fn registry() -> Arc<RouteRegistry> {
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
    Arc::new(registry)
}

fn nav() -> NavController<HomeSection> {
    NavController::new(registry(), "home", Params::new())
        .unwrap()
        .with_tab_host("home", HomeSection::Feed)
        .unwrap()
}

#[test]
fn test_navigate_pushes_one_entry_on_top() {
    let mut nav = nav();
    let before = nav.depth();
    let entry = nav.navigate("detail", params([("itemId", 7_i64)])).unwrap();
    assert_eq!(nav.depth(), before + 1);
    assert_eq!(nav.current_entry(), &entry);
}

#[test]
fn test_back_at_root_is_a_no_op() {
    let mut nav = nav();
    assert_eq!(nav.back(), None);
    assert_eq!(nav.depth(), 1);
    assert_eq!(nav.current_entry().route(), "home");
}

#[test]
fn test_depth_never_drops_below_one() {
    let mut nav = nav();
    let script = ["list", "back", "back", "list", "list", "back", "back", "back", "back"];
    for step in script {
        if step == "back" {
            nav.back();
        } else {
            nav.navigate(step, Params::new()).unwrap();
        }
        assert!(nav.depth() >= 1);
    }
    assert_eq!(nav.depth(), 1);
}

#[test]
fn test_selecting_same_tab_twice_notifies_twice() {
    let mut nav = nav();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    nav.subscribe(move |e: &NavEvent<HomeSection>| sink.borrow_mut().push(e.clone()));

    nav.navigate_to_tab(HomeSection::Cart).unwrap();
    nav.navigate_to_tab(HomeSection::Cart).unwrap();

    assert_eq!(nav.selected_tab(), Some(HomeSection::Cart));
    let events = events.borrow();
    assert_eq!(events.len(), 2);
    assert_ne!(events[0], events[1]);
}

#[test]
fn test_splash_dismiss_is_idempotent() {
    let mut splash = SplashMachine::new();
    let notified = Rc::new(RefCell::new(0));
    let count = notified.clone();
    splash.subscribe(move |_| *count.borrow_mut() += 1);

    assert_eq!(splash.state(), SplashState::Shown);
    assert!(splash.dismiss());
    assert_eq!(splash.state(), SplashState::Completed);
    assert!(!splash.dismiss());
    assert_eq!(splash.state(), SplashState::Completed);
    assert_eq!(*notified.borrow(), 1);
}

#[test]
fn test_missing_required_param_is_rejected() {
    let mut nav = nav();
    assert_eq!(
        nav.navigate("detail", Params::new()),
        Err(NavError::MissingParameter {
            route: "detail".into(),
            param: "itemId".into(),
        })
    );
    assert_eq!(nav.depth(), 1);
}

#[test]
fn test_back_stack_entry_finds_home_below_detail() {
    let mut nav = nav();
    let home = nav.current_entry().clone();
    nav.navigate("list", Params::new()).unwrap();
    nav.navigate("detail", params([("itemId", 1_i64)])).unwrap();
    assert_eq!(nav.get_back_stack_entry("home"), Ok(&home));
}

#[test]
fn test_back_stack_entry_returns_most_recent_duplicate() {
    let mut nav = nav();
    nav.navigate(
        "detail",
        params([
            ("itemId", ParamValue::from(1_i64)),
            ("origin", ParamValue::from("feed")),
        ]),
    )
    .unwrap();
    let second = nav
        .navigate(
            "detail",
            params([
                ("itemId", ParamValue::from(2_i64)),
                ("origin", ParamValue::from("search")),
            ]),
        )
        .unwrap();
    let found = nav.get_back_stack_entry("detail").unwrap();
    assert_eq!(found, &second);
    assert_eq!(found.int("itemId"), Some(2));
    assert_eq!(found.str("origin"), Some("search"));
}

#[test]
fn test_crane_details_path_reopens_same_destination() {
    let mut app = App::<Crane>::new(&ResolvedConfig::default()).unwrap();
    update(&mut app, Action::SplashTimeout).unwrap();
    update(&mut app, Action::SelectTab(CraneScreen::Sleep)).unwrap();
    let home = app.nav.current_entry().id();
    update(&mut app, Action::OpenItem { from: home, index: 0 }).unwrap();
    let details = app.nav.current_entry().clone();

    let reopened = app.nav.navigate_path(details.path()).unwrap();
    assert_eq!(reopened.route(), details.route());
    assert_eq!(reopened.params(), details.params());

    // A slug that would split the path is refused up front
    assert!(matches!(
        app.nav.navigate("details", params([("itemId", "khumbu/valley")])),
        Err(NavError::InvalidParameter { .. })
    ));
}

#[test]
fn test_unknown_route_is_rejected() {
    let mut nav = nav();
    assert_eq!(
        nav.navigate("settings", Params::new()),
        Err(NavError::UnknownRoute("settings".into()))
    );
}

#[test]
fn test_tab_slide_direction_follows_order() {
    let mut nav = controller::<Crane>(CraneScreen::Sleep).unwrap();
    assert_eq!(
        nav.navigate_to_tab(CraneScreen::Here).unwrap().direction(),
        SlideDirection::Left
    );
    assert_eq!(
        nav.navigate_to_tab(CraneScreen::Eat).unwrap().direction(),
        SlideDirection::Right
    );
}

#[test]
fn test_jetsnack_snack_tap_correlates_and_duplicate_is_dropped() {
    let mut app = App::<Jetsnack>::new(&ResolvedConfig::default()).unwrap();
    update(&mut app, Action::SplashTimeout).unwrap();
    let home = app.nav.current_entry().id();

    update(&mut app, Action::OpenItem { from: home, index: 2 }).unwrap();
    update(&mut app, Action::OpenItem { from: home, index: 2 }).unwrap();
    assert_eq!(app.nav.depth(), 2);

    let detail = app.nav.current_entry().clone();
    assert_eq!(detail.path(), "snack/3?origin=feed");
    assert!(app.nav.transition_for(&detail).is_correlated());

    // Back to the list, then a deep link to the same snack animates plainly
    update(&mut app, Action::Back).unwrap();
    update(&mut app, Action::OpenPath("snack/3?origin=feed".into())).unwrap();
    let linked = app.nav.current_entry().clone();
    assert!(!app.nav.transition_for(&linked).is_correlated());
}

#[test]
fn test_crane_calendar_shares_home_search() {
    let mut app = App::<Crane>::new(&ResolvedConfig::default()).unwrap();
    let effect = update(&mut app, Action::SplashTimeout).unwrap();
    assert!(matches!(effect, Effect::CenterMap(_)));

    update(&mut app, Action::OpenCalendar).unwrap();
    assert_eq!(app.nav.current_entry().route(), CALENDAR_ROUTE);
    update(&mut app, Action::ChangePeople(2)).unwrap();

    let home = app.nav.get_back_stack_entry(HOME_ROUTE).unwrap().id();
    assert_eq!(app.search.get(home).map(|s| s.people), Some(3));

    assert_eq!(update(&mut app, Action::Back).unwrap(), Effect::SaveSession);
    assert_eq!(update(&mut app, Action::Back).unwrap(), Effect::BackAtRoot);
}

#[test]
fn test_every_graph_route_is_reachable() {
    fn check<G: SampleGraph>() {
        let registry = G::registry().unwrap();
        assert!(registry.resolve(G::ROOT_ROUTE).is_ok());
        assert!(registry.resolve(G::TAB_HOST).is_ok());
        for tab in G::Tab::ALL {
            assert_eq!(G::Tab::parse(tab.key()), Some(*tab));
        }
    }
    check::<Crane>();
    check::<Jetsnack>();
}
