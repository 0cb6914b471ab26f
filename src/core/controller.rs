//! # Navigation Controller
//!
//! Owns the back stack, the tab machine of every tabbed entry on it, and the
//! live shared-element token. All mutation goes through here, and every
//! mutation notifies observers before returning.
//!
//! ```text
//! NavController<T>
//! ├── registry: Arc<RouteRegistry>          // read-only after start-up
//! ├── stack: NavigationStack                // root + pushed entries
//! ├── tab_host: Option<String>              // route whose entries own tabs
//! ├── tabs: HashMap<EntryId, TabMachine<T>> // one machine per host entry
//! ├── active_transition: Option<Token>      // at most one live token
//! └── observers: Observers<NavEvent<T>>
//! ```
//!
//! Any push or pop supersedes the live shared-element token. The token is
//! discarded (and observers told) before the new top is announced, so a
//! renderer never applies a stale item-to-detail animation.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::core::entry::{EntryId, NavigationEntry};
use crate::core::error::NavError;
use crate::core::observer::{ObserverId, Observers};
use crate::core::route::{ParamValue, Params, RouteRegistry, params};
use crate::core::stack::NavigationStack;
use crate::core::tabs::{Tab, TabChange, TabMachine};
use crate::core::transition::{ORIGIN_PARAM, SharedElementToken, TransitionDecision, correlate};

/// What observers are told after each mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent<T> {
    /// A new entry is on top.
    Pushed(NavigationEntry),
    /// `removed` was popped; `current` is now on top.
    Popped {
        removed: NavigationEntry,
        current: NavigationEntry,
    },
    /// The tab machine of `host` ran `select`. Fired for reselects too.
    TabSelected { host: EntryId, change: TabChange<T> },
    /// A shared-element token ran to completion.
    TransitionCompleted(SharedElementToken),
    /// A shared-element token was cancelled or superseded.
    TransitionDiscarded(SharedElementToken),
}

#[derive(Debug)]
pub struct NavController<T: Tab> {
    registry: Arc<RouteRegistry>,
    stack: NavigationStack,
    tab_host: Option<String>,
    initial_tab: T,
    tabs: HashMap<EntryId, TabMachine<T>>,
    active_transition: Option<SharedElementToken>,
    next_id: u64,
    observers: Observers<NavEvent<T>>,
}

impl<T: Tab> NavController<T> {
    /// Creates a controller whose stack holds a single root entry.
    pub fn new(
        registry: Arc<RouteRegistry>,
        root_route: &str,
        root_params: Params,
    ) -> Result<Self, NavError> {
        let path = {
            let route = registry.resolve(root_route)?;
            route.validate(&root_params)?;
            route.format_path(&root_params)
        };
        let root = NavigationEntry::new(
            EntryId(0),
            root_route.to_string(),
            root_params,
            path,
            None,
        );
        debug!("Navigation root: {}", root.path());
        Ok(Self {
            registry,
            stack: NavigationStack::new(root),
            tab_host: None,
            initial_tab: T::initial(),
            tabs: HashMap::new(),
            active_transition: None,
            next_id: 1,
            observers: Observers::default(),
        })
    }

    /// Declares `route` as the tabbed screen. Every entry of that route,
    /// including ones already on the stack, gets a tab machine starting on
    /// `initial`.
    pub fn with_tab_host(mut self, route: &str, initial: T) -> Result<Self, NavError> {
        self.registry.resolve(route)?;
        self.tab_host = Some(route.to_string());
        self.initial_tab = initial;
        let hosts: Vec<EntryId> = self
            .stack
            .iter()
            .filter(|e| e.route() == route)
            .map(|e| e.id())
            .collect();
        for id in hosts {
            self.tabs.insert(id, TabMachine::new(initial));
        }
        Ok(self)
    }

    pub fn registry(&self) -> &Arc<RouteRegistry> {
        &self.registry
    }

    // ========================================================================
    // Stack operations
    // ========================================================================

    /// Validates `params` against `route_id` and pushes a new entry.
    pub fn navigate(&mut self, route_id: &str, params: Params) -> Result<NavigationEntry, NavError> {
        self.push_entry(route_id, params, None)
    }

    /// Parses a deep-link path (`snack/3?origin=feed`) and navigates to it.
    pub fn navigate_path(&mut self, path: &str) -> Result<NavigationEntry, NavError> {
        let (route, parsed) = self.registry.match_path(path)?;
        let route_id = route.id().to_string();
        self.navigate(&route_id, parsed)
    }

    /// Navigates to an item's detail route and mints a shared-element token
    /// for the transition.
    ///
    /// `from` is the entry the tap happened on. If it is no longer on top the
    /// tap is a duplicate of one already handled and `Ok(None)` is returned
    /// without touching the stack.
    pub fn navigate_to_item(
        &mut self,
        from: EntryId,
        route_id: &str,
        item_param: &str,
        item_id: impl Into<ParamValue>,
        origin: &str,
    ) -> Result<Option<NavigationEntry>, NavError> {
        if self.current_entry().id() != from {
            debug!("Dropping item tap from {from}: no longer on top");
            return Ok(None);
        }
        let item_id = item_id.into();
        let token = SharedElementToken::mint(item_param, item_id.clone(), origin);
        let item_params = params([
            (item_param, item_id),
            (ORIGIN_PARAM, ParamValue::from(origin)),
        ]);
        self.push_entry(route_id, item_params, Some(token)).map(Some)
    }

    /// Pops the top entry and returns the entry now on top.
    /// At the root this does nothing and returns `None`.
    pub fn back(&mut self) -> Option<NavigationEntry> {
        let removed = self.stack.pop()?;
        self.tabs.remove(&removed.id());
        self.discard_transition();
        let current = self.stack.top().clone();
        debug!(
            "Popped {} {} (depth {})",
            removed.id(),
            removed.path(),
            self.stack.depth()
        );
        self.observers.notify(&NavEvent::Popped {
            removed,
            current: current.clone(),
        });
        Some(current)
    }

    pub fn current_entry(&self) -> &NavigationEntry {
        self.stack.top()
    }

    /// Nearest entry for `route_id`, scanning from the top of the stack.
    pub fn get_back_stack_entry(&self, route_id: &str) -> Result<&NavigationEntry, NavError> {
        self.stack
            .nearest(route_id)
            .ok_or_else(|| NavError::RouteNotOnStack(route_id.to_string()))
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Entries back-to-front.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &NavigationEntry> {
        self.stack.iter()
    }

    fn push_entry(
        &mut self,
        route_id: &str,
        params: Params,
        token: Option<SharedElementToken>,
    ) -> Result<NavigationEntry, NavError> {
        let path = {
            let route = self.registry.resolve(route_id)?;
            route.validate(&params)?;
            route.format_path(&params)
        };
        let id = EntryId(self.next_id);
        self.next_id += 1;
        let entry = NavigationEntry::new(id, route_id.to_string(), params, path, token.clone());

        self.discard_transition();
        self.active_transition = token;

        if self.tab_host.as_deref() == Some(route_id) {
            self.tabs.insert(id, TabMachine::new(self.initial_tab));
        }
        self.stack.push(entry.clone());
        debug!(
            "Pushed {} {} (depth {})",
            entry.id(),
            entry.path(),
            self.stack.depth()
        );
        self.observers.notify(&NavEvent::Pushed(entry.clone()));
        Ok(entry)
    }

    // ========================================================================
    // Tabs
    // ========================================================================

    /// Selects `tab` on the nearest tabbed entry. The stack is untouched.
    pub fn navigate_to_tab(&mut self, tab: T) -> Result<TabChange<T>, NavError> {
        let host_route = self.tab_host.clone().ok_or(NavError::NoTabHost)?;
        let host = self.get_back_stack_entry(&host_route)?.id();
        let initial = self.initial_tab;
        let change = self
            .tabs
            .entry(host)
            .or_insert_with(|| TabMachine::new(initial))
            .select(tab);
        debug!(
            "Tab {:?} → {:?} on {host}{}",
            change.from,
            change.to,
            if change.reselected { " (reselect)" } else { "" }
        );
        self.observers.notify(&NavEvent::TabSelected { host, change });
        Ok(change)
    }

    /// Selected tab of the nearest tabbed entry.
    pub fn selected_tab(&self) -> Option<T> {
        let host = self.tab_host.as_deref()?;
        let entry = self.stack.nearest(host)?;
        self.tab_for(entry.id())
    }

    pub fn tab_for(&self, entry: EntryId) -> Option<T> {
        self.tabs.get(&entry).map(TabMachine::selected)
    }

    /// Whether the visible entry is the tabbed screen.
    pub fn is_on_tab_host(&self) -> bool {
        self.tab_host.as_deref() == Some(self.current_entry().route())
    }

    // ========================================================================
    // Shared-element transitions
    // ========================================================================

    pub fn active_transition(&self) -> Option<&SharedElementToken> {
        self.active_transition.as_ref()
    }

    pub fn transition_for(&self, entry: &NavigationEntry) -> TransitionDecision {
        correlate(self.active_transition.as_ref(), entry)
    }

    /// Marks the live transition finished and drops its token.
    pub fn complete_transition(&mut self) -> Option<SharedElementToken> {
        let token = self.active_transition.take()?;
        debug!("Shared-element transition completed: {}", token.origin());
        self.observers
            .notify(&NavEvent::TransitionCompleted(token.clone()));
        Some(token)
    }

    /// Cancels the live transition, if any.
    pub fn discard_transition(&mut self) -> Option<SharedElementToken> {
        let token = self.active_transition.take()?;
        debug!("Shared-element transition discarded: {}", token.origin());
        self.observers
            .notify(&NavEvent::TransitionDiscarded(token.clone()));
        Some(token)
    }

    // ========================================================================
    // Observers
    // ========================================================================

    pub fn subscribe(&mut self, callback: impl FnMut(&NavEvent<T>) + 'static) -> ObserverId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }
}
