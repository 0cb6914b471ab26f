//! # Navigation Entries
//!
//! One `NavigationEntry` exists per visit to a route. Two visits to the same
//! route are two entries with distinct `EntryId`s, which is what lets
//! per-instance state (selected tab, scoped screen state) live alongside
//! the stack without aliasing.

use std::fmt;

use crate::core::route::{ParamValue, Params};
use crate::core::transition::SharedElementToken;

/// Process-unique identity of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    id: EntryId,
    route: String,
    params: Params,
    path: String,
    shared_element: Option<SharedElementToken>,
}

impl NavigationEntry {
    pub(crate) fn new(
        id: EntryId,
        route: String,
        params: Params,
        path: String,
        shared_element: Option<SharedElementToken>,
    ) -> Self {
        Self {
            id,
            route,
            params,
            path,
            shared_element,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Concrete path of this entry, e.g. `snack/3?origin=feed`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.param(name).and_then(ParamValue::as_int)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.param(name).and_then(ParamValue::as_str)
    }

    /// Token minted when this entry was reached through a list-item tap.
    pub fn shared_element(&self) -> Option<&SharedElementToken> {
        self.shared_element.as_ref()
    }
}
