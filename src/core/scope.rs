//! # Entry-Scoped State
//!
//! Screen state that lives exactly as long as one back-stack entry. A child
//! screen that needs its parent's state looks the parent up with
//! `get_back_stack_entry` and reads the scope keyed by that entry's id,
//! instead of creating a second copy.
//!
//! ```text
//! stack:  [home #0] [calendar #4]
//! scopes: { #0: SearchState { people: 2, .. } }
//!                      ▲
//! calendar ── get_back_stack_entry("home") ──┘
//! ```

use std::collections::HashMap;

use crate::core::entry::EntryId;

#[derive(Debug)]
pub struct ScopedStore<S> {
    scopes: HashMap<EntryId, S>,
}

impl<S> Default for ScopedStore<S> {
    fn default() -> Self {
        Self {
            scopes: HashMap::new(),
        }
    }
}

impl<S> ScopedStore<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entry: EntryId) -> Option<&S> {
        self.scopes.get(&entry)
    }

    pub fn get_or_insert_with(&mut self, entry: EntryId, init: impl FnOnce() -> S) -> &mut S {
        self.scopes.entry(entry).or_insert_with(init)
    }

    /// Drops every scope whose entry is not in `live`. Returns how many went.
    pub fn prune(&mut self, live: impl IntoIterator<Item = EntryId>) -> usize {
        let live: Vec<EntryId> = live.into_iter().collect();
        let before = self.scopes.len();
        self.scopes.retain(|id, _| live.contains(id));
        before - self.scopes.len()
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
