//! # Back Stack
//!
//! The root entry is stored apart from the entries pushed above it, so the
//! stack cannot be empty: there is no operation that removes the root.

use crate::core::entry::NavigationEntry;

#[derive(Debug, Clone)]
pub struct NavigationStack {
    root: NavigationEntry,
    above: Vec<NavigationEntry>,
}

impl NavigationStack {
    pub fn new(root: NavigationEntry) -> Self {
        Self {
            root,
            above: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: NavigationEntry) {
        self.above.push(entry);
    }

    /// Removes the top entry. Returns `None` (and does nothing) at the root.
    pub fn pop(&mut self) -> Option<NavigationEntry> {
        self.above.pop()
    }

    pub fn top(&self) -> &NavigationEntry {
        self.above.last().unwrap_or(&self.root)
    }

    pub fn root(&self) -> &NavigationEntry {
        &self.root
    }

    pub fn depth(&self) -> usize {
        self.above.len() + 1
    }

    /// Entries back-to-front; the last item is the visible one.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &NavigationEntry> {
        std::iter::once(&self.root).chain(self.above.iter())
    }

    /// Nearest entry for `route`, scanning from the top down.
    pub fn nearest(&self, route: &str) -> Option<&NavigationEntry> {
        self.iter().rev().find(|e| e.route() == route)
    }
}
