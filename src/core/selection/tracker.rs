//! Selection tracker
//!
//! Holds the identifiers checked for a bulk visit plan. Every operation is
//! idempotent.

use crate::domain::MeterId;
use std::collections::BTreeSet;

/// Set of selected meter identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<MeterId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id`; returns false if it was already selected
    pub fn add(&mut self, id: MeterId) -> bool {
        self.ids.insert(id)
    }

    /// Removes `id`; returns false if it was not selected
    pub fn remove(&mut self, id: MeterId) -> bool {
        self.ids.remove(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selects every visible id, or deselects them all when they are already selected
    pub fn toggle_all(&mut self, visible: &[MeterId]) {
        if !visible.is_empty() && visible.iter().all(|id| self.ids.contains(id)) {
            for id in visible {
                self.ids.remove(id);
            }
        } else {
            self.ids.extend(visible.iter().copied());
        }
    }

    /// Flips the selection state of every visible id
    pub fn invert(&mut self, visible: &[MeterId]) {
        for id in visible {
            if !self.ids.remove(id) {
                self.ids.insert(*id);
            }
        }
    }

    pub fn contains(&self, id: MeterId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = MeterId> + '_ {
        self.ids.iter().copied()
    }
}
