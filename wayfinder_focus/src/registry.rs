// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus registry: ordered candidates plus the single active entry.
//!
//! The registry owns the roving-tabindex invariant. At most one entry is
//! active, and [`FocusRegistry::tab_index`] returns `0` for that entry and `-1`
//! for every other one. Hosts apply those values to their nodes and then move
//! real focus to [`FocusRegistry::active_id`].

use alloc::vec::Vec;

use crate::{FocusEntry, FocusPolicy, LinearPolicy, Navigation, WrapMode, first_enabled};

/// Ordered focusable entries and the currently active one.
#[derive(Clone, Debug)]
pub struct FocusRegistry<K> {
    items: Vec<FocusEntry<K>>,
    active: Option<usize>,
    policy: LinearPolicy,
}

impl<K> Default for FocusRegistry<K> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            active: None,
            policy: LinearPolicy::default(),
        }
    }
}

impl<K: PartialEq> FocusRegistry<K> {
    /// Create a wrapping registry; the first enabled entry becomes active.
    pub fn new(items: Vec<FocusEntry<K>>) -> Self {
        Self::with_wrap(items, WrapMode::Wrap)
    }

    /// Create a registry with an explicit wrap mode.
    pub fn with_wrap(items: Vec<FocusEntry<K>>, wrap: WrapMode) -> Self {
        let active = first_enabled(&items);
        Self {
            items,
            active,
            policy: LinearPolicy { wrap },
        }
    }

    /// Replace the entries.
    ///
    /// The active id is preserved when it is still present and enabled;
    /// otherwise the first enabled entry becomes active.
    pub fn set_items(&mut self, items: Vec<FocusEntry<K>>) {
        let keep = self
            .active_id()
            .and_then(|id| items.iter().position(|e| e.enabled && &e.id == id));
        self.active = keep.or_else(|| first_enabled(&items));
        self.items = items;
    }

    /// The ordered entries.
    pub fn items(&self) -> &[FocusEntry<K>] {
        &self.items
    }

    /// Number of entries, enabled or not.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Wrap mode used by [`FocusRegistry::navigate`].
    pub fn wrap(&self) -> WrapMode {
        self.policy.wrap
    }

    /// Index of the active entry.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Id of the active entry.
    pub fn active_id(&self) -> Option<&K> {
        self.active.map(|i| &self.items[i].id)
    }

    /// The active entry.
    pub fn active_entry(&self) -> Option<&FocusEntry<K>> {
        self.active.map(|i| &self.items[i])
    }

    /// Index of the entry with `id`.
    pub fn index_of(&self, id: &K) -> Option<usize> {
        self.items.iter().position(|e| &e.id == id)
    }

    /// Make `index` active. Returns `false` (and changes nothing) for out of
    /// range or disabled entries.
    pub fn set_active(&mut self, index: usize) -> bool {
        match self.items.get(index) {
            Some(entry) if entry.enabled => {
                self.active = Some(index);
                true
            }
            _ => false,
        }
    }

    /// Make the entry with `id` active. Same rules as [`FocusRegistry::set_active`].
    pub fn set_active_id(&mut self, id: &K) -> bool {
        self.index_of(id).is_some_and(|i| self.set_active(i))
    }

    /// Enable or disable the entry with `id`.
    ///
    /// Disabling the active entry moves activity to the next enabled entry
    /// (wrapping), or clears it if nothing is enabled any more.
    pub fn set_enabled(&mut self, id: &K, enabled: bool) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        self.items[index].enabled = enabled;
        if !enabled && self.active == Some(index) {
            self.active =
                crate::compute_next(Some(index), Navigation::Next, &self.items, WrapMode::Wrap);
        } else if enabled && self.active.is_none() {
            self.active = Some(index);
        }
    }

    /// Apply a navigation intent. Returns `true` if the active entry changed.
    pub fn navigate(&mut self, direction: Navigation) -> bool {
        match self.policy.next(self.active, direction, &self.items) {
            Some(next) if Some(next) != self.active => {
                self.active = Some(next);
                true
            }
            _ => false,
        }
    }

    /// Roving tabindex for the entry at `index`: `0` for the active entry, `-1`
    /// otherwise (including out-of-range indices).
    pub fn tab_index(&self, index: usize) -> i32 {
        if self.active == Some(index) { 0 } else { -1 }
    }

    /// `(id, tabindex)` pairs for every entry in order.
    pub fn tab_indices(&self) -> impl Iterator<Item = (&K, i32)> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(|(i, e)| (&e.id, self.tab_index(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn registry() -> FocusRegistry<u32> {
        FocusRegistry::new(vec![
            FocusEntry::new(1, "One"),
            FocusEntry::new(2, "Two").disabled(),
            FocusEntry::new(3, "Three"),
        ])
    }

    fn zero_count(r: &FocusRegistry<u32>) -> usize {
        r.tab_indices().filter(|(_, t)| *t == 0).count()
    }

    #[test]
    fn exactly_one_tab_stop_through_navigation() {
        let mut r = registry();
        assert_eq!(zero_count(&r), 1);
        for nav in [Navigation::Next, Navigation::Next, Navigation::Prev, Navigation::Last] {
            r.navigate(nav);
            assert_eq!(zero_count(&r), 1);
        }
    }

    #[test]
    fn disabled_entries_cannot_become_active() {
        let mut r = registry();
        assert!(!r.set_active(1));
        assert!(!r.set_active(7));
        assert_eq!(r.active_id(), Some(&1));
        assert!(r.set_active_id(&3));
        assert_eq!(r.active_index(), Some(2));
    }

    #[test]
    fn set_items_preserves_surviving_active_id() {
        let mut r = registry();
        r.set_active_id(&3);
        r.set_items(vec![FocusEntry::new(3, "Three"), FocusEntry::new(4, "Four")]);
        assert_eq!(r.active_id(), Some(&3));
        r.set_items(vec![FocusEntry::new(5, "Five").disabled(), FocusEntry::new(6, "Six")]);
        assert_eq!(r.active_id(), Some(&6));
    }

    #[test]
    fn all_disabled_has_no_tab_stop() {
        let mut r = FocusRegistry::new(vec![FocusEntry::new(1, "a").disabled()]);
        assert_eq!(r.active_index(), None);
        assert!(!r.navigate(Navigation::Next));
        assert_eq!(zero_count(&r), 0);
    }

    #[test]
    fn disabling_active_entry_moves_activity() {
        let mut r = registry();
        r.set_enabled(&1, false);
        assert_eq!(r.active_id(), Some(&3));
        r.set_enabled(&3, false);
        assert_eq!(r.active_id(), None);
        r.set_enabled(&2, true);
        assert_eq!(r.active_id(), Some(&2));
    }
}
