// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-select value tracking (tabs, radio groups, activity bars).

/// A change reported by [`SingleSelection::select`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionChange<K> {
    /// Value before the change.
    pub previous: Option<K>,
    /// Value after the change.
    pub current: K,
}

/// Holds at most one selected value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleSelection<K> {
    value: Option<K>,
}

impl<K> Default for SingleSelection<K> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<K: Clone + PartialEq> SingleSelection<K> {
    /// Nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `value` selected.
    pub fn with_value(value: K) -> Self {
        Self { value: Some(value) }
    }

    /// The selected value.
    pub fn value(&self) -> Option<&K> {
        self.value.as_ref()
    }

    /// Whether `candidate` is the selected value.
    pub fn is_selected(&self, candidate: &K) -> bool {
        self.value.as_ref() == Some(candidate)
    }

    /// Select `value`, deselecting the previous one.
    ///
    /// Returns `None` when `value` was already selected.
    pub fn select(&mut self, value: K) -> Option<SelectionChange<K>> {
        if self.is_selected(&value) {
            return None;
        }
        let previous = self.value.replace(value.clone());
        Some(SelectionChange {
            previous,
            current: value,
        })
    }

    /// Clear the selection, returning the old value.
    pub fn clear(&mut self) -> Option<K> {
        self.value.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_replaces_previous() {
        let mut s = SingleSelection::with_value("overview");
        let change = s.select("api").unwrap();
        assert_eq!(change.previous, Some("overview"));
        assert_eq!(change.current, "api");
        assert!(s.is_selected(&"api"));
        assert!(!s.is_selected(&"overview"));
    }

    #[test]
    fn reselecting_is_not_a_change() {
        let mut s = SingleSelection::new();
        assert!(s.select(1).is_some());
        assert!(s.select(1).is_none());
        assert_eq!(s.clear(), Some(1));
        assert_eq!(s.value(), None);
    }
}
