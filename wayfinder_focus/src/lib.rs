// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder Focus: roving focus for composite widgets.
//!
//! This crate models keyboard focus inside a composite widget (tab list, menu,
//! listbox, radio group, toolbar) as a combination of:
//! - **Navigation intents** ([`Navigation`]) such as [`Navigation::Next`] or
//!   [`Navigation::First`], derived from raw keys via [`keys::Orientation`].
//! - **Candidates** ([`FocusEntry`]) carrying an id, a label used by typeahead,
//!   and an enabled flag.
//! - Pluggable **policies** ([`FocusPolicy`]) that select the next active index
//!   given the current one, an intent, and a read-only view of candidates.
//! - A [`registry::FocusRegistry`] that owns the ordered candidates and the single
//!   active entry, and answers the roving-tabindex question: which entry gets
//!   `tabindex=0`.
//! - A [`typeahead::Typeahead`] buffer that jumps to items by label prefix.
//!
//! ## Minimal example
//!
//! ```rust
//! use wayfinder_focus::{FocusEntry, Navigation, WrapMode, compute_next};
//!
//! let items = vec![
//!     FocusEntry::new("cut", "Cut"),
//!     FocusEntry::new("copy", "Copy").disabled(),
//!     FocusEntry::new("paste", "Paste"),
//! ];
//!
//! // Next skips the disabled entry…
//! assert_eq!(compute_next(Some(0), Navigation::Next, &items, WrapMode::Wrap), Some(2));
//! // …and wraps from the last enabled entry back to the first.
//! assert_eq!(compute_next(Some(2), Navigation::Next, &items, WrapMode::Wrap), Some(0));
//! ```
//!
//! The registry applies the same rules while tracking the active entry:
//!
//! ```rust
//! use wayfinder_focus::{FocusEntry, Navigation, registry::FocusRegistry};
//!
//! let mut registry = FocusRegistry::new(vec![
//!     FocusEntry::new("one", "One"),
//!     FocusEntry::new("two", "Two"),
//! ]);
//! assert_eq!(registry.active_id(), Some(&"one"));
//! registry.navigate(Navigation::Prev);
//! assert_eq!(registry.active_id(), Some(&"two"));
//! assert_eq!(registry.tab_index(1), 0);
//! assert_eq!(registry.tab_index(0), -1);
//! ```
//!
//! The core types are generic over the id `K`, so callers can use string ids,
//! interned handles, or any small comparable value.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;

pub mod keys;
pub mod registry;
pub mod typeahead;

/// Linear navigation intent inside a composite widget.
///
/// Concrete widgets derive these from raw keys (see
/// [`keys::Orientation::navigation_for`]); policies interpret them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Move to the next enabled candidate (for example, ArrowDown in a menu).
    Next,
    /// Move to the previous enabled candidate.
    Prev,
    /// Move to the first enabled candidate (Home).
    First,
    /// Move to the last enabled candidate (End).
    Last,
}

/// Wrap mode configuration for linear traversal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Do not wrap; reaching either end yields no movement.
    Never,
    /// Wrap from the last enabled candidate to the first and vice versa.
    #[default]
    Wrap,
}

/// A single focusable candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusEntry<K> {
    /// Identifier for this entry.
    pub id: K,
    /// Visible label, used for typeahead matching.
    pub label: String,
    /// Whether this entry can receive focus.
    ///
    /// Disabled entries stay in the sequence (and keep `tabindex=-1`) but are
    /// skipped by every traversal.
    pub enabled: bool,
}

impl<K> FocusEntry<K> {
    /// Create an enabled entry.
    pub fn new(id: K, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            enabled: true,
        }
    }

    /// Mark this entry as disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Trait for linear traversal policies.
///
/// A policy receives the current active index (if any), a navigation intent, and
/// the ordered candidates, and returns the next active index. Returning `None`
/// means "no movement".
pub trait FocusPolicy<K> {
    /// Compute the next active index.
    fn next(&self, current: Option<usize>, direction: Navigation, items: &[FocusEntry<K>])
    -> Option<usize>;
}

/// Default linear policy: skip disabled entries and optionally wrap.
#[derive(Copy, Clone, Debug, Default)]
pub struct LinearPolicy {
    /// Wrap behavior at the sequence boundaries.
    pub wrap: WrapMode,
}

impl<K> FocusPolicy<K> for LinearPolicy {
    fn next(
        &self,
        current: Option<usize>,
        direction: Navigation,
        items: &[FocusEntry<K>],
    ) -> Option<usize> {
        compute_next(current, direction, items, self.wrap)
    }
}

/// Compute the next active index for a linear composite widget.
///
/// - Disabled entries are skipped.
/// - With [`WrapMode::Wrap`], `Next` from the last enabled entry returns the
///   first enabled entry and `Prev` from the first returns the last.
/// - With no current index, `Next`/`First` pick the first enabled entry and
///   `Prev`/`Last` pick the last one.
/// - If every entry is disabled the result is `None` and focus stays put.
pub fn compute_next<K>(
    current: Option<usize>,
    direction: Navigation,
    items: &[FocusEntry<K>],
    wrap: WrapMode,
) -> Option<usize> {
    let first = first_enabled(items)?;
    let last = last_enabled(items)?;
    // A stale index past the end behaves like "no current entry".
    let current = current.filter(|&i| i < items.len());

    match direction {
        Navigation::First => Some(first),
        Navigation::Last => Some(last),
        Navigation::Next => match current {
            None => Some(first),
            Some(i) => match items[i + 1..].iter().position(|e| e.enabled) {
                Some(offset) => Some(i + 1 + offset),
                None if wrap == WrapMode::Wrap => Some(first),
                None => None,
            },
        },
        Navigation::Prev => match current {
            None => Some(last),
            Some(i) => match items[..i].iter().rposition(|e| e.enabled) {
                Some(j) => Some(j),
                None if wrap == WrapMode::Wrap => Some(last),
                None => None,
            },
        },
    }
}

/// Index of the first enabled entry.
pub fn first_enabled<K>(items: &[FocusEntry<K>]) -> Option<usize> {
    items.iter().position(|e| e.enabled)
}

/// Index of the last enabled entry.
pub fn last_enabled<K>(items: &[FocusEntry<K>]) -> Option<usize> {
    items.iter().rposition(|e| e.enabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn entries(labels: &[&'static str]) -> Vec<FocusEntry<&'static str>> {
        labels.iter().map(|l| FocusEntry::new(*l, *l)).collect()
    }

    #[test]
    fn next_prev_with_wrap() {
        let items = entries(&["a", "b", "c"]);
        assert_eq!(compute_next(Some(0), Navigation::Next, &items, WrapMode::Wrap), Some(1));
        assert_eq!(compute_next(Some(2), Navigation::Next, &items, WrapMode::Wrap), Some(0));
        assert_eq!(compute_next(Some(0), Navigation::Prev, &items, WrapMode::Wrap), Some(2));
    }

    #[test]
    fn no_wrap_stops_at_edges() {
        let items = entries(&["a", "b"]);
        assert_eq!(compute_next(Some(1), Navigation::Next, &items, WrapMode::Never), None);
        assert_eq!(compute_next(Some(0), Navigation::Prev, &items, WrapMode::Never), None);
    }

    #[test]
    fn wrap_skips_disabled_at_both_ends() {
        let items = vec![
            FocusEntry::new(0, "zero").disabled(),
            FocusEntry::new(1, "one"),
            FocusEntry::new(2, "two"),
            FocusEntry::new(3, "three").disabled(),
        ];
        // ArrowDown on the last enabled item wraps to the first enabled one.
        assert_eq!(compute_next(Some(2), Navigation::Next, &items, WrapMode::Wrap), Some(1));
        // ArrowUp on the first enabled item wraps to the last enabled one.
        assert_eq!(compute_next(Some(1), Navigation::Prev, &items, WrapMode::Wrap), Some(2));
        assert_eq!(compute_next(None, Navigation::First, &items, WrapMode::Wrap), Some(1));
        assert_eq!(compute_next(None, Navigation::Last, &items, WrapMode::Wrap), Some(2));
    }

    #[test]
    fn all_disabled_means_no_movement() {
        let items = vec![FocusEntry::new(0, "a").disabled(), FocusEntry::new(1, "b").disabled()];
        for nav in [Navigation::Next, Navigation::Prev, Navigation::First, Navigation::Last] {
            assert_eq!(compute_next(Some(0), nav, &items, WrapMode::Wrap), None);
        }
    }

    #[test]
    fn stale_index_is_treated_as_absent() {
        let items = entries(&["a", "b"]);
        assert_eq!(compute_next(Some(9), Navigation::Next, &items, WrapMode::Wrap), Some(0));
        assert_eq!(compute_next(Some(9), Navigation::Prev, &items, WrapMode::Wrap), Some(1));
    }

    #[test]
    fn policy_delegates_to_compute_next() {
        let items = entries(&["a", "b"]);
        let policy = LinearPolicy { wrap: WrapMode::Never };
        assert_eq!(policy.next(Some(0), Navigation::Next, &items), Some(1));
        assert_eq!(policy.next(Some(1), Navigation::Next, &items), None);
    }
}
