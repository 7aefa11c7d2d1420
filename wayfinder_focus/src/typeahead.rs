// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typeahead: jump to an item by typing the start of its label.
//!
//! Printable keystrokes accumulate in a buffer that is discarded after an idle
//! timeout. Matching is a case-insensitive prefix match over enabled entries,
//! wrapping around the end of the list.
//!
//! ## Repeat policy
//!
//! When the buffer consists of one character repeated (`"b"`, `"bb"`, …) each
//! press cycles to the next entry starting with that character, beginning after
//! the active entry. With a single matching entry this stays put. A buffer with
//! distinct characters (`"br"`) searches from the active entry inclusive, so
//! refining a match does not skip it.
//!
//! ```rust
//! use wayfinder_focus::FocusEntry;
//! use wayfinder_focus::typeahead::Typeahead;
//!
//! let items = vec![
//!     FocusEntry::new(0, "Alpha"),
//!     FocusEntry::new(1, "Bravo"),
//!     FocusEntry::new(2, "Charlie"),
//! ];
//! let mut typeahead = Typeahead::new();
//! assert_eq!(typeahead.push('b', 1_000, Some(0), &items), Some(1));
//! // A second "b" inside the timeout has no other match and stays on Bravo.
//! assert_eq!(typeahead.push('b', 1_200, Some(1), &items), Some(1));
//! ```
//!
//! Time is supplied by the caller as a millisecond timestamp, so the buffer is
//! deterministic under test and needs no clock.

use alloc::string::String;
use smallvec::SmallVec;

use crate::FocusEntry;

/// Tunables for [`Typeahead`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TypeaheadConfig {
    /// Idle time after which the buffer resets, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for TypeaheadConfig {
    fn default() -> Self {
        Self { timeout_ms: 500 }
    }
}

/// Typeahead buffer state for one widget instance.
#[derive(Clone, Debug, Default)]
pub struct Typeahead {
    buffer: SmallVec<[char; 16]>,
    last_input: Option<u64>,
    config: TypeaheadConfig,
}

impl Typeahead {
    /// Create a buffer with the default 500 ms timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with explicit configuration.
    pub fn with_config(config: TypeaheadConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> TypeaheadConfig {
        self.config
    }

    /// Current (lower-cased) buffer contents.
    pub fn query(&self) -> String {
        self.buffer.iter().collect()
    }

    /// Whether a non-expired buffer exists at `now`.
    ///
    /// Widgets use this to decide whether Space extends the query or activates.
    pub fn is_active(&self, now: u64) -> bool {
        !self.buffer.is_empty() && !self.expired(now)
    }

    /// Drop the buffer (Escape, blur, or item list replacement).
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_input = None;
    }

    /// Feed one character and return the index of the matching entry.
    ///
    /// Returns `None` when nothing matches; the buffer still keeps the
    /// character so a longer prefix can be typed. Leading whitespace is
    /// ignored and not recorded.
    pub fn push<K>(
        &mut self,
        ch: char,
        now: u64,
        current: Option<usize>,
        items: &[FocusEntry<K>],
    ) -> Option<usize> {
        if self.expired(now) {
            self.buffer.clear();
        }
        if ch.is_whitespace() && self.buffer.is_empty() {
            return None;
        }
        self.buffer.extend(ch.to_lowercase());
        self.last_input = Some(now);

        if items.is_empty() {
            return None;
        }
        let current = current.filter(|&i| i < items.len());
        let first = self.buffer[0];
        if self.buffer.iter().all(|&c| c == first) {
            let start = current.map_or(0, |i| i + 1);
            find_from(items, start, &[first])
        } else {
            find_from(items, current.unwrap_or(0), &self.buffer)
        }
    }

    fn expired(&self, now: u64) -> bool {
        self.last_input
            .is_some_and(|last| now.saturating_sub(last) > self.config.timeout_ms)
    }
}

/// First enabled entry at or after `start` (wrapping) whose label starts with
/// `prefix`, ignoring case.
fn find_from<K>(items: &[FocusEntry<K>], start: usize, prefix: &[char]) -> Option<usize> {
    let len = items.len();
    (0..len)
        .map(|offset| (start + offset) % len)
        .find(|&i| items[i].enabled && starts_with_ignore_case(&items[i].label, prefix))
}

fn starts_with_ignore_case(label: &str, prefix: &[char]) -> bool {
    let mut lowered = label.chars().flat_map(char::to_lowercase);
    prefix.iter().all(|p| lowered.next() == Some(*p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn items(labels: &[&str]) -> Vec<FocusEntry<usize>> {
        labels
            .iter()
            .enumerate()
            .map(|(i, l)| FocusEntry::new(i, *l))
            .collect()
    }

    #[test]
    fn repeated_letter_cycles_through_matches() {
        let list = items(&["Apple", "Banana", "Blueberry", "Cherry"]);
        let mut t = Typeahead::new();
        assert_eq!(t.push('b', 0, Some(0), &list), Some(1));
        assert_eq!(t.push('b', 100, Some(1), &list), Some(2));
        assert_eq!(t.push('b', 200, Some(2), &list), Some(1));
    }

    #[test]
    fn distinct_letters_refine_in_place() {
        let list = items(&["Banana", "Blueberry", "Bluebell"]);
        let mut t = Typeahead::new();
        assert_eq!(t.push('b', 0, None, &list), Some(0));
        assert_eq!(t.push('l', 50, Some(0), &list), Some(1));
        assert_eq!(t.push('u', 100, Some(1), &list), Some(1));
        assert_eq!(t.query(), "blu");
    }

    #[test]
    fn buffer_resets_after_timeout() {
        let list = items(&["Alpha", "Bravo", "Charlie"]);
        let mut t = Typeahead::new();
        assert_eq!(t.push('a', 0, None, &list), Some(0));
        assert!(t.is_active(400));
        assert!(!t.is_active(501));
        // After the timeout "c" starts a new query instead of "ac".
        assert_eq!(t.push('c', 900, Some(0), &list), Some(2));
        assert_eq!(t.query(), "c");
    }

    #[test]
    fn matching_ignores_case_and_skips_disabled() {
        let mut list = items(&["delta", "Dog", "dune"]);
        list[1].enabled = false;
        let mut t = Typeahead::new();
        assert_eq!(t.push('D', 0, Some(0), &list), Some(2));
    }

    #[test]
    fn leading_space_is_not_recorded() {
        let list = items(&["New file", "New folder"]);
        let mut t = Typeahead::new();
        assert_eq!(t.push(' ', 0, None, &list), None);
        assert_eq!(t.query(), "");
        t.push('n', 10, None, &list);
        t.push('e', 20, Some(0), &list);
        t.push('w', 30, Some(0), &list);
        t.push(' ', 40, Some(0), &list);
        assert_eq!(t.push('f', 50, Some(0), &list), Some(0));
        assert_eq!(t.push('o', 60, Some(0), &list), Some(1));
    }

    #[test]
    fn no_match_keeps_buffer() {
        let list = items(&["Alpha"]);
        let mut t = Typeahead::new();
        assert_eq!(t.push('z', 0, Some(0), &list), None);
        assert_eq!(t.query(), "z");
        t.reset();
        assert_eq!(t.query(), "");
        assert!(!t.is_active(0));
    }

    #[test]
    fn empty_list_never_matches() {
        let list: Vec<FocusEntry<usize>> = vec![];
        let mut t = Typeahead::new();
        assert_eq!(t.push('a', 0, None, &list), None);
    }
}
