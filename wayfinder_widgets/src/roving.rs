// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roving tabindex for a flat list of host nodes.
//!
//! [`RovingGroup`] joins a [`FocusRegistry`] and an optional [`Typeahead`]
//! buffer and applies the result to a [`Host`]: the active item gets
//! `tabindex=0`, every other item `-1`, and focus follows the active item.

use wayfinder_focus::keys::{Key, KeyInput, Orientation};
use wayfinder_focus::registry::FocusRegistry;
use wayfinder_focus::typeahead::Typeahead;
use wayfinder_focus::{FocusEntry, Navigation, WrapMode};

use crate::host::{Attr, Host};

/// Result of feeding a key to a [`RovingGroup`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RovingKey {
    /// The active item changed.
    Moved,
    /// The key was a navigation or typeahead key but nothing moved.
    Stayed,
    /// The key is not for the group.
    Ignored,
}

/// Ordered items of a composite widget with one roving tab stop.
#[derive(Clone, Debug)]
pub struct RovingGroup {
    registry: FocusRegistry<String>,
    typeahead: Option<Typeahead>,
    orientation: Orientation,
}

impl RovingGroup {
    /// A wrapping group with typeahead.
    pub fn new(items: Vec<FocusEntry<String>>, orientation: Orientation) -> Self {
        Self {
            registry: FocusRegistry::new(items),
            typeahead: Some(Typeahead::new()),
            orientation,
        }
    }

    /// Set the wrap mode.
    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        let items = self.registry.items().to_vec();
        let active = self.registry.active_index();
        self.registry = FocusRegistry::with_wrap(items, wrap);
        if let Some(active) = active {
            self.registry.set_active(active);
        }
        self
    }

    /// Use a specific typeahead buffer.
    pub fn with_typeahead(mut self, typeahead: Typeahead) -> Self {
        self.typeahead = Some(typeahead);
        self
    }

    /// Disable typeahead (radio groups, result lists fed by a text field).
    pub fn without_typeahead(mut self) -> Self {
        self.typeahead = None;
        self
    }

    /// The underlying registry.
    pub fn registry(&self) -> &FocusRegistry<String> {
        &self.registry
    }

    /// The layout axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Id of the active item.
    pub fn active_id(&self) -> Option<&str> {
        self.registry.active_id().map(String::as_str)
    }

    /// Replace the items, keeping the active id when it survives.
    pub fn set_items(&mut self, items: Vec<FocusEntry<String>>) {
        self.registry.set_items(items);
        self.reset_typeahead();
    }

    /// Make `id` active without touching the host.
    pub fn set_active_id(&mut self, id: &str) -> bool {
        self.registry.set_active_id(&id.to_string())
    }

    /// Apply a navigation intent without touching the host.
    pub fn navigate(&mut self, navigation: Navigation) -> bool {
        self.registry.navigate(navigation)
    }

    /// Whether a typeahead query is in progress at `now_ms`.
    pub fn typeahead_active(&self, now_ms: u64) -> bool {
        self.typeahead.as_ref().is_some_and(|t| t.is_active(now_ms))
    }

    /// Drop any pending typeahead query.
    pub fn reset_typeahead(&mut self) {
        if let Some(typeahead) = &mut self.typeahead {
            typeahead.reset();
        }
    }

    /// Interpret arrows, Home/End, and typeahead characters.
    ///
    /// Escape resets the typeahead buffer and is reported as
    /// [`RovingKey::Ignored`] so the widget can also act on it. Space only
    /// counts as typeahead while a query is in progress.
    pub fn handle_key(&mut self, input: &KeyInput, now_ms: u64) -> RovingKey {
        if input.key == Key::Escape {
            self.reset_typeahead();
            return RovingKey::Ignored;
        }
        if input.has_command_modifier() {
            return RovingKey::Ignored;
        }
        if let Some(navigation) = self.orientation.navigation_for(input.key) {
            return if self.registry.navigate(navigation) {
                RovingKey::Moved
            } else {
                RovingKey::Stayed
            };
        }
        let Some(ch) = input.typeahead_char() else {
            return RovingKey::Ignored;
        };
        if ch == ' ' && !self.typeahead_active(now_ms) {
            return RovingKey::Ignored;
        }
        let current = self.registry.active_index();
        let Some(typeahead) = &mut self.typeahead else {
            return RovingKey::Ignored;
        };
        match typeahead.push(ch, now_ms, current, self.registry.items()) {
            Some(index) if Some(index) != current => {
                self.registry.set_active(index);
                RovingKey::Moved
            }
            _ => RovingKey::Stayed,
        }
    }

    /// Write roving `tabindex` values for every item.
    pub fn apply_tab_indices(&self, host: &mut dyn Host) {
        for (id, tab_index) in self.registry.tab_indices() {
            host.set_attribute(id, Attr::TabIndex, if tab_index == 0 { "0" } else { "-1" });
        }
    }

    /// Write `tabindex` values and move focus to the active item.
    pub fn focus_active(&self, host: &mut dyn Host) {
        self.apply_tab_indices(host);
        if let Some(id) = self.active_id()
            && !host.focus(id)
        {
            tracing::warn!(id, "active item is not connected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn group() -> RovingGroup {
        RovingGroup::new(
            vec![
                FocusEntry::new("alpha".to_string(), "Alpha"),
                FocusEntry::new("bravo".to_string(), "Bravo"),
                FocusEntry::new("beta".to_string(), "Beta").disabled(),
                FocusEntry::new("charlie".to_string(), "Charlie"),
            ],
            Orientation::Vertical,
        )
    }

    #[test]
    fn one_tab_stop_and_focus_follow_navigation() {
        let mut host = MemoryHost::with_nodes(["alpha", "bravo", "beta", "charlie"]);
        let mut g = group();
        for key in [Key::ArrowDown, Key::ArrowDown, Key::ArrowDown, Key::ArrowUp, Key::End] {
            g.handle_key(&key.into(), 0);
            g.focus_active(&mut host);
            assert_eq!(host.nodes_with(Attr::TabIndex, "0").len(), 1);
            assert_eq!(host.focused().as_deref(), g.active_id());
        }
        assert_eq!(g.active_id(), Some("charlie"));
    }

    #[test]
    fn wraps_and_skips_disabled() {
        let mut g = group();
        g.handle_key(&Key::End.into(), 0);
        assert_eq!(g.handle_key(&Key::ArrowDown.into(), 0), RovingKey::Moved);
        assert_eq!(g.active_id(), Some("alpha"));
        g.set_active_id("bravo");
        g.handle_key(&Key::ArrowDown.into(), 0);
        assert_eq!(g.active_id(), Some("charlie"));
    }

    #[test]
    fn typeahead_space_and_cross_axis_keys() {
        let mut g = group();
        assert_eq!(g.handle_key(&Key::Space.into(), 0), RovingKey::Ignored);
        assert_eq!(g.handle_key(&Key::ArrowRight.into(), 0), RovingKey::Ignored);
        assert_eq!(g.handle_key(&Key::Character('c').into(), 10), RovingKey::Moved);
        assert_eq!(g.active_id(), Some("charlie"));
        assert_eq!(g.handle_key(&Key::Character('b').into(), 2_000), RovingKey::Moved);
        assert_eq!(g.active_id(), Some("bravo"));
        assert!(g.typeahead_active(2_100));
        assert_eq!(g.handle_key(&Key::Escape.into(), 2_100), RovingKey::Ignored);
        assert!(!g.typeahead_active(2_100));
    }

    #[test]
    fn without_typeahead_ignores_characters() {
        let mut g = group().without_typeahead();
        assert_eq!(g.handle_key(&Key::Character('c').into(), 0), RovingKey::Ignored);
        assert_eq!(g.active_id(), Some("alpha"));
    }

    #[test]
    fn no_wrap_stays_at_the_end() {
        let mut g = group().with_wrap(WrapMode::Never);
        g.handle_key(&Key::End.into(), 0);
        assert_eq!(g.handle_key(&Key::ArrowDown.into(), 0), RovingKey::Stayed);
        assert_eq!(g.active_id(), Some("charlie"));
    }
}
