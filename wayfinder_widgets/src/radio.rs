// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radio group: arrows move and check together, wrapping over enabled radios.

use wayfinder_focus::keys::{Key, KeyInput, Orientation};
use wayfinder_focus::{FocusEntry, Navigation};
use wayfinder_router::events::EventTarget;
use wayfinder_selection::single::SingleSelection;

use crate::host::{Attr, Host, aria_bool};
use crate::roving::{RovingGroup, RovingKey};
use crate::widget::{Handled, Widget};

/// Event emitted when the checked radio changes.
pub const RADIO_CHANGE: &str = "radio-change";

/// Payload of [`RADIO_CHANGE`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadioChange {
    /// Newly checked radio.
    pub id: String,
}

/// A radio group.
///
/// With nothing checked the first enabled radio is the tab stop; once a radio
/// is checked it keeps the tab stop.
#[derive(Debug)]
pub struct RadioGroup {
    roving: RovingGroup,
    selection: SingleSelection<String>,
    events: EventTarget<RadioChange>,
}

impl RadioGroup {
    /// A group with nothing checked.
    pub fn new(radios: Vec<FocusEntry<String>>) -> Self {
        Self {
            roving: RovingGroup::new(radios, Orientation::Both).without_typeahead(),
            selection: SingleSelection::new(),
            events: EventTarget::new(),
        }
    }

    /// A group with `value` checked, if it names an enabled radio.
    pub fn with_value(radios: Vec<FocusEntry<String>>, value: &str) -> Self {
        let mut group = Self::new(radios);
        if group.roving.set_active_id(value) {
            group.selection = SingleSelection::with_value(value.to_string());
        }
        group
    }

    /// The checked radio.
    pub fn value(&self) -> Option<&str> {
        self.selection.value().map(String::as_str)
    }

    /// Listeners for [`RADIO_CHANGE`].
    pub fn events(&mut self) -> &mut EventTarget<RadioChange> {
        &mut self.events
    }

    /// Check `id`. Returns `false` for disabled, unknown, or already checked radios.
    pub fn check(&mut self, host: &mut dyn Host, id: &str) -> bool {
        if !self.roving.set_active_id(id) {
            return false;
        }
        if self.selection.select(id.to_string()).is_none() {
            return false;
        }
        tracing::debug!(radio = id, "radio checked");
        self.sync(host);
        self.events.emit(RADIO_CHANGE, RadioChange { id: id.to_string() });
        true
    }

    fn sync(&self, host: &mut dyn Host) {
        self.roving.apply_tab_indices(host);
        for entry in self.roving.registry().items() {
            let checked = self.selection.is_selected(&entry.id);
            host.set_attribute(&entry.id, Attr::AriaChecked, aria_bool(checked));
        }
    }
}

impl Widget for RadioGroup {
    fn on_mount(&mut self, host: &mut dyn Host) {
        self.sync(host);
    }

    fn on_unmount(&mut self, _host: &mut dyn Host) {}

    fn on_key(&mut self, host: &mut dyn Host, input: &KeyInput, now_ms: u64) -> Handled {
        match self.roving.handle_key(input, now_ms) {
            RovingKey::Moved => {
                self.roving.focus_active(host);
                self.activate(host);
                Handled::Yes
            }
            RovingKey::Stayed => Handled::Yes,
            RovingKey::Ignored if input.key == Key::Space => {
                self.activate(host);
                Handled::Yes
            }
            RovingKey::Ignored => Handled::No,
        }
    }

    fn activate(&mut self, host: &mut dyn Host) {
        if let Some(id) = self.roving.active_id().map(str::to_string) {
            self.check(host, &id);
        }
    }

    fn focus_first(&mut self, host: &mut dyn Host) {
        if self.selection.value().is_none() {
            self.roving.navigate(Navigation::First);
        }
        self.roving.focus_active(host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn radios() -> Vec<FocusEntry<String>> {
        vec![
            FocusEntry::new("small".to_string(), "Small"),
            FocusEntry::new("medium".to_string(), "Medium").disabled(),
            FocusEntry::new("large".to_string(), "Large"),
        ]
    }

    #[test]
    fn arrows_move_and_check_with_wrap() {
        let mut host = MemoryHost::with_nodes(["small", "medium", "large"]);
        let mut g = RadioGroup::with_value(radios(), "small");
        g.on_mount(&mut host);
        g.on_key(&mut host, &Key::ArrowDown.into(), 0);
        assert_eq!(g.value(), Some("large"));
        assert_eq!(host.attribute("large", Attr::AriaChecked), Some("true"));
        assert_eq!(host.attribute("small", Attr::AriaChecked), Some("false"));
        g.on_key(&mut host, &Key::ArrowRight.into(), 0);
        assert_eq!(g.value(), Some("small"));
        assert_eq!(host.focused().as_deref(), Some("small"));
        assert_eq!(host.nodes_with(Attr::TabIndex, "0"), ["small"]);
    }

    #[test]
    fn space_checks_the_focused_radio() {
        let mut host = MemoryHost::with_nodes(["small", "medium", "large"]);
        let mut g = RadioGroup::new(radios());
        let changes = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = changes.clone();
        g.events().add_listener(move |_| {
            counter.set(counter.get() + 1);
            wayfinder_router::events::Outcome::Continue
        });
        g.focus_first(&mut host);
        assert_eq!(g.value(), None);
        g.on_key(&mut host, &Key::Space.into(), 0);
        g.on_key(&mut host, &Key::Space.into(), 0);
        assert_eq!(g.value(), Some("small"));
        assert_eq!(changes.get(), 1);
        assert!(!g.check(&mut host, "medium"));
    }
}
