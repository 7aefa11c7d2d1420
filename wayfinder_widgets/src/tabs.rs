// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tab list: horizontal roving focus with automatic or manual activation.

use wayfinder_focus::keys::{Key, KeyInput, Orientation};
use wayfinder_focus::{FocusEntry, Navigation};
use wayfinder_router::events::EventTarget;
use wayfinder_selection::Activation;
use wayfinder_selection::single::SingleSelection;

use crate::host::{Attr, Host, aria_bool};
use crate::roving::{RovingGroup, RovingKey};
use crate::widget::{Handled, Widget};

/// Event emitted when the selected tab changes.
pub const TABS_CHANGE: &str = "tabs-change";

/// Payload of [`TABS_CHANGE`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabsChange {
    /// Newly selected tab.
    pub id: String,
    /// Previously selected tab.
    pub previous: Option<String>,
}

/// A tab list.
#[derive(Debug)]
pub struct Tabs {
    roving: RovingGroup,
    selection: SingleSelection<String>,
    activation: Activation,
    events: EventTarget<TabsChange>,
}

impl Tabs {
    /// A tab list whose first enabled tab is selected.
    pub fn new(tabs: Vec<FocusEntry<String>>, activation: Activation) -> Self {
        let roving = RovingGroup::new(tabs, Orientation::Horizontal);
        let selection = match roving.active_id() {
            Some(id) => SingleSelection::with_value(id.to_string()),
            None => SingleSelection::new(),
        };
        Self {
            roving,
            selection,
            activation,
            events: EventTarget::new(),
        }
    }

    /// Activation mode.
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// The selected tab.
    pub fn selected(&self) -> Option<&str> {
        self.selection.value().map(String::as_str)
    }

    /// The tab holding the roving tab stop.
    pub fn active(&self) -> Option<&str> {
        self.roving.active_id()
    }

    /// Listeners for [`TABS_CHANGE`].
    pub fn events(&mut self) -> &mut EventTarget<TabsChange> {
        &mut self.events
    }

    /// Select `id`. Returns `false` for disabled or unknown tabs and when `id`
    /// is already selected.
    pub fn select(&mut self, host: &mut dyn Host, id: &str) -> bool {
        if !self.roving.set_active_id(id) {
            return false;
        }
        let Some(change) = self.selection.select(id.to_string()) else {
            return false;
        };
        tracing::debug!(tab = id, previous = ?change.previous, "tab selected");
        self.sync(host);
        self.events.emit(
            TABS_CHANGE,
            TabsChange {
                id: change.current,
                previous: change.previous,
            },
        );
        true
    }

    /// Focus left the tab list. The tab stop returns to the selected tab, so
    /// in manual mode re-entering lands on it rather than on the last tab
    /// visited.
    pub fn on_focus_out(&mut self, host: &mut dyn Host) {
        let Some(selected) = self.selection.value().cloned() else {
            return;
        };
        if self.roving.set_active_id(&selected) {
            self.roving.apply_tab_indices(host);
        }
    }

    fn sync(&self, host: &mut dyn Host) {
        self.roving.apply_tab_indices(host);
        for entry in self.roving.registry().items() {
            let selected = self.selection.is_selected(&entry.id);
            host.set_attribute(&entry.id, Attr::AriaSelected, aria_bool(selected));
        }
    }
}

impl Widget for Tabs {
    fn on_mount(&mut self, host: &mut dyn Host) {
        self.sync(host);
    }

    fn on_unmount(&mut self, _host: &mut dyn Host) {
        self.roving.reset_typeahead();
    }

    fn on_key(&mut self, host: &mut dyn Host, input: &KeyInput, now_ms: u64) -> Handled {
        match self.roving.handle_key(input, now_ms) {
            RovingKey::Moved => {
                self.roving.focus_active(host);
                if self.activation == Activation::Automatic {
                    self.activate(host);
                }
                Handled::Yes
            }
            RovingKey::Stayed => Handled::Yes,
            RovingKey::Ignored => match input.key {
                Key::Enter | Key::Space => {
                    self.activate(host);
                    Handled::Yes
                }
                Key::Tab => {
                    self.on_focus_out(host);
                    Handled::No
                }
                _ => Handled::No,
            },
        }
    }

    fn activate(&mut self, host: &mut dyn Host) {
        if let Some(id) = self.roving.active_id().map(str::to_string) {
            self.select(host, &id);
        }
    }

    fn focus_first(&mut self, host: &mut dyn Host) {
        self.roving.navigate(Navigation::First);
        self.roving.focus_active(host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wayfinder_router::events::{Event, Outcome};

    fn tabs(activation: Activation) -> (Tabs, MemoryHost, Rc<RefCell<Vec<TabsChange>>>) {
        let mut tabs = Tabs::new(
            vec![
                FocusEntry::new("overview".to_string(), "Overview"),
                FocusEntry::new("api".to_string(), "API").disabled(),
                FocusEntry::new("examples".to_string(), "Examples"),
            ],
            activation,
        );
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        tabs.events().add_listener(move |e: &mut Event<TabsChange>| {
            sink.borrow_mut().push(e.payload.clone());
            Outcome::Continue
        });
        let mut host = MemoryHost::with_nodes(["overview", "api", "examples"]);
        tabs.on_mount(&mut host);
        (tabs, host, log)
    }

    #[test]
    fn automatic_activation_selects_on_focus() {
        let (mut t, mut host, log) = tabs(Activation::Automatic);
        assert_eq!(host.attribute("overview", Attr::AriaSelected), Some("true"));
        t.on_key(&mut host, &Key::ArrowRight.into(), 0);
        assert_eq!(t.selected(), Some("examples"));
        assert_eq!(host.focused().as_deref(), Some("examples"));
        assert_eq!(host.attribute("overview", Attr::AriaSelected), Some("false"));
        assert_eq!(host.nodes_with(Attr::TabIndex, "0"), ["examples"]);
        assert_eq!(
            *log.borrow(),
            [TabsChange {
                id: "examples".into(),
                previous: Some("overview".into())
            }]
        );
    }

    #[test]
    fn manual_activation_waits_for_enter() {
        let (mut t, mut host, log) = tabs(Activation::Manual);
        t.on_key(&mut host, &Key::ArrowLeft.into(), 0);
        assert_eq!(t.active(), Some("examples"));
        assert_eq!(t.selected(), Some("overview"));
        assert!(log.borrow().is_empty());
        assert!(t.on_key(&mut host, &Key::Enter.into(), 0).is_handled());
        assert_eq!(t.selected(), Some("examples"));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn manual_tab_stop_returns_to_selected_on_focus_out() {
        let (mut t, mut host, _) = tabs(Activation::Manual);
        t.on_key(&mut host, &Key::ArrowRight.into(), 0);
        assert_eq!(host.nodes_with(Attr::TabIndex, "0"), ["examples"]);
        assert!(!t.on_key(&mut host, &Key::Tab.into(), 0).is_handled());
        assert_eq!(t.active(), Some("overview"));
        assert_eq!(host.nodes_with(Attr::TabIndex, "0"), ["overview"]);

        t.on_key(&mut host, &Key::ArrowRight.into(), 0);
        t.on_focus_out(&mut host);
        assert_eq!(host.nodes_with(Attr::TabIndex, "0"), ["overview"]);
        assert_eq!(t.selected(), Some("overview"));
    }

    #[test]
    fn reselecting_or_disabled_is_not_a_change() {
        let (mut t, mut host, log) = tabs(Activation::Automatic);
        assert!(!t.select(&mut host, "overview"));
        assert!(!t.select(&mut host, "api"));
        assert!(!t.on_key(&mut host, &Key::ArrowDown.into(), 0).is_handled());
        assert!(log.borrow().is_empty());
    }
}
