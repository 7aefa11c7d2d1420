// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Application shell: an activity bar driving the primary sidebar, plus a
//! secondary sidebar overlay.
//!
//! Activating a different view selects it and shows the primary sidebar.
//! Activating the selected view again toggles the primary sidebar. The
//! secondary sidebar behaves like any overlay: it captures the focused element
//! when it opens and returns focus there when it closes.

use wayfinder_event_state::overlay::{CloseReason, OpenTrigger, OverlayState};
use wayfinder_focus::keys::{Key, KeyInput, Orientation};
use wayfinder_focus::{FocusEntry, Navigation};
use wayfinder_router::events::EventTarget;
use wayfinder_selection::single::SingleSelection;

use crate::host::{Attr, Host, aria_bool, return_focus};
use crate::roving::{RovingGroup, RovingKey};
use crate::widget::{Handled, Widget};

/// Event emitted for every shell layout change.
pub const SHELL_CHANGE: &str = "shell-change";

/// Payload of [`SHELL_CHANGE`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellChange {
    /// A different activity view was selected.
    View {
        /// Selected view.
        id: String,
    },
    /// The primary sidebar was shown or hidden.
    PrimarySidebar {
        /// Whether it is now visible.
        open: bool,
    },
    /// The secondary sidebar was shown or hidden.
    SecondarySidebar {
        /// Whether it is now visible.
        open: bool,
    },
}

/// The shell layout state.
#[derive(Debug)]
pub struct Shell {
    activity: RovingGroup,
    view: SingleSelection<String>,
    primary_open: bool,
    secondary: String,
    secondary_toggle: Option<String>,
    secondary_overlay: OverlayState<String>,
    events: EventTarget<ShellChange>,
}

impl Shell {
    /// A shell whose first enabled activity is selected with the primary
    /// sidebar visible. `secondary` is the secondary sidebar's host id.
    pub fn new(activities: Vec<FocusEntry<String>>, secondary: impl Into<String>) -> Self {
        let activity = RovingGroup::new(activities, Orientation::Vertical);
        let view = match activity.active_id() {
            Some(id) => SingleSelection::with_value(id.to_string()),
            None => SingleSelection::new(),
        };
        Self {
            activity,
            view,
            primary_open: true,
            secondary: secondary.into(),
            secondary_toggle: None,
            secondary_overlay: OverlayState::new(),
            events: EventTarget::new(),
        }
    }

    /// The host node that toggles the secondary sidebar. Pointer presses on
    /// it are not outside presses.
    #[must_use]
    pub fn with_secondary_toggle(mut self, toggle: impl Into<String>) -> Self {
        self.secondary_toggle = Some(toggle.into());
        self
    }

    /// The selected activity view.
    pub fn view(&self) -> Option<&str> {
        self.view.value().map(String::as_str)
    }

    /// Whether the primary sidebar is visible.
    pub fn primary_open(&self) -> bool {
        self.primary_open
    }

    /// Whether the secondary sidebar is visible.
    pub fn secondary_open(&self) -> bool {
        self.secondary_overlay.is_visible()
    }

    /// Listeners for [`SHELL_CHANGE`].
    pub fn events(&mut self) -> &mut EventTarget<ShellChange> {
        &mut self.events
    }

    /// Activate the activity `id`.
    pub fn activate_view(&mut self, host: &mut dyn Host, id: &str) -> bool {
        if !self.activity.set_active_id(id) {
            return false;
        }
        if self.view.select(id.to_string()).is_some() {
            tracing::debug!(view = id, "activity view selected");
            self.events.emit(SHELL_CHANGE, ShellChange::View { id: id.to_string() });
            if !self.primary_open {
                self.set_primary(true);
            }
        } else {
            self.set_primary(!self.primary_open);
        }
        self.sync(host);
        true
    }

    /// Show or hide the primary sidebar.
    pub fn set_primary_open(&mut self, host: &mut dyn Host, open: bool) {
        if self.primary_open != open {
            self.set_primary(open);
            self.sync(host);
        }
    }

    fn set_primary(&mut self, open: bool) {
        self.primary_open = open;
        self.events.emit(SHELL_CHANGE, ShellChange::PrimarySidebar { open });
    }

    /// Show or hide the secondary sidebar.
    pub fn toggle_secondary(&mut self, host: &mut dyn Host) {
        if self.secondary_overlay.is_visible() {
            self.close_secondary(host, CloseReason::Explicit);
        } else if self.secondary_overlay.open(OpenTrigger::Click, host.focused()) {
            host.focus(&self.secondary);
            self.events
                .emit(SHELL_CHANGE, ShellChange::SecondarySidebar { open: true });
        }
    }

    /// Hide the secondary sidebar and return focus.
    pub fn close_secondary(&mut self, host: &mut dyn Host, reason: CloseReason) -> bool {
        let Some(transition) = self.secondary_overlay.close(reason) else {
            return false;
        };
        return_focus(host, &transition);
        self.events
            .emit(SHELL_CHANGE, ShellChange::SecondarySidebar { open: false });
        true
    }

    /// Pointer pressed on `target`. Closes the secondary sidebar when the
    /// press lands outside it and outside its toggle.
    pub fn on_pointer_down(&mut self, host: &mut dyn Host, target: &str) {
        if !self.secondary_overlay.is_visible() || host.contains(&self.secondary, target) {
            return;
        }
        if let Some(toggle) = &self.secondary_toggle
            && host.contains(toggle, target)
        {
            return;
        }
        self.close_secondary(host, CloseReason::OutsidePointer);
    }

    /// Key press inside the secondary sidebar.
    pub fn on_secondary_key(&mut self, host: &mut dyn Host, input: &KeyInput) -> Handled {
        if input.key == Key::Escape {
            return self.close_secondary(host, CloseReason::Escape).into();
        }
        Handled::No
    }

    fn sync(&self, host: &mut dyn Host) {
        self.activity.apply_tab_indices(host);
        for entry in self.activity.registry().items() {
            let selected = self.view.is_selected(&entry.id);
            let expanded = selected && self.primary_open;
            host.set_attribute(&entry.id, Attr::AriaSelected, aria_bool(selected));
            host.set_attribute(&entry.id, Attr::AriaExpanded, aria_bool(expanded));
        }
    }
}

impl Widget for Shell {
    fn on_mount(&mut self, host: &mut dyn Host) {
        self.sync(host);
    }

    fn on_unmount(&mut self, host: &mut dyn Host) {
        self.close_secondary(host, CloseReason::Disconnect);
    }

    /// Keys on the activity bar.
    fn on_key(&mut self, host: &mut dyn Host, input: &KeyInput, now_ms: u64) -> Handled {
        match self.activity.handle_key(input, now_ms) {
            RovingKey::Moved => {
                self.activity.focus_active(host);
                Handled::Yes
            }
            RovingKey::Stayed => Handled::Yes,
            RovingKey::Ignored => match input.key {
                Key::Enter | Key::Space => {
                    self.activate(host);
                    Handled::Yes
                }
                _ => Handled::No,
            },
        }
    }

    fn activate(&mut self, host: &mut dyn Host) {
        if let Some(id) = self.activity.active_id().map(str::to_string) {
            self.activate_view(host, &id);
        }
    }

    fn focus_first(&mut self, host: &mut dyn Host) {
        self.activity.navigate(Navigation::First);
        self.activity.focus_active(host);
    }

    fn close(&mut self, host: &mut dyn Host) {
        self.close_secondary(host, CloseReason::Explicit);
    }
}
