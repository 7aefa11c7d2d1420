// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu button: a trigger that opens a roving, typeahead-enabled item list.
//!
//! - ArrowDown, Enter, or Space on the trigger opens at the first item;
//!   ArrowUp opens at the last.
//! - Enter or Space on an item emits a cancelable [`MENU_SELECT`]. Unless a
//!   listener prevents it, the menu closes and focus returns to the trigger.
//! - Escape, Tab, and pointer-down outside both the trigger and the menu
//!   close it.

use wayfinder_event_state::overlay::{CloseReason, OpenTrigger, OverlayState};
use wayfinder_focus::keys::{Key, KeyInput, Orientation};
use wayfinder_focus::{FocusEntry, Navigation};
use wayfinder_router::events::EventTarget;

use crate::host::{Attr, Host, return_focus};
use crate::roving::{RovingGroup, RovingKey};
use crate::widget::{Handled, Widget};

/// Event emitted when an item is chosen.
pub const MENU_SELECT: &str = "menu-select";

/// Payload of [`MENU_SELECT`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuSelect {
    /// Chosen item.
    pub id: String,
}

/// A menu button and its popup.
#[derive(Debug)]
pub struct Menu {
    trigger: String,
    surface: String,
    roving: RovingGroup,
    overlay: OverlayState<String>,
    events: EventTarget<MenuSelect>,
}

impl Menu {
    /// A closed menu. `trigger` and `surface` are host node ids.
    pub fn new(
        trigger: impl Into<String>,
        surface: impl Into<String>,
        items: Vec<FocusEntry<String>>,
    ) -> Self {
        Self {
            trigger: trigger.into(),
            surface: surface.into(),
            roving: RovingGroup::new(items, Orientation::Vertical),
            overlay: OverlayState::new(),
            events: EventTarget::new(),
        }
    }

    /// Whether the popup is open.
    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    /// The overlay state.
    pub fn overlay(&self) -> &OverlayState<String> {
        &self.overlay
    }

    /// The highlighted item.
    pub fn active(&self) -> Option<&str> {
        self.roving.active_id()
    }

    /// Listeners for [`MENU_SELECT`].
    pub fn events(&mut self) -> &mut EventTarget<MenuSelect> {
        &mut self.events
    }

    /// Replace the items.
    pub fn set_items(&mut self, items: Vec<FocusEntry<String>>) {
        self.roving.set_items(items);
    }

    /// Open the popup with `at` (`First` or `Last`) highlighted.
    ///
    /// Returns `false` if the menu is already open.
    pub fn open(&mut self, host: &mut dyn Host, trigger: OpenTrigger, at: Navigation) -> bool {
        if !self.overlay.begin_open(trigger, host.focused()) {
            return false;
        }
        self.roving.navigate(at);
        self.overlay.finish_open();
        host.set_attribute(&self.trigger, Attr::AriaExpanded, "true");
        self.roving.focus_active(host);
        tracing::debug!(menu = %self.surface, ?trigger, "menu opened");
        true
    }

    /// Close the popup and return focus. Returns `false` if it was already closed.
    pub fn close_with(&mut self, host: &mut dyn Host, reason: CloseReason) -> bool {
        let Some(transition) = self.overlay.close(reason) else {
            return false;
        };
        self.roving.reset_typeahead();
        host.set_attribute(&self.trigger, Attr::AriaExpanded, "false");
        tracing::debug!(menu = %self.surface, ?reason, "menu closed");
        if reason == CloseReason::FocusOut {
            return true;
        }
        return_focus(host, &transition);
        true
    }

    /// Click on the trigger: open at the first item or close.
    pub fn toggle(&mut self, host: &mut dyn Host) {
        if self.overlay.is_visible() {
            self.close_with(host, CloseReason::Explicit);
        } else {
            self.open(host, OpenTrigger::Click, Navigation::First);
        }
    }

    /// Key press on the trigger while the menu is closed.
    pub fn on_trigger_key(&mut self, host: &mut dyn Host, input: &KeyInput) -> Handled {
        let at = match input.key {
            Key::ArrowDown | Key::Enter | Key::Space => Navigation::First,
            Key::ArrowUp => Navigation::Last,
            _ => return Handled::No,
        };
        self.open(host, OpenTrigger::Keyboard, at).into()
    }

    /// Pointer-down anywhere in the document.
    pub fn on_pointer_down(&mut self, host: &mut dyn Host, target: &str) {
        if !self.overlay.is_visible() {
            return;
        }
        if host.contains(&self.surface, target) || host.contains(&self.trigger, target) {
            return;
        }
        self.close_with(host, CloseReason::OutsidePointer);
    }

    /// Choose `id`. Returns `true` if the selection was not prevented.
    pub fn select(&mut self, host: &mut dyn Host, id: &str) -> bool {
        let enabled = self
            .roving
            .registry()
            .items()
            .iter()
            .any(|e| e.enabled && e.id == id);
        if !enabled {
            return false;
        }
        let result = self
            .events
            .emit_cancelable(MENU_SELECT, MenuSelect { id: id.to_string() });
        if result.default_prevented {
            tracing::debug!(item = id, "menu selection prevented");
            return false;
        }
        self.close_with(host, CloseReason::ItemSelected);
        true
    }
}

impl Widget for Menu {
    fn on_mount(&mut self, host: &mut dyn Host) {
        host.set_attribute(&self.trigger, Attr::AriaExpanded, "false");
        self.roving.apply_tab_indices(host);
    }

    fn on_unmount(&mut self, host: &mut dyn Host) {
        self.close_with(host, CloseReason::Disconnect);
    }

    fn on_key(&mut self, host: &mut dyn Host, input: &KeyInput, now_ms: u64) -> Handled {
        if !self.overlay.is_visible() {
            return Handled::No;
        }
        match self.roving.handle_key(input, now_ms) {
            RovingKey::Moved => {
                self.roving.focus_active(host);
                Handled::Yes
            }
            RovingKey::Stayed => Handled::Yes,
            RovingKey::Ignored => match input.key {
                Key::Escape => self.close_with(host, CloseReason::Escape).into(),
                Key::Tab => self.close_with(host, CloseReason::FocusOut).into(),
                Key::Enter | Key::Space => {
                    self.activate(host);
                    Handled::Yes
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
        if self.overlay.is_visible() {
            self.roving.navigate(Navigation::First);
            self.roving.focus_active(host);
        } else {
            self.open(host, OpenTrigger::Keyboard, Navigation::First);
        }
    }

    fn close(&mut self, host: &mut dyn Host) {
        self.close_with(host, CloseReason::Explicit);
    }
}
