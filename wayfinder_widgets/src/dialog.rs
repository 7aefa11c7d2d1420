// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Modal dialog with a focus trap and focus return.
//!
//! Opening is split in two so the host can render the dialog before focus
//! moves in: [`Dialog::begin_open`] captures the return target, and
//! [`Dialog::finish_open`] focuses the initial-focus element (or the first
//! connected focusable, or the dialog itself). Escape before `finish_open`
//! cancels the open. While open, Tab and Shift+Tab cycle through the
//! dialog's focusables.

use wayfinder_event_state::overlay::{CloseReason, OpenTrigger, OverlayPhase, OverlayState};
use wayfinder_focus::keys::{Key, KeyInput, Modifiers};

use crate::host::{Host, return_focus};
use crate::widget::{Handled, Widget};

/// A modal dialog.
#[derive(Debug)]
pub struct Dialog {
    id: String,
    focusables: Vec<String>,
    initial_focus: Option<String>,
    dismiss_on_outside: bool,
    overlay: OverlayState<String>,
}

impl Dialog {
    /// A closed dialog. `focusables` are the ids inside it, in tab order.
    pub fn new(id: impl Into<String>, focusables: Vec<String>) -> Self {
        Self {
            id: id.into(),
            focusables,
            initial_focus: None,
            dismiss_on_outside: true,
            overlay: OverlayState::new(),
        }
    }

    /// Focus `id` when the dialog opens instead of the first focusable.
    pub fn with_initial_focus(mut self, id: impl Into<String>) -> Self {
        self.initial_focus = Some(id.into());
        self
    }

    /// Whether pointer-down outside the dialog closes it (default `true`).
    pub fn with_dismiss_on_outside(mut self, dismiss: bool) -> Self {
        self.dismiss_on_outside = dismiss;
        self
    }

    /// The overlay phase.
    pub fn phase(&self) -> OverlayPhase {
        self.overlay.phase()
    }

    /// Whether the dialog is fully open.
    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    /// Start opening: capture the focused element as the return target.
    pub fn begin_open(&mut self, host: &mut dyn Host, trigger: OpenTrigger) -> bool {
        let opened = self.overlay.begin_open(trigger, host.focused());
        if opened {
            tracing::debug!(dialog = %self.id, ?trigger, "dialog opening");
        }
        opened
    }

    /// Finish opening: move focus inside.
    pub fn finish_open(&mut self, host: &mut dyn Host) -> bool {
        if !self.overlay.finish_open() {
            return false;
        }
        let target = self
            .initial_focus
            .iter()
            .chain(&self.focusables)
            .find(|id| host.is_connected(id))
            .cloned()
            .unwrap_or_else(|| self.id.clone());
        if !host.focus(&target) {
            tracing::warn!(dialog = %self.id, "dialog has no connected focus target");
        }
        true
    }

    /// Open in one step.
    pub fn open(&mut self, host: &mut dyn Host, trigger: OpenTrigger) -> bool {
        self.begin_open(host, trigger) && self.finish_open(host)
    }

    /// Close and return focus. Returns `false` if already closed.
    pub fn close_with(&mut self, host: &mut dyn Host, reason: CloseReason) -> bool {
        let Some(transition) = self.overlay.close(reason) else {
            return false;
        };
        tracing::debug!(dialog = %self.id, ?reason, "dialog closed");
        return_focus(host, &transition);
        true
    }

    /// Pointer-down anywhere in the document.
    pub fn on_pointer_down(&mut self, host: &mut dyn Host, target: &str) {
        if !self.dismiss_on_outside || !self.overlay.is_visible() {
            return;
        }
        if !host.contains(&self.id, target) {
            self.close_with(host, CloseReason::OutsidePointer);
        }
    }

    fn cycle(&self, host: &mut dyn Host, backwards: bool) {
        let connected: Vec<&String> = self
            .focusables
            .iter()
            .filter(|id| host.is_connected(id))
            .collect();
        if connected.is_empty() {
            host.focus(&self.id);
            return;
        }
        let len = connected.len();
        let current = host
            .focused()
            .and_then(|f| connected.iter().position(|id| **id == f));
        let next = match (current, backwards) {
            (None, false) => 0,
            (None, true) => len - 1,
            (Some(i), false) => (i + 1) % len,
            (Some(i), true) => (i + len - 1) % len,
        };
        host.focus(connected[next]);
    }
}

impl Widget for Dialog {
    fn on_mount(&mut self, _host: &mut dyn Host) {}

    fn on_unmount(&mut self, host: &mut dyn Host) {
        self.close_with(host, CloseReason::Disconnect);
    }

    fn on_key(&mut self, host: &mut dyn Host, input: &KeyInput, _now_ms: u64) -> Handled {
        match (self.overlay.phase(), input.key) {
            (OverlayPhase::Opening | OverlayPhase::Open, Key::Escape) => {
                self.close_with(host, CloseReason::Escape).into()
            }
            (OverlayPhase::Open, Key::Tab) => {
                self.cycle(host, input.modifiers.contains(Modifiers::SHIFT));
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn activate(&mut self, host: &mut dyn Host) {
        if !self.overlay.is_visible() {
            self.open(host, OpenTrigger::Keyboard);
        }
    }

    fn focus_first(&mut self, host: &mut dyn Host) {
        if self.overlay.is_open() {
            self.cycle(host, false);
        }
    }

    fn close(&mut self, host: &mut dyn Host) {
        self.close_with(host, CloseReason::Explicit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn setup() -> (Dialog, MemoryHost) {
        let mut host = MemoryHost::with_nodes(["open-button", "dialog"]);
        for id in ["name", "cancel", "confirm"] {
            host.connect_in("dialog", id);
        }
        host.focus("open-button");
        let dialog = Dialog::new(
            "dialog",
            vec!["name".to_string(), "cancel".to_string(), "confirm".to_string()],
        )
        .with_initial_focus("confirm");
        (dialog, host)
    }

    #[test]
    fn focus_goes_to_initial_element_and_returns_on_escape() {
        let (mut d, mut host) = setup();
        assert!(d.open(&mut host, OpenTrigger::Click));
        assert_eq!(host.focused().as_deref(), Some("confirm"));
        d.on_key(&mut host, &Key::Tab.into(), 0);
        assert_eq!(host.focused().as_deref(), Some("name"));
        d.on_key(&mut host, &KeyInput::with(Key::Tab, Modifiers::SHIFT), 0);
        assert_eq!(host.focused().as_deref(), Some("confirm"));
        d.on_key(&mut host, &Key::Escape.into(), 0);
        assert_eq!(d.phase(), OverlayPhase::Closed);
        assert_eq!(host.focused().as_deref(), Some("open-button"));
    }

    #[test]
    fn escape_while_opening_cancels_before_focus_moves() {
        let (mut d, mut host) = setup();
        d.begin_open(&mut host, OpenTrigger::Keyboard);
        assert!(d.on_key(&mut host, &Key::Escape.into(), 0).is_handled());
        assert!(!d.finish_open(&mut host));
        assert_eq!(host.focused().as_deref(), Some("open-button"));
    }

    #[test]
    fn detached_return_target_falls_back_to_body() {
        let (mut d, mut host) = setup();
        d.open(&mut host, OpenTrigger::Click);
        host.disconnect("open-button");
        d.close(&mut host);
        assert_eq!(host.focused(), None);
    }

    #[test]
    fn missing_initial_focus_uses_first_connected_focusable() {
        let (mut d, mut host) = setup();
        host.disconnect("confirm");
        host.disconnect("name");
        d.open(&mut host, OpenTrigger::Click);
        assert_eq!(host.focused().as_deref(), Some("cancel"));
    }

    #[test]
    fn outside_pointer_and_disconnect_close() {
        let (mut d, mut host) = setup();
        d.open(&mut host, OpenTrigger::Click);
        d.on_pointer_down(&mut host, "cancel");
        assert!(d.is_open());
        d.on_pointer_down(&mut host, "open-button");
        assert!(!d.is_open());

        d.open(&mut host, OpenTrigger::Shortcut);
        d.on_unmount(&mut host);
        assert_eq!(d.phase(), OverlayPhase::Closed);
        assert_eq!(host.focused().as_deref(), Some("open-button"));
    }
}
