// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render surface widgets drive.
//!
//! Widgets never own UI nodes. They address them by string id through a
//! [`Host`], which moves real focus, toggles ARIA state, writes the clipboard,
//! and owns document-level pointer listeners for drag gestures.
//!
//! [`MemoryHost`] is a complete in-memory implementation for tests, demos, and
//! headless use.

use std::collections::{BTreeMap, HashMap};

use wayfinder_event_state::overlay::CloseTransition;

use crate::error::ClipboardError;

/// Attributes widgets write on host nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attr {
    /// `tabindex`
    TabIndex,
    /// `aria-selected`
    AriaSelected,
    /// `aria-checked`
    AriaChecked,
    /// `aria-expanded`
    AriaExpanded,
    /// `aria-current`
    AriaCurrent,
    /// `aria-activedescendant`
    AriaActiveDescendant,
    /// `aria-valuenow`
    AriaValueNow,
    /// `aria-disabled`
    AriaDisabled,
}

impl Attr {
    /// The attribute name as written in markup.
    pub const fn name(self) -> &'static str {
        match self {
            Self::TabIndex => "tabindex",
            Self::AriaSelected => "aria-selected",
            Self::AriaChecked => "aria-checked",
            Self::AriaExpanded => "aria-expanded",
            Self::AriaCurrent => "aria-current",
            Self::AriaActiveDescendant => "aria-activedescendant",
            Self::AriaValueNow => "aria-valuenow",
            Self::AriaDisabled => "aria-disabled",
        }
    }
}

/// Registration of document-level pointer move/up listeners for one gesture.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ListenerToken(u64);

impl ListenerToken {
    /// Wrap a host-specific handle.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The host-specific handle.
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

/// Imperative operations a widget may perform on its render surface.
pub trait Host {
    /// Move focus to `id`. Returns `false` if the node is not connected.
    fn focus(&mut self, id: &str) -> bool;

    /// The id of the focused node, or `None` when the document body has focus.
    fn focused(&self) -> Option<String>;

    /// Move focus to the document body.
    fn focus_body(&mut self);

    /// Whether `id` is attached to the document.
    fn is_connected(&self, id: &str) -> bool;

    /// Whether `id` is `container` or one of its descendants.
    fn contains(&self, container: &str, id: &str) -> bool;

    /// Set an attribute on `id`.
    fn set_attribute(&mut self, id: &str, attr: Attr, value: &str);

    /// Remove an attribute from `id`.
    fn remove_attribute(&mut self, id: &str, attr: Attr);

    /// Write text to the system clipboard.
    fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Start listening for document-level pointer move/up/cancel.
    fn add_gesture_listeners(&mut self) -> ListenerToken;

    /// Stop the listeners registered under `token`.
    fn remove_gesture_listeners(&mut self, token: ListenerToken);
}

/// ARIA boolean attribute value.
pub(crate) fn aria_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Return focus after an overlay closed.
///
/// Focus goes to the captured target when it is still connected and falls
/// back to the document body otherwise.
pub fn return_focus(host: &mut dyn Host, transition: &CloseTransition<String>) {
    match transition.return_target.as_deref() {
        Some(target) if host.is_connected(target) && host.focus(target) => {
            tracing::debug!(target, reason = ?transition.reason, "focus returned");
        }
        target => {
            tracing::warn!(
                target = target.unwrap_or("<none>"),
                reason = ?transition.reason,
                "focus return target unavailable, focusing body"
            );
            host.focus_body();
        }
    }
}

/// In-memory [`Host`]: a node forest with focus, attributes, a clipboard, and
/// gesture listener bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct MemoryHost {
    parents: HashMap<String, Option<String>>,
    focused: Option<String>,
    focus_log: Vec<Option<String>>,
    attributes: BTreeMap<(String, Attr), String>,
    clipboard: Option<String>,
    clipboard_failure: Option<ClipboardError>,
    listeners: Vec<u64>,
    next_token: u64,
}

impl MemoryHost {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// A document with top-level nodes `ids`.
    pub fn with_nodes<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut host = Self::new();
        for id in ids {
            host.connect(id);
        }
        host
    }

    /// Attach a top-level node.
    pub fn connect(&mut self, id: &str) {
        self.parents.insert(id.to_string(), None);
    }

    /// Attach `id` as a child of `parent`.
    pub fn connect_in(&mut self, parent: &str, id: &str) {
        self.parents.insert(id.to_string(), Some(parent.to_string()));
    }

    /// Detach `id` and its descendants. Focus inside moves to the body.
    pub fn disconnect(&mut self, id: &str) {
        let removed: Vec<String> = self
            .parents
            .keys()
            .filter(|n| self.contains(id, n.as_str()))
            .cloned()
            .collect();
        for node in &removed {
            self.parents.remove(node);
        }
        if self.focused.as_ref().is_some_and(|f| removed.contains(f)) {
            self.focus_body();
        }
    }

    /// Current value of `attr` on `id`.
    pub fn attribute(&self, id: &str, attr: Attr) -> Option<&str> {
        self.attributes
            .get(&(id.to_string(), attr))
            .map(String::as_str)
    }

    /// Ids carrying `attr == value`, in id order.
    pub fn nodes_with(&self, attr: Attr, value: &str) -> Vec<&str> {
        self.attributes
            .iter()
            .filter(|((_, a), v)| *a == attr && v.as_str() == value)
            .map(|((id, _), _)| id.as_str())
            .collect()
    }

    /// Every focus change so far, `None` meaning the body.
    pub fn focus_log(&self) -> &[Option<String>] {
        &self.focus_log
    }

    /// Last text written to the clipboard.
    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    /// Make subsequent clipboard writes fail with `failure` (or succeed again
    /// with `None`).
    pub fn fail_clipboard(&mut self, failure: Option<ClipboardError>) {
        self.clipboard_failure = failure;
    }

    /// Number of gesture listener registrations still alive.
    pub fn active_listeners(&self) -> usize {
        self.listeners.len()
    }

    fn record_focus(&mut self, target: Option<String>) {
        self.focused.clone_from(&target);
        self.focus_log.push(target);
    }
}

impl Host for MemoryHost {
    fn focus(&mut self, id: &str) -> bool {
        if !self.is_connected(id) {
            return false;
        }
        self.record_focus(Some(id.to_string()));
        true
    }

    fn focused(&self) -> Option<String> {
        self.focused.clone()
    }

    fn focus_body(&mut self) {
        self.record_focus(None);
    }

    fn is_connected(&self, id: &str) -> bool {
        self.parents.contains_key(id)
    }

    fn contains(&self, container: &str, id: &str) -> bool {
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            if node == container {
                return true;
            }
            cursor = self.parents.get(node).and_then(|p| p.as_deref());
        }
        false
    }

    fn set_attribute(&mut self, id: &str, attr: Attr, value: &str) {
        self.attributes
            .insert((id.to_string(), attr), value.to_string());
    }

    fn remove_attribute(&mut self, id: &str, attr: Attr) {
        self.attributes.remove(&(id.to_string(), attr));
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(failure) = &self.clipboard_failure {
            return Err(failure.clone());
        }
        self.clipboard = Some(text.to_string());
        Ok(())
    }

    fn add_gesture_listeners(&mut self) -> ListenerToken {
        let raw = self.next_token;
        self.next_token += 1;
        self.listeners.push(raw);
        ListenerToken(raw)
    }

    fn remove_gesture_listeners(&mut self, token: ListenerToken) {
        self.listeners.retain(|&l| l != token.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_event_state::overlay::CloseReason;

    #[test]
    fn disconnect_removes_subtree_and_drops_focus() {
        let mut host = MemoryHost::with_nodes(["dialog", "button"]);
        host.connect_in("dialog", "ok");
        host.connect_in("ok", "ok-label");
        assert!(host.focus("ok"));
        assert!(host.contains("dialog", "ok-label"));
        assert!(!host.contains("button", "ok"));
        host.disconnect("dialog");
        assert!(!host.is_connected("ok-label"));
        assert!(host.is_connected("button"));
        assert_eq!(host.focused(), None);
        assert!(!host.focus("ok"));
    }

    #[test]
    fn return_focus_falls_back_to_body() {
        let mut host = MemoryHost::with_nodes(["trigger"]);
        let transition = CloseTransition {
            reason: CloseReason::Escape,
            return_target: Some("trigger".to_string()),
        };
        return_focus(&mut host, &transition);
        assert_eq!(host.focused().as_deref(), Some("trigger"));

        host.disconnect("trigger");
        host.connect("other");
        host.focus("other");
        return_focus(&mut host, &transition);
        assert_eq!(host.focused(), None);
    }

    #[test]
    fn gesture_listeners_are_counted() {
        let mut host = MemoryHost::new();
        let a = host.add_gesture_listeners();
        let b = host.add_gesture_listeners();
        assert_eq!(host.active_listeners(), 2);
        host.remove_gesture_listeners(a);
        host.remove_gesture_listeners(b);
        assert_eq!(host.active_listeners(), 0);
    }

    #[test]
    fn clipboard_failures_are_reported() {
        let mut host = MemoryHost::new();
        assert!(host.write_clipboard("one").is_ok());
        host.fail_clipboard(Some(ClipboardError::Denied));
        assert_eq!(host.write_clipboard("two"), Err(ClipboardError::Denied));
        assert_eq!(host.clipboard(), Some("one"));
    }
}
