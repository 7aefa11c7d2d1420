// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree view over a [`NavTree`] with expansion, typeahead, and optional
//! tri-state checkboxes.
//!
//! Every node id is also the id of its row on the host. The active row holds
//! the only `tabindex=0`; branches carry `aria-expanded`; with checkboxes
//! enabled every row carries `aria-checked` derived from its leaves.

use wayfinder_focus::keys::{Key, KeyInput};
use wayfinder_focus::typeahead::Typeahead;
use wayfinder_router::events::EventTarget;
use wayfinder_selection::CheckState;
use wayfinder_selection::tree::TreeSelection;
use wayfinder_tree::{NavItem, NavTree, NodeId, OpenSet, TreeMove, TreeNavigator};

use crate::host::{Attr, Host, aria_bool};
use crate::widget::{Handled, Widget};

/// Event emitted when a row is chosen.
pub const NAV_SELECT: &str = "nav-select";

/// Payload of [`NAV_SELECT`]. Cancelable: preventing it keeps the current row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavSelect {
    /// Chosen node.
    pub id: String,
    /// The node's link target.
    pub href: Option<String>,
}

/// What a key press did to a [`TreeView`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeKey {
    /// Not a tree key.
    Ignored,
    /// Navigation, expansion, typeahead, or a checkbox toggle.
    Handled,
    /// A row was chosen and the selection was not prevented.
    Selected(String),
}

/// A tree view widget.
#[derive(Debug)]
pub struct TreeView {
    tree: NavTree,
    open: OpenSet,
    navigator: TreeNavigator,
    active: Option<NodeId>,
    current: Option<String>,
    typeahead: Typeahead,
    checkboxes: Option<TreeSelection>,
    events: EventTarget<NavSelect>,
}

impl TreeView {
    /// A collapsed tree view; the first enabled root is active.
    pub fn new(tree: NavTree) -> Self {
        let mut view = Self {
            tree,
            open: OpenSet::new(),
            navigator: TreeNavigator::default(),
            active: None,
            current: None,
            typeahead: Typeahead::new(),
            checkboxes: None,
            events: EventTarget::new(),
        };
        view.active = view.first_row();
        view
    }

    /// Build from items, skipping malformed nodes.
    pub fn from_items(items: Vec<NavItem>) -> Self {
        let tree = NavTree::from_items(items);
        for skipped in tree.skipped() {
            tracing::warn!(
                id = %skipped.id,
                label = %skipped.label,
                reason = ?skipped.reason,
                "skipped malformed tree item"
            );
        }
        Self::new(tree)
    }

    /// Enable tri-state checkboxes.
    pub fn with_checkboxes(mut self) -> Self {
        self.checkboxes = Some(TreeSelection::new());
        self
    }

    /// Use a specific traversal policy.
    pub fn with_navigator(mut self, navigator: TreeNavigator) -> Self {
        self.navigator = navigator;
        self
    }

    /// The tree.
    pub fn tree(&self) -> &NavTree {
        &self.tree
    }

    /// Expanded branches.
    pub fn open_set(&self) -> &OpenSet {
        &self.open
    }

    /// The row holding the tab stop.
    pub fn active_id(&self) -> Option<&str> {
        self.active.map(|n| self.tree.node(n).id.as_str())
    }

    /// The last chosen row.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Checkbox selection, when enabled.
    pub fn selection(&self) -> Option<&TreeSelection> {
        self.checkboxes.as_ref()
    }

    /// Derived checkbox state of `id`.
    pub fn check_state(&self, id: &str) -> Option<CheckState> {
        self.checkboxes
            .as_ref()
            .map(|s| s.check_state(&self.tree, id))
    }

    /// Listeners for [`NAV_SELECT`].
    pub fn events(&mut self) -> &mut EventTarget<NavSelect> {
        &mut self.events
    }

    /// Replace the data wholesale, keeping open, active, current, and checked
    /// ids that still exist.
    pub fn set_items(&mut self, host: &mut dyn Host, items: Vec<NavItem>) {
        let active_id = self.active_id().map(str::to_string);
        self.tree = NavTree::from_items(items);
        self.open.retain_branches(&self.tree);
        if let Some(selection) = &mut self.checkboxes {
            selection.retain_leaves(&self.tree);
        }
        if self
            .current
            .as_deref()
            .is_some_and(|c| self.tree.lookup(c).is_none())
        {
            self.current = None;
        }
        self.active = active_id
            .and_then(|id| self.tree.lookup(&id))
            .filter(|&n| self.is_visible_enabled(n))
            .or_else(|| self.first_row());
        self.typeahead.reset();
        self.sync(host);
    }

    /// Expand or collapse `id`. Collapsing a branch that contains the active
    /// row makes the branch active.
    pub fn set_open(&mut self, host: &mut dyn Host, id: &str, open: bool) -> bool {
        let Some(node) = self.tree.lookup(id).filter(|&n| self.tree.node(n).is_branch()) else {
            return false;
        };
        let changed = if open { self.open.open(id) } else { self.open.close(id) };
        if !open
            && let Some(active) = self.active
            && self.tree.ancestors(active).contains(&node)
        {
            self.active = Some(node);
        }
        if changed {
            self.sync(host);
        }
        changed
    }

    /// Expand every ancestor of `id`, make it active and current.
    ///
    /// Used when the location changes from outside the tree.
    pub fn reveal(&mut self, host: &mut dyn Host, id: &str) -> bool {
        let Some(node) = self.tree.lookup(id) else {
            return false;
        };
        self.open.expand_to(&self.tree, node);
        if !self.tree.node(node).disabled {
            self.active = Some(node);
        }
        self.current = Some(id.to_string());
        self.sync(host);
        true
    }

    /// Mark `id` current without moving the active row or expanding anything.
    /// Unknown ids clear the current row.
    pub fn mark_current(&mut self, host: &mut dyn Host, id: Option<&str>) {
        let id = id.filter(|id| self.tree.lookup(id).is_some());
        if self.current.as_deref() != id {
            self.current = id.map(str::to_string);
            self.sync(host);
        }
    }

    /// Clear the current row, for locations with no matching row.
    pub fn clear_current(&mut self, host: &mut dyn Host) {
        if self.current.take().is_some() {
            self.sync(host);
        }
    }

    /// Toggle the checkbox of `id`. Returns its new state.
    pub fn toggle_check(&mut self, host: &mut dyn Host, id: &str) -> Option<CheckState> {
        let selection = self.checkboxes.as_mut()?;
        if self.tree.get(id).is_none_or(|n| n.disabled) {
            return None;
        }
        let state = selection.toggle(&self.tree, id);
        tracing::debug!(row = id, state = state.aria_value(), "tree checkbox toggled");
        self.sync(host);
        Some(state)
    }

    /// Choose `id`: emit [`NAV_SELECT`] and, unless prevented, make it current.
    pub fn select(&mut self, host: &mut dyn Host, id: &str) -> bool {
        let Some(node) = self.tree.get(id).filter(|n| !n.disabled) else {
            return false;
        };
        let payload = NavSelect {
            id: node.id.clone(),
            href: node.href.clone(),
        };
        if self.events.emit_cancelable(NAV_SELECT, payload).default_prevented {
            tracing::debug!(row = id, "nav selection prevented");
            return false;
        }
        self.current = Some(id.to_string());
        self.sync(host);
        true
    }

    /// Pointer activation of a row: focus it, toggle it if it is a branch,
    /// and choose it.
    pub fn click(&mut self, host: &mut dyn Host, id: &str) -> bool {
        let Some(node) = self.tree.lookup(id).filter(|&n| !self.tree.node(n).disabled) else {
            return false;
        };
        self.active = Some(node);
        if self.tree.node(node).is_branch() {
            self.open.toggle(id);
        }
        self.sync(host);
        host.focus(id);
        self.select(host, id)
    }

    /// Handle a key on the focused row.
    pub fn key(&mut self, host: &mut dyn Host, input: &KeyInput, now_ms: u64) -> TreeKey {
        let Some(active) = self.active else {
            return TreeKey::Ignored;
        };
        if input.key == Key::Escape {
            let pending = self.typeahead.is_active(now_ms);
            self.typeahead.reset();
            return if pending { TreeKey::Handled } else { TreeKey::Ignored };
        }
        if input.has_command_modifier() {
            return TreeKey::Ignored;
        }
        let active_id = self.tree.node(active).id.clone();
        match input.key {
            Key::Enter => return self.choose(host, &active_id),
            Key::Space if !self.typeahead.is_active(now_ms) => {
                if self.checkboxes.is_some() {
                    self.toggle_check(host, &active_id);
                    return TreeKey::Handled;
                }
                return self.choose(host, &active_id);
            }
            _ => {}
        }
        if let Some(ch) = input.typeahead_char().filter(|&c| c != '*') {
            let rows = self.tree.visible_entries(&self.open);
            let current = rows.iter().position(|e| e.id == active);
            if let Some(index) = self.typeahead.push(ch, now_ms, current, &rows) {
                self.move_to(host, rows[index].id);
            }
            return TreeKey::Handled;
        }
        match self
            .navigator
            .navigate(&self.tree, &mut self.open, active, input.key)
        {
            TreeMove::Moved(node) => {
                self.move_to(host, node);
                TreeKey::Handled
            }
            TreeMove::Expanded(_) | TreeMove::Collapsed(_) | TreeMove::ExpandedSiblings(_) => {
                self.sync(host);
                TreeKey::Handled
            }
            TreeMove::Unchanged => match input.key {
                Key::ArrowUp
                | Key::ArrowDown
                | Key::ArrowLeft
                | Key::ArrowRight
                | Key::Home
                | Key::End
                | Key::Character('*') => TreeKey::Handled,
                _ => TreeKey::Ignored,
            },
        }
    }

    fn choose(&mut self, host: &mut dyn Host, id: &str) -> TreeKey {
        if self.select(host, id) {
            TreeKey::Selected(id.to_string())
        } else {
            TreeKey::Handled
        }
    }

    fn move_to(&mut self, host: &mut dyn Host, node: NodeId) {
        self.active = Some(node);
        self.sync(host);
        host.focus(&self.tree.node(node).id);
    }

    fn first_row(&self) -> Option<NodeId> {
        self.tree
            .visible_entries(&self.open)
            .into_iter()
            .find(|e| e.enabled)
            .map(|e| e.id)
    }

    fn is_visible_enabled(&self, node: NodeId) -> bool {
        !self.tree.node(node).disabled && self.tree.visible(&self.open).contains(&node)
    }

    /// Write tab stops and ARIA state for every row.
    fn sync(&self, host: &mut dyn Host) {
        for (id, node) in self.tree.iter() {
            let tab_index = if self.active == Some(id) { "0" } else { "-1" };
            host.set_attribute(&node.id, Attr::TabIndex, tab_index);
            if node.is_branch() {
                let expanded = aria_bool(self.open.is_open(&node.id));
                host.set_attribute(&node.id, Attr::AriaExpanded, expanded);
            } else {
                host.remove_attribute(&node.id, Attr::AriaExpanded);
            }
            if let Some(selection) = &self.checkboxes {
                let state = selection.state_of(&self.tree, id);
                host.set_attribute(&node.id, Attr::AriaChecked, state.aria_value());
            }
            if node.disabled {
                host.set_attribute(&node.id, Attr::AriaDisabled, "true");
            } else {
                host.remove_attribute(&node.id, Attr::AriaDisabled);
            }
            if self.current.as_deref() == Some(node.id.as_str()) {
                host.set_attribute(&node.id, Attr::AriaCurrent, "page");
            } else {
                host.remove_attribute(&node.id, Attr::AriaCurrent);
            }
        }
    }
}

impl Widget for TreeView {
    fn on_mount(&mut self, host: &mut dyn Host) {
        self.sync(host);
    }

    fn on_unmount(&mut self, _host: &mut dyn Host) {
        self.typeahead.reset();
    }

    fn on_key(&mut self, host: &mut dyn Host, input: &KeyInput, now_ms: u64) -> Handled {
        match self.key(host, input, now_ms) {
            TreeKey::Ignored => Handled::No,
            TreeKey::Handled | TreeKey::Selected(_) => Handled::Yes,
        }
    }

    fn activate(&mut self, host: &mut dyn Host) {
        if let Some(id) = self.active_id().map(str::to_string) {
            self.select(host, &id);
        }
    }

    fn focus_first(&mut self, host: &mut dyn Host) {
        if let Some(first) = self.first_row() {
            self.move_to(host, first);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use wayfinder_router::events::{Event, Outcome};

    fn items() -> Vec<NavItem> {
        vec![
            NavItem::new("guides", "Guides").with_children(vec![
                NavItem::new("install", "Install").with_href("/guides/install"),
                NavItem::new("theming", "Theming"),
            ]),
            NavItem::new("components", "Components").with_children(vec![
                NavItem::new("button", "Button"),
                NavItem::new("badge", "Badge").disabled(),
                NavItem::new("tabs", "Tabs"),
            ]),
            NavItem::new("changelog", "Changelog"),
        ]
    }

    fn host() -> MemoryHost {
        MemoryHost::with_nodes([
            "guides",
            "install",
            "theming",
            "components",
            "button",
            "badge",
            "tabs",
            "changelog",
        ])
    }

    #[test]
    fn single_tab_stop_through_any_key_sequence() {
        let mut host = host();
        let mut view = TreeView::from_items(items());
        view.on_mount(&mut host);
        let keys = [
            Key::ArrowRight,
            Key::ArrowRight,
            Key::ArrowDown,
            Key::ArrowDown,
            Key::ArrowDown,
            Key::ArrowRight,
            Key::ArrowDown,
            Key::ArrowDown,
            Key::ArrowLeft,
            Key::ArrowLeft,
            Key::End,
            Key::Character('*'),
            Key::Home,
        ];
        for key in keys {
            view.on_key(&mut host, &key.into(), 0);
            assert_eq!(host.nodes_with(Attr::TabIndex, "0").len(), 1, "after {key:?}");
        }
        assert_eq!(view.active_id(), Some("guides"));
        assert_eq!(host.attribute("components", Attr::AriaExpanded), Some("true"));
    }

    #[test]
    fn expand_collapse_and_parent_moves() {
        let mut host = host();
        let mut view = TreeView::from_items(items());
        view.on_mount(&mut host);
        assert_eq!(host.attribute("guides", Attr::AriaExpanded), Some("false"));
        view.on_key(&mut host, &Key::ArrowRight.into(), 0);
        assert_eq!(host.attribute("guides", Attr::AriaExpanded), Some("true"));
        view.on_key(&mut host, &Key::ArrowRight.into(), 0);
        assert_eq!(host.focused().as_deref(), Some("install"));
        view.on_key(&mut host, &Key::ArrowLeft.into(), 0);
        assert_eq!(view.active_id(), Some("guides"));
        view.on_key(&mut host, &Key::ArrowLeft.into(), 0);
        assert_eq!(host.attribute("guides", Attr::AriaExpanded), Some("false"));
        assert_eq!(view.active_id(), Some("guides"));
    }

    #[test]
    fn enter_emits_cancelable_nav_select() {
        let mut host = host();
        let mut view = TreeView::from_items(items());
        view.events().add_listener(|e: &mut Event<NavSelect>| {
            if e.payload.id == "changelog" {
                e.prevent_default();
            }
            Outcome::Continue
        });
        view.reveal(&mut host, "install");
        assert_eq!(
            view.key(&mut host, &Key::Enter.into(), 0),
            TreeKey::Selected("install".into())
        );
        assert_eq!(host.attribute("install", Attr::AriaCurrent), Some("page"));
        view.on_key(&mut host, &Key::End.into(), 0);
        assert_eq!(view.key(&mut host, &Key::Enter.into(), 0), TreeKey::Handled);
        assert_eq!(view.current(), Some("install"));
        assert!(!view.select(&mut host, "badge"));
    }

    #[test]
    fn typeahead_searches_visible_rows_only() {
        let mut host = host();
        let mut view = TreeView::from_items(items());
        view.on_key(&mut host, &Key::Character('t').into(), 0);
        assert_eq!(view.active_id(), Some("guides"));
        view.set_open(&mut host, "components", true);
        view.on_key(&mut host, &Key::Character('t').into(), 1_000);
        assert_eq!(view.active_id(), Some("tabs"));
        view.set_open(&mut host, "components", false);
        assert_eq!(view.active_id(), Some("components"));
    }

    #[test]
    fn checkbox_parent_state_is_derived() {
        let mut host = host();
        let mut view = TreeView::from_items(items()).with_checkboxes();
        view.on_mount(&mut host);
        view.on_key(&mut host, &Key::ArrowRight.into(), 0);
        view.on_key(&mut host, &Key::ArrowDown.into(), 0);
        view.on_key(&mut host, &Key::Space.into(), 0);
        assert_eq!(host.attribute("install", Attr::AriaChecked), Some("true"));
        assert_eq!(host.attribute("guides", Attr::AriaChecked), Some("mixed"));
        assert_eq!(view.toggle_check(&mut host, "guides"), Some(CheckState::Checked));
        assert_eq!(host.attribute("theming", Attr::AriaChecked), Some("true"));
        assert_eq!(view.toggle_check(&mut host, "guides"), Some(CheckState::Unchecked));
        assert!(view.selection().is_some_and(TreeSelection::is_empty));
        assert_eq!(view.current(), None);
    }

    #[test]
    fn set_items_clears_stale_aria_state() {
        let mut host = host();
        let mut view = TreeView::from_items(items());
        view.on_mount(&mut host);
        assert_eq!(host.attribute("guides", Attr::AriaExpanded), Some("false"));
        assert_eq!(host.attribute("badge", Attr::AriaDisabled), Some("true"));

        view.set_items(
            &mut host,
            vec![
                NavItem::new("guides", "Guides"),
                NavItem::new("badge", "Badge"),
            ],
        );
        assert_eq!(host.attribute("guides", Attr::AriaExpanded), None);
        assert_eq!(host.attribute("badge", Attr::AriaDisabled), None);
    }

    #[test]
    fn set_items_keeps_surviving_state() {
        let mut host = host();
        let mut view = TreeView::from_items(items());
        view.reveal(&mut host, "theming");
        let mut next = items();
        next.remove(2);
        view.set_items(&mut host, next);
        assert_eq!(view.active_id(), Some("theming"));
        assert!(view.open_set().is_open("guides"));
        view.set_items(&mut host, vec![NavItem::new("only", "Only")]);
        assert_eq!(view.active_id(), Some("only"));
        assert_eq!(view.current(), None);
    }
}
