// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tri-state checkbox selection over a [`NavTree`].
//!
//! Only leaf ids are stored. A branch's state is computed from the leaves
//! below it each time it is asked for:
//! - [`CheckState::Checked`] when every leaf is selected,
//! - [`CheckState::Unchecked`] when none is,
//! - [`CheckState::Mixed`] otherwise.
//!
//! Toggling a branch that is not fully checked selects all of its leaves;
//! toggling a fully checked branch deselects them.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use hashbrown::HashSet;
use wayfinder_tree::{NavTree, NodeId};

use crate::CheckState;

/// Selected leaf ids of a checkbox tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeSelection {
    selected: HashSet<String>,
}

impl TreeSelection {
    /// Nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derived state of `id`. Unknown ids report [`CheckState::Unchecked`].
    pub fn check_state(&self, tree: &NavTree, id: &str) -> CheckState {
        match tree.lookup(id) {
            Some(node) => self.state_of(tree, node),
            None => CheckState::Unchecked,
        }
    }

    /// Derived state of a node handle.
    pub fn state_of(&self, tree: &NavTree, node: NodeId) -> CheckState {
        let leaves = tree.leaf_descendants(node);
        let selected = leaves
            .iter()
            .filter(|&&leaf| self.selected.contains(tree.node(leaf).id.as_str()))
            .count();
        if selected == 0 {
            CheckState::Unchecked
        } else if selected == leaves.len() {
            CheckState::Checked
        } else {
            CheckState::Mixed
        }
    }

    /// Toggle `id` and return its new derived state.
    ///
    /// Unknown ids are ignored and report [`CheckState::Unchecked`].
    pub fn toggle(&mut self, tree: &NavTree, id: &str) -> CheckState {
        let Some(node) = tree.lookup(id) else {
            return CheckState::Unchecked;
        };
        let checked = !self.state_of(tree, node).is_checked();
        self.set_node(tree, node, checked);
        self.state_of(tree, node)
    }

    /// Check or uncheck `id` and everything below it.
    pub fn set_checked(&mut self, tree: &NavTree, id: &str, checked: bool) {
        if let Some(node) = tree.lookup(id) {
            self.set_node(tree, node, checked);
        }
    }

    fn set_node(&mut self, tree: &NavTree, node: NodeId, checked: bool) {
        for leaf in tree.leaf_descendants(node) {
            let leaf_id = &tree.node(leaf).id;
            if checked {
                self.selected.insert(leaf_id.to_string());
            } else {
                self.selected.remove(leaf_id.as_str());
            }
        }
    }

    /// Whether the leaf `id` is stored as selected.
    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Selected ids in tree order.
    pub fn selected_ids<'t>(&self, tree: &'t NavTree) -> Vec<&'t str> {
        tree.iter()
            .filter(|(_, n)| self.selected.contains(n.id.as_str()))
            .map(|(_, n)| n.id.as_str())
            .collect()
    }

    /// Number of selected leaves.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Drop ids that are no longer leaves of `tree`.
    pub fn retain_leaves(&mut self, tree: &NavTree) {
        self.selected
            .retain(|id| tree.get(id).is_some_and(|n| !n.is_branch()));
    }

    /// Clear everything.
    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use wayfinder_tree::NavItem;

    fn tree() -> NavTree {
        NavTree::from_items(vec![
            NavItem::new("root", "Root").with_children(vec![
                NavItem::new("p", "P")
                    .with_children(vec![NavItem::new("a", "A"), NavItem::new("b", "B")]),
                NavItem::new("c", "C"),
            ]),
        ])
    }

    #[test]
    fn parent_state_is_derived_from_leaves() {
        let t = tree();
        let mut s = TreeSelection::new();
        assert_eq!(s.check_state(&t, "p"), CheckState::Unchecked);
        s.toggle(&t, "a");
        assert_eq!(s.check_state(&t, "p"), CheckState::Mixed);
        assert_eq!(s.check_state(&t, "root"), CheckState::Mixed);
        s.toggle(&t, "b");
        assert_eq!(s.check_state(&t, "p"), CheckState::Checked);
        assert_eq!(s.check_state(&t, "root"), CheckState::Mixed);
    }

    #[test]
    fn toggling_parent_propagates_to_all_leaves() {
        let t = tree();
        let mut s = TreeSelection::new();
        s.toggle(&t, "a");
        assert_eq!(s.toggle(&t, "p"), CheckState::Checked);
        assert_eq!(s.selected_ids(&t), ["a", "b"]);
        assert_eq!(s.toggle(&t, "p"), CheckState::Unchecked);
        assert!(s.selected_ids(&t).is_empty());
    }

    #[test]
    fn only_leaves_are_stored() {
        let t = tree();
        let mut s = TreeSelection::new();
        s.toggle(&t, "root");
        assert_eq!(s.len(), 3);
        assert!(!s.contains("root") && !s.contains("p"));
        assert_eq!(s.selected_ids(&t), ["a", "b", "c"]);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let t = tree();
        let mut s = TreeSelection::new();
        assert_eq!(s.toggle(&t, "nope"), CheckState::Unchecked);
        s.set_checked(&t, "nope", true);
        assert!(s.is_empty());
    }

    #[test]
    fn retain_leaves_after_data_change() {
        let mut s = TreeSelection::new();
        s.set_checked(&tree(), "root", true);
        let replaced = NavTree::from_items(vec![
            NavItem::new("a", "A").with_children(vec![NavItem::new("z", "Z")]),
        ]);
        s.retain_leaves(&replaced);
        assert!(s.is_empty());
    }
}
