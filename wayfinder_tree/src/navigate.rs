// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard traversal over a tree's visible rows.
//!
//! ## Rules
//!
//! - ArrowDown/ArrowUp move to the next/previous visible enabled row.
//! - Home/End move to the first/last visible enabled row.
//! - ArrowRight on a closed branch expands it; on an open branch it moves to
//!   the first enabled child; on a leaf it moves to the next visible row.
//! - ArrowLeft on an open branch collapses it; on a closed branch or a leaf it
//!   moves to the parent.
//! - `*` expands every sibling branch of the active row.
//!
//! Anything else is a no-op and reports [`TreeMove::Unchanged`].

use wayfinder_focus::keys::{Key, Orientation};
use wayfinder_focus::{Navigation, WrapMode, compute_next};

use crate::open::OpenSet;
use crate::tree::{NavTree, NodeId};

/// Outcome of a key press on a tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TreeMove {
    /// The active row moved to this node.
    Moved(NodeId),
    /// This branch was expanded; the active row did not move.
    Expanded(NodeId),
    /// This branch was collapsed; the active row did not move.
    Collapsed(NodeId),
    /// This many sibling branches were newly expanded.
    ExpandedSiblings(usize),
    /// Nothing happened.
    Unchanged,
}

/// Hierarchical navigation policy.
#[derive(Copy, Clone, Debug)]
pub struct TreeNavigator {
    /// Whether vertical movement wraps between the first and last row.
    pub wrap: WrapMode,
}

impl Default for TreeNavigator {
    fn default() -> Self {
        Self {
            wrap: WrapMode::Never,
        }
    }
}

impl TreeNavigator {
    /// Apply `key` with `active` as the current row.
    pub fn navigate(
        &self,
        tree: &NavTree,
        open: &mut OpenSet,
        active: NodeId,
        key: Key,
    ) -> TreeMove {
        match key {
            Key::ArrowRight => {
                let node = tree.node(active);
                if !node.is_branch() {
                    return self.linear(tree, open, active, Navigation::Next);
                }
                if open.open(&node.id) {
                    return TreeMove::Expanded(active);
                }
                node.children
                    .iter()
                    .copied()
                    .find(|&c| !tree.node(c).disabled)
                    .map_or(TreeMove::Unchanged, TreeMove::Moved)
            }
            Key::ArrowLeft => {
                let node = tree.node(active);
                if node.is_branch() && open.close(&node.id) {
                    return TreeMove::Collapsed(active);
                }
                tree.parent_of(active)
                    .map_or(TreeMove::Unchanged, TreeMove::Moved)
            }
            Key::Character('*') => {
                let opened = tree
                    .siblings_of(active)
                    .iter()
                    .map(|&s| tree.node(s))
                    .filter(|n| n.is_branch())
                    .filter(|n| open.open(&n.id))
                    .count();
                if opened == 0 {
                    TreeMove::Unchanged
                } else {
                    TreeMove::ExpandedSiblings(opened)
                }
            }
            other => match Orientation::Vertical.navigation_for(other) {
                Some(nav) => self.linear(tree, open, active, nav),
                None => TreeMove::Unchanged,
            },
        }
    }

    fn linear(&self, tree: &NavTree, open: &OpenSet, active: NodeId, nav: Navigation) -> TreeMove {
        let rows = tree.visible_entries(open);
        let current = rows.iter().position(|e| e.id == active);
        match compute_next(current, nav, &rows, self.wrap) {
            Some(i) if Some(i) != current => TreeMove::Moved(rows[i].id),
            _ => TreeMove::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NavItem;
    use alloc::vec;

    fn tree() -> NavTree {
        NavTree::from_items(vec![
            NavItem::new("p", "Parent").with_children(vec![
                NavItem::new("c1", "Child 1").disabled(),
                NavItem::new("c2", "Child 2"),
            ]),
            NavItem::new("q", "Other").with_children(vec![NavItem::new("q1", "Q1")]),
            NavItem::new("leaf", "Leaf"),
        ])
    }

    fn id(t: &NavTree, s: &str) -> NodeId {
        t.lookup(s).unwrap()
    }

    fn step(
        nav: &TreeNavigator,
        t: &NavTree,
        open: &mut OpenSet,
        from: &str,
        key: Key,
    ) -> TreeMove {
        nav.navigate(t, open, id(t, from), key)
    }

    fn moved(t: &NavTree, to: &str) -> TreeMove {
        TreeMove::Moved(id(t, to))
    }

    #[test]
    fn right_opens_then_enters_first_enabled_child() {
        let t = tree();
        let nav = TreeNavigator::default();
        let mut open = OpenSet::new();
        let p = id(&t, "p");
        assert_eq!(step(&nav, &t, &mut open, "p", Key::ArrowRight), TreeMove::Expanded(p));
        assert_eq!(step(&nav, &t, &mut open, "p", Key::ArrowRight), moved(&t, "c2"));
    }

    #[test]
    fn right_on_leaf_moves_to_next_row() {
        let t = tree();
        let nav = TreeNavigator::default();
        let mut open: OpenSet = ["p"].into_iter().collect();
        assert_eq!(step(&nav, &t, &mut open, "c2", Key::ArrowRight), moved(&t, "q"));
        // Last row without wrap stays.
        assert_eq!(step(&nav, &t, &mut open, "leaf", Key::ArrowRight), TreeMove::Unchanged);
    }

    #[test]
    fn left_closes_then_moves_to_parent() {
        let t = tree();
        let nav = TreeNavigator::default();
        let mut open: OpenSet = ["p"].into_iter().collect();
        assert_eq!(step(&nav, &t, &mut open, "c2", Key::ArrowLeft), moved(&t, "p"));
        let p = id(&t, "p");
        assert_eq!(step(&nav, &t, &mut open, "p", Key::ArrowLeft), TreeMove::Collapsed(p));
        assert!(!open.is_open("p"));
        // Closed root branch has no parent.
        assert_eq!(step(&nav, &t, &mut open, "p", Key::ArrowLeft), TreeMove::Unchanged);
    }

    #[test]
    fn vertical_movement_skips_disabled_and_hidden_rows() {
        let t = tree();
        let nav = TreeNavigator::default();
        let mut open: OpenSet = ["p"].into_iter().collect();
        assert_eq!(step(&nav, &t, &mut open, "p", Key::ArrowDown), moved(&t, "c2"));
        // q is closed, so q1 is skipped.
        assert_eq!(step(&nav, &t, &mut open, "q", Key::ArrowDown), moved(&t, "leaf"));
        assert_eq!(step(&nav, &t, &mut open, "c2", Key::ArrowUp), moved(&t, "p"));
        assert_eq!(step(&nav, &t, &mut open, "c2", Key::End), moved(&t, "leaf"));
        assert_eq!(step(&nav, &t, &mut open, "leaf", Key::Home), moved(&t, "p"));
    }

    #[test]
    fn wrap_mode_is_honored() {
        let t = tree();
        let nav = TreeNavigator { wrap: WrapMode::Wrap };
        let mut open = OpenSet::new();
        assert_eq!(step(&nav, &t, &mut open, "leaf", Key::ArrowDown), moved(&t, "p"));
    }

    #[test]
    fn star_expands_sibling_branches() {
        let t = tree();
        let nav = TreeNavigator::default();
        let mut open = OpenSet::new();
        assert_eq!(
            step(&nav, &t, &mut open, "leaf", Key::Character('*')),
            TreeMove::ExpandedSiblings(2)
        );
        assert!(open.is_open("p") && open.is_open("q"));
        assert_eq!(step(&nav, &t, &mut open, "leaf", Key::Character('*')), TreeMove::Unchanged);
    }

    #[test]
    fn unrelated_keys_are_noops() {
        let t = tree();
        let nav = TreeNavigator::default();
        let mut open = OpenSet::new();
        assert_eq!(step(&nav, &t, &mut open, "p", Key::Tab), TreeMove::Unchanged);
        assert_eq!(step(&nav, &t, &mut open, "p", Key::Character('x')), TreeMove::Unchanged);
    }
}
