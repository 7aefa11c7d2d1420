// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: arena structure, id index, traversal queries.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use wayfinder_focus::FocusEntry;

use crate::item::NavItem;
use crate::open::OpenSet;

/// Handle of a node inside one [`NavTree`].
///
/// Handles are only meaningful for the tree that produced them. Trees are
/// immutable, so handles never go stale while the tree is alive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A flattened tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// Unique id.
    pub id: String,
    /// Visible label.
    pub label: String,
    /// Optional link target.
    pub href: Option<String>,
    /// Whether keyboard navigation skips this node.
    pub disabled: bool,
    /// Parent node, `None` for roots.
    pub parent: Option<NodeId>,
    /// Ordered children.
    pub children: Vec<NodeId>,
    /// Depth from the roots (roots are at depth 0).
    pub depth: usize,
}

impl Node {
    /// Whether the node has children.
    pub fn is_branch(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Why a node was left out of a leniently built tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The id was empty.
    EmptyId,
    /// Another node already used the id.
    DuplicateId,
}

/// A node (and its subtree) dropped while building a tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedNode {
    /// The offending id (possibly empty).
    pub id: String,
    /// Label of the offending item, to help locate it in content.
    pub label: String,
    /// Why it was dropped.
    pub reason: SkipReason,
}

/// Errors raised by [`NavTree::try_from_items`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// An item had an empty id.
    #[error("navigation item '{label}' has an empty id")]
    EmptyId {
        /// Label of the item.
        label: String,
    },
    /// Two items shared an id.
    #[error("duplicate navigation item id '{0}'")]
    DuplicateId(String),
}

/// Immutable navigation tree built from [`NavItem`]s.
#[derive(Clone, Debug, Default)]
pub struct NavTree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    index: HashMap<String, NodeId>,
    skipped: Vec<SkippedNode>,
}

impl NavTree {
    /// Build a tree, skipping malformed nodes.
    ///
    /// Items with an empty or already-used id are dropped together with their
    /// subtree and recorded in [`NavTree::skipped`]; the rest of the tree is
    /// kept intact.
    pub fn from_items(items: Vec<NavItem>) -> Self {
        let mut tree = Self::default();
        for item in items {
            if let Some(id) = tree.insert(item, None, 0) {
                tree.roots.push(id);
            }
        }
        tree
    }

    /// Build a tree, failing on the first malformed node.
    pub fn try_from_items(items: Vec<NavItem>) -> Result<Self, TreeError> {
        let tree = Self::from_items(items);
        match tree.skipped.first() {
            None => Ok(tree),
            Some(skip) => Err(match skip.reason {
                SkipReason::EmptyId => TreeError::EmptyId {
                    label: skip.label.clone(),
                },
                SkipReason::DuplicateId => TreeError::DuplicateId(skip.id.clone()),
            }),
        }
    }

    fn insert(&mut self, item: NavItem, parent: Option<NodeId>, depth: usize) -> Option<NodeId> {
        let reason = if item.id.is_empty() {
            Some(SkipReason::EmptyId)
        } else if self.index.contains_key(&item.id) {
            Some(SkipReason::DuplicateId)
        } else {
            None
        };
        if let Some(reason) = reason {
            self.skipped.push(SkippedNode {
                id: item.id,
                label: item.label,
                reason,
            });
            return None;
        }

        let Ok(raw) = u32::try_from(self.nodes.len()) else {
            return None;
        };
        let id = NodeId(raw);
        self.index.insert(item.id.clone(), id);
        self.nodes.push(Node {
            id: item.id,
            label: item.label,
            href: item.href,
            disabled: item.disabled,
            parent,
            children: Vec::new(),
            depth,
        });
        for child in item.children {
            if let Some(child_id) = self.insert(child, Some(id), depth + 1) {
                self.nodes[id.idx()].children.push(child_id);
            }
        }
        Some(id)
    }

    /// Nodes dropped while building.
    pub fn skipped(&self) -> &[SkippedNode] {
        &self.skipped
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root handles in order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Handle for `id`.
    pub fn lookup(&self, id: &str) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    /// Node for `id`.
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.lookup(id).map(|n| self.node(n))
    }

    /// Node for a handle produced by this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.idx()]
    }

    /// Whether `id` names a branch.
    pub fn is_branch(&self, id: &str) -> bool {
        self.get(id).is_some_and(Node::is_branch)
    }

    /// Parent handle, `None` for roots.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Child handles.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = self.parent_of(id);
        while let Some(p) = cur {
            out.push(p);
            cur = self.parent_of(p);
        }
        out
    }

    /// Siblings including `id` itself, in order.
    pub fn siblings_of(&self, id: NodeId) -> &[NodeId] {
        match self.parent_of(id) {
            Some(p) => self.children_of(p),
            None => &self.roots,
        }
    }

    /// All descendants of `id` in depth-first order (excluding `id`).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_subtree(id, &mut out);
        out.remove(0);
        out
    }

    /// Leaves under `id`, depth-first. A leaf's only "leaf descendant" is itself.
    pub fn leaf_descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_subtree(id, &mut out);
        out.retain(|&n| !self.node(n).is_branch());
        out
    }

    fn collect_subtree(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for &child in self.children_of(id) {
            self.collect_subtree(child, out);
        }
    }

    /// Every node in depth-first order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        // Nodes are inserted in depth-first order.
        self.nodes.iter().zip(0_u32..).map(|(n, i)| (NodeId(i), n))
    }

    /// Rows a tree view shows: roots plus the children of every open branch
    /// whose ancestors are all open, in depth-first order.
    pub fn visible(&self, open: &OpenSet) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            let node = self.node(id);
            if node.is_branch() && open.is_open(&node.id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Visible rows as focus entries, for roving focus and typeahead.
    pub fn visible_entries(&self, open: &OpenSet) -> Vec<FocusEntry<NodeId>> {
        self.visible(open)
            .into_iter()
            .map(|id| {
                let node = self.node(id);
                FocusEntry {
                    id,
                    label: node.label.clone(),
                    enabled: !node.disabled,
                }
            })
            .collect()
    }
}
