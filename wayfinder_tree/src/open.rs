// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expansion state for hierarchical widgets.

use alloc::string::{String, ToString};
use hashbrown::HashSet;

use crate::tree::{NavTree, NodeId};

/// Ids of currently expanded branches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpenSet {
    ids: HashSet<String>,
}

impl OpenSet {
    /// An empty set: every branch collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is expanded.
    pub fn is_open(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Expand `id`. Returns `true` if it was collapsed.
    pub fn open(&mut self, id: &str) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        self.ids.insert(id.to_string())
    }

    /// Collapse `id`. Returns `true` if it was expanded.
    pub fn close(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    /// Flip `id`; returns the new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if !self.close(id) {
            self.open(id);
            true
        } else {
            false
        }
    }

    /// Expand every ancestor of `node` so it becomes visible.
    pub fn expand_to(&mut self, tree: &NavTree, node: NodeId) {
        for ancestor in tree.ancestors(node) {
            self.open(&tree.node(ancestor).id);
        }
    }

    /// Drop ids that are not branches of `tree` (after the data source changes).
    pub fn retain_branches(&mut self, tree: &NavTree) {
        self.ids.retain(|id| tree.is_branch(id));
    }

    /// Number of expanded ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is expanded.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Expanded ids, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for OpenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
