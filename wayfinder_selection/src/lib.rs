// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder Selection: value tracking for composite widgets.
//!
//! Two models cover the widgets in this workspace:
//!
//! - [`single::SingleSelection`] for tab lists and radio groups. Selecting a new
//!   value replaces the previous one in one step and reports the change.
//! - [`tree::TreeSelection`] for tree checkboxes. Only leaf ids are stored; the
//!   state of a branch ([`CheckState::Mixed`] and friends) is always derived
//!   from its leaves, so branch and leaf state cannot disagree.
//!
//! ```rust
//! use wayfinder_selection::CheckState;
//! use wayfinder_selection::tree::TreeSelection;
//! use wayfinder_tree::{NavItem, NavTree};
//!
//! let tree = NavTree::from_items(vec![NavItem::new("p", "P").with_children(vec![
//!     NavItem::new("a", "A"),
//!     NavItem::new("b", "B"),
//! ])]);
//! let mut selection = TreeSelection::new();
//! selection.toggle(&tree, "a");
//! assert_eq!(selection.check_state(&tree, "p"), CheckState::Mixed);
//!
//! // Toggling a mixed parent checks every leaf under it…
//! assert_eq!(selection.toggle(&tree, "p"), CheckState::Checked);
//! assert_eq!(selection.selected_ids(&tree), ["a", "b"]);
//! // …and toggling again clears them.
//! assert_eq!(selection.toggle(&tree, "p"), CheckState::Unchecked);
//! assert!(selection.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod single;
pub mod tree;

/// Whether tab activation follows focus.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Activation {
    /// Moving focus selects the focused item.
    #[default]
    Automatic,
    /// Focus moves freely; Enter or Space selects.
    Manual,
}

/// Tri-state checkbox value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CheckState {
    /// Every leaf under the node is selected.
    Checked,
    /// No leaf under the node is selected.
    Unchecked,
    /// Some, but not all, leaves are selected.
    Mixed,
}

impl CheckState {
    /// Value for the `aria-checked` attribute.
    pub const fn aria_value(self) -> &'static str {
        match self {
            Self::Checked => "true",
            Self::Unchecked => "false",
            Self::Mixed => "mixed",
        }
    }

    /// Whether this is [`CheckState::Checked`].
    pub const fn is_checked(self) -> bool {
        matches!(self, Self::Checked)
    }
}
