// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder Tree: the navigation tree behind tree views and docs sidebars.
//!
//! - [`NavItem`] is the serializable input shape: an id, a label, an optional
//!   `href`, and ordered children.
//! - [`NavTree`] flattens items into an arena with parent links and an id index.
//!   Ids are unique across the whole tree; they are the only key used by
//!   expansion and selection sets.
//! - [`OpenSet`] holds the ids of expanded branches.
//! - [`TreeNavigator`] maps keys to moves over the visible rows, including the
//!   hierarchical ArrowLeft/ArrowRight rules.
//!
//! ## Example
//!
//! ```rust
//! use wayfinder_focus::keys::Key;
//! use wayfinder_tree::{NavItem, NavTree, OpenSet, TreeMove, TreeNavigator};
//!
//! let tree = NavTree::from_items(vec![
//!     NavItem::new("guides", "Guides").with_children(vec![
//!         NavItem::new("install", "Install"),
//!         NavItem::new("theming", "Theming"),
//!     ]),
//!     NavItem::new("api", "API"),
//! ]);
//! let mut open = OpenSet::new();
//! let nav = TreeNavigator::default();
//! let guides = tree.lookup("guides").unwrap();
//!
//! // ArrowRight on a closed branch opens it without moving.
//! assert_eq!(nav.navigate(&tree, &mut open, guides, Key::ArrowRight), TreeMove::Expanded(guides));
//! // ArrowRight again moves to the first child.
//! let install = tree.lookup("install").unwrap();
//! assert_eq!(nav.navigate(&tree, &mut open, guides, Key::ArrowRight), TreeMove::Moved(install));
//! // ArrowLeft on a leaf moves to its parent.
//! assert_eq!(nav.navigate(&tree, &mut open, install, Key::ArrowLeft), TreeMove::Moved(guides));
//! ```
//!
//! Malformed input (empty or duplicate ids) is skipped by [`NavTree::from_items`]
//! and reported through [`NavTree::skipped`]; [`NavTree::try_from_items`] turns
//! the first problem into a [`TreeError`] instead.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod item;
mod navigate;
mod open;
mod tree;

pub use item::NavItem;
pub use navigate::{TreeMove, TreeNavigator};
pub use open::OpenSet;
pub use tree::{NavTree, Node, NodeId, SkipReason, SkippedNode, TreeError};
