// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Serializable navigation item.

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// A node in a navigation structure, as authored in static content.
///
/// `id` must be unique across the whole tree. Items are immutable once a
/// [`NavTree`](crate::NavTree) is built from them; replacing the data means
/// building a new tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Unique id.
    pub id: String,
    /// Visible label.
    pub label: String,
    /// Optional link target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Ordered children; empty for leaves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
    /// Disabled items are shown but never focused or selected by keyboard.
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    pub disabled: bool,
}

impl NavItem {
    /// A leaf item.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Set the link target.
    #[must_use]
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Set the children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    /// Mark the item disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"[
            {"id": "guides", "label": "Guides", "children": [
                {"id": "install", "label": "Install", "href": "/guides/install"}
            ]},
            {"id": "legacy", "label": "Legacy", "disabled": true}
        ]"#;
        let items: Vec<NavItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].children[0].href.as_deref(), Some("/guides/install"));
        assert!(items[0].href.is_none());
        assert!(items[1].disabled);
        assert!(items[1].children.is_empty());
    }

    #[test]
    fn serializes_without_empty_fields() {
        let json = serde_json::to_string(&NavItem::new("a", "A")).unwrap();
        assert_eq!(json, r#"{"id":"a","label":"A"}"#);
    }
}
