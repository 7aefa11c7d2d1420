// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder Widgets: headless, keyboard-navigable composite widgets.
//!
//! Widgets own their interaction state (focus registry, selection, overlay
//! phase, drag gesture) and drive a render surface through the [`host::Host`]
//! trait: they move focus, write `tabindex` and ARIA attributes, write the
//! clipboard, and register gesture listeners. They never build UI nodes.
//!
//! ## Overview
//!
//! - [`roving::RovingGroup`] is the shared roving-tabindex controller:
//!   arrows, Home/End, and typeahead move the single tab stop.
//! - [`tabs::Tabs`], [`radio::RadioGroup`], [`menu::Menu`],
//!   [`tree_view::TreeView`], [`dialog::Dialog`], and
//!   [`palette::CommandPalette`] are the composite widgets built on it.
//! - [`shell::Shell`] and [`panels::ResizablePanels`] manage application
//!   layout: the activity bar, sidebars, and draggable splits.
//! - [`pagination::Pagination`] and the [`copy`] actions are small stateful
//!   controls that report through events.
//! - [`docs::DocsShell`] wires a router to a navigation tree for a
//!   documentation site.
//!
//! Each widget publishes its notifications on an
//! [`EventTarget`](wayfinder_router::events::EventTarget) under a named event
//! (`tabs-change`, `nav-select`, `pagination-change`, and so on). Where a
//! default action follows, the event is cancelable.
//!
//! [`host::MemoryHost`] is a complete in-memory host for tests and headless use.
//!
//! ## Example
//!
//! ```rust
//! use wayfinder_focus::FocusEntry;
//! use wayfinder_focus::keys::Key;
//! use wayfinder_selection::Activation;
//! use wayfinder_widgets::host::{Attr, Host, MemoryHost};
//! use wayfinder_widgets::tabs::Tabs;
//! use wayfinder_widgets::widget::Widget;
//!
//! let mut host = MemoryHost::with_nodes(["overview", "api", "examples"]);
//! let mut tabs = Tabs::new(
//!     vec![
//!         FocusEntry::new("overview".to_string(), "Overview"),
//!         FocusEntry::new("api".to_string(), "API").disabled(),
//!         FocusEntry::new("examples".to_string(), "Examples"),
//!     ],
//!     Activation::Automatic,
//! );
//! tabs.on_mount(&mut host);
//! tabs.focus_first(&mut host);
//!
//! // The disabled tab is skipped and automatic activation selects on focus.
//! tabs.on_key(&mut host, &Key::ArrowRight.into(), 0);
//! assert_eq!(host.focused().as_deref(), Some("examples"));
//! assert_eq!(host.attribute("examples", Attr::AriaSelected), Some("true"));
//! assert_eq!(host.nodes_with(Attr::TabIndex, "0"), ["examples"]);
//! ```

pub mod copy;
pub mod dialog;
pub mod docs;
pub mod error;
pub mod host;
pub mod menu;
pub mod pagination;
pub mod palette;
pub mod panels;
pub mod radio;
pub mod roving;
pub mod shell;
pub mod tabs;
pub mod tree_view;
pub mod widget;
