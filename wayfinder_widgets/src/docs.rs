// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The documentation site shell: a [`Router`] wired to a navigation
//! [`TreeView`].
//!
//! Choosing a nav row emits `nav-select`; unless a listener prevents it the
//! shell navigates to the row's `href` (or, without one, to the view named by
//! the row id). Branch rows that name no target only expand or collapse.
//! Unknown views and paths fall back to the configured not-found view. After every navigation the matching row is revealed and
//! marked `aria-current="page"`.

use serde::Deserialize;
use wayfinder_focus::keys::KeyInput;
use wayfinder_router::route::{Route, RouteTable};
use wayfinder_router::router::{RouteChange, RouteNotFound, Router};
use wayfinder_tree::{NavItem, NavTree};

use crate::error::ConfigError;
use crate::host::Host;
use crate::tree_view::{TreeKey, TreeView};
use crate::widget::{Handled, Widget};

/// Static site configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DocsConfig {
    /// Route table.
    pub routes: Vec<Route>,
    /// Sidebar navigation.
    pub nav: Vec<NavItem>,
    /// View shown at startup.
    pub initial_view: String,
    /// View shown for unknown views and paths.
    pub not_found_view: String,
}

impl DocsConfig {
    /// Parse a configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Router plus navigation tree.
#[derive(Debug)]
pub struct DocsShell {
    router: Router,
    nav: TreeView,
    not_found_view: String,
}

impl DocsShell {
    /// Validate `config` and start at its initial view.
    ///
    /// Unlike the lenient [`TreeView::from_items`], malformed nav items are an
    /// error here: site content is authored, not user data.
    pub fn new(config: DocsConfig) -> Result<Self, ConfigError> {
        let table = RouteTable::new(config.routes)?;
        if table.resolve_view(&config.not_found_view).is_none() {
            return Err(ConfigError::UnknownNotFoundView(config.not_found_view));
        }
        let tree = NavTree::try_from_items(config.nav)?;
        let router = Router::new(table, &config.initial_view)
            .map_err(|_| ConfigError::UnknownInitialView(config.initial_view.clone()))?;
        tracing::info!(
            routes = router.table().len(),
            nav = tree.len(),
            initial = %config.initial_view,
            "docs shell configured"
        );
        Ok(Self {
            router,
            nav: TreeView::new(tree),
            not_found_view: config.not_found_view,
        })
    }

    /// Parse and validate a configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::new(DocsConfig::from_json(json)?)
    }

    /// The router.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// The router, for subscribing and listening to navigation events.
    pub fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }

    /// The navigation tree view.
    pub fn nav(&self) -> &TreeView {
        &self.nav
    }

    /// The navigation tree view, for `nav-select` listeners.
    pub fn nav_mut(&mut self) -> &mut TreeView {
        &mut self.nav
    }

    /// The current view id.
    pub fn current_view(&self) -> &str {
        &self.router.current().view
    }

    /// Navigate to `view`, falling back to the not-found view.
    pub fn open_view(&mut self, host: &mut dyn Host, view: &str) -> Option<RouteChange> {
        let result = self.router.navigate(view);
        self.settle(host, result)
    }

    /// The URL changed from outside (`popstate`).
    pub fn on_popstate(&mut self, host: &mut dyn Host, path: &str) -> Option<RouteChange> {
        let result = self.router.navigate_path(path);
        self.settle(host, result)
    }

    /// Pointer activation of a nav row.
    pub fn click_nav(&mut self, host: &mut dyn Host, id: &str) -> Option<RouteChange> {
        if !self.nav.click(host, id) {
            return None;
        }
        self.follow(host, id)
    }

    fn follow(&mut self, host: &mut dyn Host, id: &str) -> Option<RouteChange> {
        let node = self.nav.tree().get(id)?;
        let (href, is_branch) = (node.href.clone(), node.is_branch());
        let result = match href {
            Some(href) => self.router.navigate_path(&href),
            None if is_branch && self.router.table().resolve_view(id).is_none() => {
                tracing::debug!(row = id, "category row has no target");
                let row = self.current_row();
                self.nav.mark_current(host, row.as_deref());
                return None;
            }
            None => self.router.navigate(id),
        };
        self.settle(host, result)
    }

    fn settle(
        &mut self,
        host: &mut dyn Host,
        result: Result<RouteChange, RouteNotFound>,
    ) -> Option<RouteChange> {
        let change = match result {
            Ok(change) => Some(change),
            Err(err) => {
                tracing::warn!(%err, fallback = %self.not_found_view, "showing not-found view");
                self.router.navigate(&self.not_found_view).ok()
            }
        };
        self.reveal_current(host);
        change
    }

    /// The nav row for the current location: a row whose id is the view, or
    /// else a row whose `href` is the current URL.
    fn current_row(&self) -> Option<String> {
        let view = &self.router.current().view;
        if self.nav.tree().get(view).is_some() {
            return Some(view.clone());
        }
        let href = self.router.current_href()?;
        self.nav
            .tree()
            .iter()
            .find(|(_, node)| node.href.as_deref() == Some(href.as_str()))
            .map(|(_, node)| node.id.clone())
    }

    fn reveal_current(&mut self, host: &mut dyn Host) {
        match self.current_row() {
            Some(row) => {
                self.nav.reveal(host, &row);
            }
            None => {
                tracing::debug!(view = %self.router.current().view, "no nav row for view");
                self.nav.clear_current(host);
            }
        }
    }
}

impl Widget for DocsShell {
    fn on_mount(&mut self, host: &mut dyn Host) {
        self.nav.on_mount(host);
        self.reveal_current(host);
    }

    fn on_unmount(&mut self, host: &mut dyn Host) {
        self.nav.on_unmount(host);
    }

    /// Keys on the navigation tree.
    fn on_key(&mut self, host: &mut dyn Host, input: &KeyInput, now_ms: u64) -> Handled {
        match self.nav.key(host, input, now_ms) {
            TreeKey::Ignored => Handled::No,
            TreeKey::Handled => Handled::Yes,
            TreeKey::Selected(id) => {
                self.follow(host, &id);
                Handled::Yes
            }
        }
    }

    fn activate(&mut self, host: &mut dyn Host) {
        if let Some(id) = self.nav.active_id().map(str::to_string)
            && self.nav.select(host, &id)
        {
            self.follow(host, &id);
        }
    }

    fn focus_first(&mut self, host: &mut dyn Host) {
        self.nav.focus_first(host);
    }
}
