// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types surfaced by hosts and by docs-shell configuration.

use thiserror::Error;
use wayfinder_router::route::RouteTableError;
use wayfinder_tree::TreeError;

/// Clipboard write failures reported by a [`Host`](crate::host::Host).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// The host has no clipboard.
    #[error("clipboard is unavailable")]
    Unavailable,
    /// The user or platform refused access.
    #[error("clipboard access was denied")]
    Denied,
    /// Any other failure.
    #[error("clipboard write failed: {0}")]
    Failed(String),
}

/// Problems loading a [`DocsConfig`](crate::docs::DocsConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration is not valid JSON for the expected shape.
    #[error("failed to parse docs config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The route table is invalid.
    #[error("invalid routes: {0}")]
    Routes(#[from] RouteTableError),
    /// The navigation tree is invalid.
    #[error("invalid navigation tree: {0}")]
    Nav(#[from] TreeError),
    /// `initial_view` is not a route id.
    #[error("initial view `{0}` is not a route")]
    UnknownInitialView(String),
    /// `not_found_view` is not a route id.
    #[error("not-found view `{0}` is not a route")]
    UnknownNotFoundView(String),
}
