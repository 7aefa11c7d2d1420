// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder Router: client-side view routing and event dispatch for a docs shell.
//!
//! ## Overview
//!
//! - [`route::RouteTable`] is a static, validated list of [`route::Route`]s whose
//!   paths may contain `:param` segments. It resolves view ids and URL paths and
//!   builds hrefs back from a view and its parameters.
//! - [`router::Router`] holds exactly one current [`router::Location`]. A
//!   successful navigation replaces it, notifies subscribers in registration
//!   order, then dispatches one global [`router::NAVIGATION_EVENT`]. An unknown
//!   view returns [`router::RouteNotFound`] and changes nothing.
//! - [`events::EventTarget`] is the listener list used for the global event and
//!   by widgets for their own notifications (`nav-select`, `pagination-change`,
//!   and so on). Events may be cancelable; listeners prevent the emitter's
//!   default action through [`events::Event::prevent_default`].
//!
//! Failures in subscribers and listeners are isolated: a subscriber returning
//! an error or panicking is logged through `tracing` and the rest still run.
//!
//! ## Example
//!
//! ```rust
//! use wayfinder_router::route::{Route, RouteTable};
//! use wayfinder_router::router::Router;
//!
//! let table = RouteTable::new(vec![
//!     Route::new("page1", "/page1"),
//!     Route::new("page2", "/page2"),
//! ])
//! .unwrap();
//! let mut router = Router::new(table, "page1").unwrap();
//!
//! let seen = std::rc::Rc::new(std::cell::Cell::new(0));
//! let counter = seen.clone();
//! router.subscribe(move |_| {
//!     counter.set(counter.get() + 1);
//!     Ok(())
//! });
//! // Subscribing delivers the current location once.
//! assert_eq!(seen.get(), 1);
//!
//! let change = router.navigate("page2").unwrap();
//! assert_eq!(change.from.unwrap().view, "page1");
//! assert_eq!(seen.get(), 2);
//!
//! assert!(router.navigate("unknown-view").is_err());
//! assert_eq!(router.current().view, "page2");
//! ```

pub mod events;
pub mod route;
pub mod router;
