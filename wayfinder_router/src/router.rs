// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The docs router: one current location, ordered subscribers, and a global
//! navigation event.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::events::EventTarget;
use crate::route::{Params, Route, RouteTable};

/// Name of the global event dispatched after every successful navigation.
pub const NAVIGATION_EVENT: &str = "docs-navigate";

/// A resolved location.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// View id.
    pub view: String,
    /// Path parameters.
    #[serde(default)]
    pub params: Params,
}

impl Location {
    /// A location without parameters.
    pub fn new(view: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            params: Params::new(),
        }
    }
}

/// Payload delivered to subscribers and to the global navigation event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteChange {
    /// Previous location. `None` only for the immediate call made by
    /// [`Router::subscribe`].
    pub from: Option<Location>,
    /// New current location.
    pub to: Location,
    /// Route entry of `to`.
    pub route: Route,
}

/// Navigation target that the route table does not know.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RouteNotFound {
    /// No route has this view id.
    #[error("no route for view `{0}`")]
    View(String),
    /// No route pattern matches this path.
    #[error("no route matches path `{0}`")]
    Path(String),
}

/// Failure reported by a subscriber. Logged; delivery continues.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SubscriberError {
    message: String,
}

impl SubscriberError {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Handle returned by [`Router::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&RouteChange) -> Result<(), SubscriberError>>;

/// Router over a static [`RouteTable`].
pub struct Router {
    table: RouteTable,
    current: Location,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    events: EventTarget<RouteChange>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("table", &self.table)
            .field("current", &self.current)
            .field("subscribers", &self.subscribers.len())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl Router {
    /// Start at `initial_view`.
    pub fn new(table: RouteTable, initial_view: &str) -> Result<Self, RouteNotFound> {
        if table.resolve_view(initial_view).is_none() {
            return Err(RouteNotFound::View(initial_view.to_string()));
        }
        Ok(Self {
            table,
            current: Location::new(initial_view),
            subscribers: Vec::new(),
            next_subscription: 0,
            events: EventTarget::new(),
        })
    }

    /// Start at whatever `path` resolves to.
    pub fn from_path(table: RouteTable, path: &str) -> Result<Self, RouteNotFound> {
        let (route, params) = table
            .resolve_path(path)
            .ok_or_else(|| RouteNotFound::Path(path.to_string()))?;
        let current = Location {
            view: route.id.clone(),
            params,
        };
        Ok(Self {
            table,
            current,
            subscribers: Vec::new(),
            next_subscription: 0,
            events: EventTarget::new(),
        })
    }

    /// The current location.
    pub fn current(&self) -> &Location {
        &self.current
    }

    /// The route of the current location.
    pub fn current_route(&self) -> Option<&Route> {
        self.table.resolve_view(&self.current.view)
    }

    /// The route table.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// URL path of the current location.
    pub fn current_href(&self) -> Option<String> {
        self.table.href_for(&self.current.view, &self.current.params)
    }

    /// Global navigation events, dispatched as [`NAVIGATION_EVENT`] after
    /// subscribers have been notified.
    pub fn navigation_events(&mut self) -> &mut EventTarget<RouteChange> {
        &mut self.events
    }

    /// Navigate to `view` without parameters.
    pub fn navigate(&mut self, view: &str) -> Result<RouteChange, RouteNotFound> {
        self.navigate_with(view, Params::new())
    }

    /// Navigate to `view` with `params`.
    ///
    /// Unknown views leave the current location untouched and return
    /// [`RouteNotFound`]; the caller picks the fallback.
    pub fn navigate_with(
        &mut self,
        view: &str,
        params: Params,
    ) -> Result<RouteChange, RouteNotFound> {
        let Some(route) = self.table.resolve_view(view) else {
            tracing::warn!(view, "navigation to unknown view");
            return Err(RouteNotFound::View(view.to_string()));
        };
        let route = route.clone();
        let to = Location {
            view: view.to_string(),
            params,
        };
        Ok(self.commit(to, route))
    }

    /// Navigate to whatever `path` resolves to (link activation, `popstate`).
    pub fn navigate_path(&mut self, path: &str) -> Result<RouteChange, RouteNotFound> {
        let Some((route, params)) = self.table.resolve_path(path) else {
            tracing::warn!(path, "navigation to unknown path");
            return Err(RouteNotFound::Path(path.to_string()));
        };
        let route = route.clone();
        let to = Location {
            view: route.id.clone(),
            params,
        };
        Ok(self.commit(to, route))
    }

    fn commit(&mut self, to: Location, route: Route) -> RouteChange {
        let from = core::mem::replace(&mut self.current, to.clone());
        tracing::debug!(from = %from.view, to = %to.view, "navigate");
        let change = RouteChange {
            from: Some(from),
            to,
            route,
        };
        for (id, subscriber) in &mut self.subscribers {
            deliver(*id, subscriber, &change);
        }
        self.events.emit(NAVIGATION_EVENT, change.clone());
        change
    }

    /// Register `subscriber`; it is called immediately with the current
    /// location (`from: None`) and then after every navigation, in
    /// registration order.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&RouteChange) -> Result<(), SubscriberError> + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        let mut subscriber: Subscriber = Box::new(subscriber);
        if let Some(route) = self.current_route() {
            let initial = RouteChange {
                from: None,
                to: self.current.clone(),
                route: route.clone(),
            };
            deliver(id, &mut subscriber, &initial);
        }
        self.subscribers.push((id, subscriber));
        id
    }

    /// Remove a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(s, _)| *s != id);
        self.subscribers.len() != before
    }

    /// Number of subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

fn deliver(id: SubscriptionId, subscriber: &mut Subscriber, change: &RouteChange) {
    match catch_unwind(AssertUnwindSafe(|| subscriber(change))) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            tracing::error!(
                subscription = id.0,
                to = %change.to.view,
                error = %err,
                "router subscriber failed"
            );
        }
        Err(_) => {
            tracing::error!(
                subscription = id.0,
                to = %change.to.view,
                "router subscriber panicked"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Event, Outcome};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn router() -> Router {
        let table = RouteTable::new(vec![
            Route::new("page1", "/page1"),
            Route::new("page2", "/page2"),
            Route::new("component", "/components/:name"),
        ])
        .unwrap();
        Router::new(table, "page1").unwrap()
    }

    type Log = Rc<RefCell<Vec<(Option<String>, String)>>>;

    fn record(log: &Log) -> impl FnMut(&RouteChange) -> Result<(), SubscriberError> + 'static {
        let log = Rc::clone(log);
        move |change| {
            log.borrow_mut()
                .push((change.from.as_ref().map(|l| l.view.clone()), change.to.view.clone()));
            Ok(())
        }
    }

    #[test]
    fn unknown_view_is_not_found_and_keeps_location() {
        let mut r = router();
        let log = Log::default();
        r.subscribe(record(&log));
        log.borrow_mut().clear();
        assert_eq!(
            r.navigate("unknown-view"),
            Err(RouteNotFound::View("unknown-view".into()))
        );
        assert_eq!(r.current().view, "page1");
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn navigate_notifies_once_with_from_and_to() {
        let mut r = router();
        let log = Log::default();
        r.subscribe(record(&log));
        assert_eq!(*log.borrow(), [(None, "page1".to_string())]);
        log.borrow_mut().clear();

        let change = r.navigate("page2").unwrap();
        assert_eq!(change.from, Some(Location::new("page1")));
        assert_eq!(change.route.path, "/page2");
        assert_eq!(*log.borrow(), [(Some("page1".to_string()), "page2".to_string())]);
        assert_eq!(r.current().view, "page2");
    }

    #[test]
    fn failing_subscribers_do_not_block_later_ones() {
        let mut r = router();
        let log = Log::default();
        r.subscribe(|_| Err(SubscriberError::new("render failed")));
        r.subscribe(|change| {
            if change.from.is_some() {
                panic!("subscriber bug");
            }
            Ok(())
        });
        r.subscribe(record(&log));
        r.navigate("page2").unwrap();
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(log.borrow()[1].1, "page2");
    }

    #[test]
    fn subscribers_run_in_registration_order_until_unsubscribed() {
        let mut r = router();
        let order = Rc::new(RefCell::new(Vec::new()));
        let ids: Vec<_> = (0..3)
            .map(|n| {
                let order = Rc::clone(&order);
                r.subscribe(move |_| {
                    order.borrow_mut().push(n);
                    Ok(())
                })
            })
            .collect();
        order.borrow_mut().clear();
        assert!(r.unsubscribe(ids[1]));
        assert!(!r.unsubscribe(ids[1]));
        r.navigate("page2").unwrap();
        assert_eq!(*order.borrow(), [0, 2]);
        assert_eq!(r.subscriber_count(), 2);
    }

    #[test]
    fn global_event_follows_subscribers() {
        let mut r = router();
        let order = Rc::new(RefCell::new(Vec::new()));
        let o = Rc::clone(&order);
        r.navigation_events().add_listener(move |e: &mut Event<RouteChange>| {
            assert_eq!(e.name, NAVIGATION_EVENT);
            assert!(!e.is_cancelable());
            o.borrow_mut().push("event");
            Outcome::Continue
        });
        let o = Rc::clone(&order);
        r.subscribe(move |_| {
            o.borrow_mut().push("subscriber");
            Ok(())
        });
        order.borrow_mut().clear();
        r.navigate("page2").unwrap();
        assert_eq!(*order.borrow(), ["subscriber", "event"]);
    }

    #[test]
    fn paths_resolve_to_views_with_params() {
        let mut r = router();
        let change = r.navigate_path("/components/tabs?x=1").unwrap();
        assert_eq!(change.to.view, "component");
        assert_eq!(change.to.params["name"], "tabs");
        assert_eq!(r.current_href().as_deref(), Some("/components/tabs"));
        assert_eq!(
            r.navigate_path("/nowhere"),
            Err(RouteNotFound::Path("/nowhere".into()))
        );
        assert_eq!(r.current().view, "component");
    }

    #[test]
    fn construction_requires_a_known_start() {
        let table = RouteTable::new(vec![Route::new("home", "/")]).unwrap();
        assert!(Router::new(table.clone(), "missing").is_err());
        assert_eq!(Router::from_path(table, "/").unwrap().current().view, "home");
    }
}
