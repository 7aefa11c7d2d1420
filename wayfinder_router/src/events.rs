// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event targets: ordered listeners, cancelation, and stop semantics.
//!
//! An [`EventTarget`] holds listeners for one payload type and delivers an
//! [`Event`] to them in registration order. It is deliberately minimal:
//!
//! - [`Outcome`] only controls propagation (`Continue` vs `Stop`).
//! - "Default prevented" lives on the event, set via [`Event::prevent_default`],
//!   and only sticks for cancelable events.
//! - [`DispatchResult`] reports whether the default was prevented and whether a
//!   listener stopped propagation, so the emitter can decide whether to run its
//!   default action.
//! - A panicking listener is logged and skipped; the remaining listeners still
//!   run.
//!
//! ```
//! use wayfinder_router::events::{Event, EventTarget, Outcome};
//!
//! let mut target: EventTarget<u32> = EventTarget::new();
//! target.add_listener(|event: &mut Event<u32>| {
//!     if event.payload > 3 {
//!         event.prevent_default();
//!     }
//!     Outcome::Continue
//! });
//!
//! let mut page = Event::cancelable("pagination-change", 5);
//! let result = target.dispatch(&mut page);
//! assert!(result.default_prevented);
//!
//! // Non-cancelable events ignore prevent_default.
//! let result = target.emit("pagination-change", 5);
//! assert!(!result.default_prevented);
//! ```

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Propagation control returned by listeners.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Keep delivering to later listeners.
    Continue,
    /// Do not deliver to later listeners.
    Stop,
}

/// An event instance carried through one dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct Event<P> {
    /// Event name, for example `nav-select`.
    pub name: &'static str,
    /// Event payload.
    pub payload: P,
    cancelable: bool,
    default_prevented: bool,
}

impl<P> Event<P> {
    /// A non-cancelable event.
    pub fn new(name: &'static str, payload: P) -> Self {
        Self {
            name,
            payload,
            cancelable: false,
            default_prevented: false,
        }
    }

    /// A cancelable event: listeners may prevent the emitter's default action.
    pub fn cancelable(name: &'static str, payload: P) -> Self {
        Self {
            cancelable: true,
            ..Self::new(name, payload)
        }
    }

    /// Whether listeners may prevent the default action.
    pub fn is_cancelable(&self) -> bool {
        self.cancelable
    }

    /// Prevent the default action. Ignored for non-cancelable events.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Whether a listener prevented the default action.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Summary of one dispatch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchResult {
    /// A listener prevented the default action.
    pub default_prevented: bool,
    /// A listener returned [`Outcome::Stop`].
    pub stopped: bool,
    /// Number of listeners that panicked.
    pub failures: usize,
}

/// Handle returned by [`EventTarget::add_listener`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener<P> = Box<dyn FnMut(&mut Event<P>) -> Outcome>;

/// Ordered listeners for events carrying `P`.
pub struct EventTarget<P> {
    listeners: Vec<(ListenerId, Listener<P>)>,
    next_id: u64,
}

impl<P> fmt::Debug for EventTarget<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTarget")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<P> Default for EventTarget<P> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl<P> EventTarget<P> {
    /// A target with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it runs after every listener registered before it.
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&mut Event<P>) -> Outcome + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    /// Number of listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether there are no listeners.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver `event` to listeners in registration order.
    pub fn dispatch(&mut self, event: &mut Event<P>) -> DispatchResult {
        let mut result = DispatchResult::default();
        for (id, listener) in &mut self.listeners {
            match catch_unwind(AssertUnwindSafe(|| listener(event))) {
                Ok(Outcome::Continue) => {}
                Ok(Outcome::Stop) => {
                    tracing::trace!(event = event.name, listener = id.0, "propagation stopped");
                    result.stopped = true;
                    break;
                }
                Err(_) => {
                    tracing::error!(event = event.name, listener = id.0, "event listener panicked");
                    result.failures += 1;
                }
            }
        }
        result.default_prevented = event.default_prevented();
        result
    }

    /// Build and dispatch a non-cancelable event.
    pub fn emit(&mut self, name: &'static str, payload: P) -> DispatchResult {
        self.dispatch(&mut Event::new(name, payload))
    }

    /// Build and dispatch a cancelable event.
    pub fn emit_cancelable(&mut self, name: &'static str, payload: P) -> DispatchResult {
        self.dispatch(&mut Event::cancelable(name, payload))
    }
}
