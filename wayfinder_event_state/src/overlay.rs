// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open/close state machine for overlays.
//!
//! ## Phases
//!
//! ```text
//! Closed ──begin_open──▶ Opening ──finish_open──▶ Open
//!   ▲                       │                       │
//!   │                  begin_close             begin_close
//!   │                       ▼                       ▼
//!   └────finish_close──── Closing ◀─────────────────┘
//! ```
//!
//! - The focus-return target is captured once, in [`OverlayState::begin_open`],
//!   and is not replaced by anything that happens while the overlay is visible.
//! - Opening while not `Closed` is a no-op, so repeated open triggers are
//!   idempotent.
//! - Closing from `Opening` cancels the open (Escape during an open animation,
//!   or the host disconnecting the widget).
//! - [`OverlayState::finish_close`] hands back the captured target. Deciding
//!   whether that target is still usable is the host's job.
//!
//! The two-step transitions let a host render the overlay between
//! `begin_open` and `finish_open` (so its contents exist before focus moves
//! in). Hosts that do not need that use [`OverlayState::open`] and
//! [`OverlayState::close`].

/// Phase of an overlay.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum OverlayPhase {
    /// Not visible.
    #[default]
    Closed,
    /// Open requested; contents are being shown and focus has not moved in yet.
    Opening,
    /// Visible with focus inside.
    Open,
    /// Close requested; focus has not been returned yet.
    Closing,
}

/// What opened the overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OpenTrigger {
    /// Pointer click on a trigger element.
    Click,
    /// Global keyboard shortcut.
    Shortcut,
    /// Keyboard activation of a trigger element (Enter, Space, arrows).
    Keyboard,
}

/// Why the overlay closed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CloseReason {
    /// Escape key.
    Escape,
    /// Pointer down outside the overlay.
    OutsidePointer,
    /// Explicit close action (close button, API call).
    Explicit,
    /// An item was chosen (menus, command palette).
    ItemSelected,
    /// Focus left the overlay (Tab). Focus is not returned.
    FocusOut,
    /// The owning widget was removed from the document.
    Disconnect,
}

/// A completed close, returned by [`OverlayState::finish_close`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloseTransition<E> {
    /// Why the overlay closed.
    pub reason: CloseReason,
    /// Element that had focus when the overlay opened, if any.
    pub return_target: Option<E>,
}

/// Per-overlay open/close state.
#[derive(Clone, Debug)]
pub struct OverlayState<E> {
    phase: OverlayPhase,
    trigger: Option<OpenTrigger>,
    close_reason: Option<CloseReason>,
    return_target: Option<E>,
}

impl<E> Default for OverlayState<E> {
    fn default() -> Self {
        Self {
            phase: OverlayPhase::Closed,
            trigger: None,
            close_reason: None,
            return_target: None,
        }
    }
}

impl<E: Clone> OverlayState<E> {
    /// A closed overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// Whether the overlay is fully open.
    pub fn is_open(&self) -> bool {
        self.phase == OverlayPhase::Open
    }

    /// Whether the overlay is on screen in any phase other than `Closed`.
    pub fn is_visible(&self) -> bool {
        self.phase != OverlayPhase::Closed
    }

    /// The trigger of the current (or most recent) open.
    pub fn trigger(&self) -> Option<OpenTrigger> {
        self.trigger
    }

    /// The captured focus-return target while visible.
    pub fn return_target(&self) -> Option<&E> {
        self.return_target.as_ref()
    }

    /// `Closed → Opening`, capturing `focused` as the return target.
    ///
    /// Returns `false` and changes nothing in any other phase.
    pub fn begin_open(&mut self, trigger: OpenTrigger, focused: Option<E>) -> bool {
        if self.phase != OverlayPhase::Closed {
            return false;
        }
        self.phase = OverlayPhase::Opening;
        self.trigger = Some(trigger);
        self.close_reason = None;
        self.return_target = focused;
        true
    }

    /// `Opening → Open`. Returns `false` in any other phase.
    pub fn finish_open(&mut self) -> bool {
        if self.phase != OverlayPhase::Opening {
            return false;
        }
        self.phase = OverlayPhase::Open;
        true
    }

    /// `Opening | Open → Closing`. Returns `false` in any other phase.
    pub fn begin_close(&mut self, reason: CloseReason) -> bool {
        match self.phase {
            OverlayPhase::Opening | OverlayPhase::Open => {
                self.phase = OverlayPhase::Closing;
                self.close_reason = Some(reason);
                true
            }
            OverlayPhase::Closed | OverlayPhase::Closing => false,
        }
    }

    /// `Closing → Closed`, handing back the captured return target.
    pub fn finish_close(&mut self) -> Option<CloseTransition<E>> {
        if self.phase != OverlayPhase::Closing {
            return None;
        }
        self.phase = OverlayPhase::Closed;
        Some(CloseTransition {
            reason: self.close_reason.unwrap_or(CloseReason::Explicit),
            return_target: self.return_target.take(),
        })
    }

    /// `Closed → Open` in one step. Same rules as [`OverlayState::begin_open`].
    pub fn open(&mut self, trigger: OpenTrigger, focused: Option<E>) -> bool {
        self.begin_open(trigger, focused) && self.finish_open()
    }

    /// `Opening | Open → Closed` in one step.
    pub fn close(&mut self, reason: CloseReason) -> Option<CloseTransition<E>> {
        if !self.begin_close(reason) {
            return None;
        }
        self.finish_close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle_through_all_phases() {
        let mut o: OverlayState<u32> = OverlayState::new();
        assert!(o.begin_open(OpenTrigger::Keyboard, Some(7)));
        assert_eq!(o.phase(), OverlayPhase::Opening);
        assert!(o.is_visible() && !o.is_open());
        assert!(o.finish_open());
        assert!(o.is_open());
        assert!(o.begin_close(CloseReason::OutsidePointer));
        assert_eq!(o.phase(), OverlayPhase::Closing);
        let closed = o.finish_close().unwrap();
        assert_eq!(closed.reason, CloseReason::OutsidePointer);
        assert_eq!(closed.return_target, Some(7));
        assert_eq!(o.return_target(), None);
    }

    #[test]
    fn reentrant_open_keeps_first_return_target() {
        let mut o: OverlayState<u32> = OverlayState::new();
        assert!(o.open(OpenTrigger::Click, Some(1)));
        assert!(!o.open(OpenTrigger::Click, Some(2)));
        assert!(!o.begin_open(OpenTrigger::Shortcut, Some(3)));
        assert_eq!(o.return_target(), Some(&1));
        assert_eq!(o.trigger(), Some(OpenTrigger::Click));
    }

    #[test]
    fn escape_during_opening_cancels() {
        let mut o: OverlayState<u32> = OverlayState::new();
        o.begin_open(OpenTrigger::Click, Some(4));
        let closed = o.close(CloseReason::Escape).unwrap();
        assert_eq!(closed.return_target, Some(4));
        assert_eq!(o.phase(), OverlayPhase::Closed);
        // A late finish_open after cancellation does nothing.
        assert!(!o.finish_open());
    }

    #[test]
    fn closing_a_closed_overlay_is_a_noop() {
        let mut o: OverlayState<u32> = OverlayState::new();
        assert!(o.close(CloseReason::Explicit).is_none());
        assert!(o.finish_close().is_none());
        o.open(OpenTrigger::Click, None);
        o.begin_close(CloseReason::Explicit);
        assert!(!o.begin_close(CloseReason::Escape));
        assert_eq!(o.finish_close().unwrap().reason, CloseReason::Explicit);
    }
}
