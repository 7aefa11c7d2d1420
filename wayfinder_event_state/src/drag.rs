// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-pointer drag gesture tracking.
//!
//! A gesture starts on pointer down, reports the offset from the press position
//! on every move of the same pointer, and ends on pointer up or cancellation.
//! Events from other pointers are ignored while a gesture is active, and a
//! second press does not restart a running gesture.
//!
//! The value being dragged (for example a panel size) is recorded at press time
//! as `start_value` so a cancelled gesture can restore it.

use core::num::NonZeroU64;
use kurbo::{Point, Vec2};

/// Pointer identifier.
pub type PointerId = NonZeroU64;

const PRIMARY_POINTER: PointerId = NonZeroU64::MIN;

/// Phase of a drag update.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// The pointer went down.
    Start,
    /// The pointer moved while pressed.
    Move,
    /// The pointer was released.
    End,
    /// The gesture was abandoned (Escape, pointer cancel, widget removal).
    Cancel,
}

/// State reported for every drag transition.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragUpdate {
    /// Which transition produced this update.
    pub phase: DragPhase,
    /// Pointer position for this update (the last known one for `Cancel`).
    pub position: Point,
    /// Offset from the press position.
    pub offset: Vec2,
    /// Value captured at press time.
    pub start_value: f64,
}

#[derive(Copy, Clone, Debug)]
struct Gesture {
    pointer: PointerId,
    origin: Point,
    last: Point,
    start_value: f64,
}

impl Gesture {
    fn update(&self, phase: DragPhase) -> DragUpdate {
        DragUpdate {
            phase,
            position: self.last,
            offset: self.last - self.origin,
            start_value: self.start_value,
        }
    }
}

/// Tracks at most one active drag gesture.
#[derive(Clone, Debug, Default)]
pub struct DragState {
    gesture: Option<Gesture>,
}

impl DragState {
    /// No gesture in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Value captured when the active gesture started.
    pub fn start_value(&self) -> Option<f64> {
        self.gesture.map(|g| g.start_value)
    }

    /// Start a gesture. Returns `None` if one is already running.
    ///
    /// `pointer_id` defaults to the primary pointer when `None`.
    pub fn on_down(
        &mut self,
        pointer_id: Option<PointerId>,
        position: Point,
        start_value: f64,
    ) -> Option<DragUpdate> {
        if self.gesture.is_some() {
            return None;
        }
        let gesture = Gesture {
            pointer: pointer_id.unwrap_or(PRIMARY_POINTER),
            origin: position,
            last: position,
            start_value,
        };
        self.gesture = Some(gesture);
        Some(gesture.update(DragPhase::Start))
    }

    /// Track movement of the gesture's pointer.
    pub fn on_move(
        &mut self,
        pointer_id: Option<PointerId>,
        position: Point,
    ) -> Option<DragUpdate> {
        let gesture = self.matching(pointer_id)?;
        gesture.last = position;
        Some(gesture.update(DragPhase::Move))
    }

    /// Finish the gesture on release of its pointer.
    pub fn on_up(&mut self, pointer_id: Option<PointerId>, position: Point) -> Option<DragUpdate> {
        let gesture = self.matching(pointer_id)?;
        gesture.last = position;
        let update = gesture.update(DragPhase::End);
        self.gesture = None;
        Some(update)
    }

    /// Abandon the gesture, if any.
    pub fn cancel(&mut self) -> Option<DragUpdate> {
        self.gesture.take().map(|g| g.update(DragPhase::Cancel))
    }

    fn matching(&mut self, pointer_id: Option<PointerId>) -> Option<&mut Gesture> {
        let pointer = pointer_id.unwrap_or(PRIMARY_POINTER);
        self.gesture.as_mut().filter(|g| g.pointer == pointer)
    }
}
