// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two panels split by a draggable, focusable separator.
//!
//! The split is stored as the first panel's share of the container
//! (`ratio`), always clamped to [`PanelLimits`]. Pointer drags hold
//! document-level listeners from press until release, cancel, Escape, or
//! unmount, whichever comes first. Keyboard resizing on the separator moves by
//! [`PanelLimits::step`]; Home and End jump to the limits.

use kurbo::Point;
use wayfinder_event_state::drag::{DragPhase, DragState, DragUpdate, PointerId};
use wayfinder_focus::Navigation;
use wayfinder_focus::keys::{Key, KeyInput, Orientation};
use wayfinder_router::events::EventTarget;

use crate::host::{Attr, Host, ListenerToken};
use crate::widget::{Handled, Widget};

/// Event emitted for every size change.
pub const RESIZABLE_PANELS_RESIZE: &str = "resizable-panels-resize";

/// Bounds and keyboard step for the split ratio.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanelLimits {
    /// Smallest share of the first panel.
    pub min_ratio: f64,
    /// Largest share of the first panel.
    pub max_ratio: f64,
    /// Ratio change per arrow key.
    pub step: f64,
}

impl Default for PanelLimits {
    fn default() -> Self {
        Self {
            min_ratio: 0.1,
            max_ratio: 0.9,
            step: 0.05,
        }
    }
}

impl PanelLimits {
    /// Limits that are safe to clamp against.
    ///
    /// Bounds are kept inside `0.0..=1.0` and put in order; a NaN bound takes
    /// the default. A step that is zero or not finite takes the default, and a
    /// negative step is made positive.
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let bound = |value: f64, fallback: f64| {
            if value.is_nan() { fallback } else { value.clamp(0.0, 1.0) }
        };
        let a = bound(self.min_ratio, defaults.min_ratio);
        let b = bound(self.max_ratio, defaults.max_ratio);
        let step = if self.step.is_finite() && self.step != 0.0 {
            self.step.abs()
        } else {
            defaults.step
        };
        Self {
            min_ratio: a.min(b),
            max_ratio: a.max(b),
            step,
        }
    }

    /// A NaN ratio lands on the lower bound.
    fn clamp(&self, ratio: f64) -> f64 {
        ratio.max(self.min_ratio).min(self.max_ratio)
    }
}

/// What caused a resize.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResizeSource {
    /// A pointer drag on the separator.
    Pointer,
    /// Arrow, Home, or End on the focused separator.
    Keyboard,
}

/// Payload of [`RESIZABLE_PANELS_RESIZE`].
///
/// Keyboard resizes are reported as a single [`DragPhase::End`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanelResize {
    /// Pointer or keyboard.
    pub source: ResizeSource,
    /// Gesture phase.
    pub phase: DragPhase,
    /// First panel size when the gesture started, in host units.
    pub start_size: f64,
    /// First panel size after this update.
    pub end_size: f64,
    /// First panel share after this update.
    pub ratio: f64,
}

/// A resizable two-panel split.
#[derive(Debug)]
pub struct ResizablePanels {
    separator: String,
    orientation: Orientation,
    limits: PanelLimits,
    container_size: f64,
    ratio: f64,
    drag: DragState,
    listeners: Option<ListenerToken>,
    events: EventTarget<PanelResize>,
}

impl ResizablePanels {
    /// A split at `ratio` (clamped). `Horizontal` places the panels side by
    /// side and resizes along x; `Vertical` stacks them along y.
    pub fn new(separator: impl Into<String>, orientation: Orientation, ratio: f64) -> Self {
        let limits = PanelLimits::default();
        Self {
            separator: separator.into(),
            orientation,
            limits,
            container_size: 0.0,
            ratio: limits.clamp(ratio),
            drag: DragState::new(),
            listeners: None,
            events: EventTarget::new(),
        }
    }

    /// Use `limits` (see [`PanelLimits::normalized`]), re-clamping the
    /// current ratio.
    #[must_use]
    pub fn with_limits(mut self, limits: PanelLimits) -> Self {
        self.limits = limits.normalized();
        self.ratio = self.limits.clamp(self.ratio);
        self
    }

    /// The first panel's share.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// The first panel's size in host units.
    pub fn size(&self) -> f64 {
        self.ratio * self.container_size
    }

    /// Whether a pointer drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Listeners for [`RESIZABLE_PANELS_RESIZE`].
    pub fn events(&mut self) -> &mut EventTarget<PanelResize> {
        &mut self.events
    }

    /// Record the container's length along the resize axis.
    pub fn set_container_size(&mut self, size: f64) {
        self.container_size = size.max(0.0);
    }

    /// Pointer pressed on the separator.
    pub fn pointer_down(
        &mut self,
        host: &mut dyn Host,
        pointer: Option<PointerId>,
        position: Point,
    ) -> bool {
        let Some(update) = self.drag.on_down(pointer, position, self.size()) else {
            return false;
        };
        self.listeners = Some(host.add_gesture_listeners());
        self.report(host, ResizeSource::Pointer, update);
        true
    }

    /// Pointer moved while the document listeners are active.
    pub fn pointer_move(
        &mut self,
        host: &mut dyn Host,
        pointer: Option<PointerId>,
        position: Point,
    ) {
        if let Some(update) = self.drag.on_move(pointer, position) {
            self.apply_drag(&update);
            self.report(host, ResizeSource::Pointer, update);
        }
    }

    /// Pointer released.
    pub fn pointer_up(
        &mut self,
        host: &mut dyn Host,
        pointer: Option<PointerId>,
        position: Point,
    ) {
        if let Some(update) = self.drag.on_up(pointer, position) {
            self.apply_drag(&update);
            self.release(host);
            self.report(host, ResizeSource::Pointer, update);
        }
    }

    /// Abandon the drag and restore the size it started from.
    pub fn cancel_drag(&mut self, host: &mut dyn Host) -> bool {
        let Some(update) = self.drag.cancel() else {
            return false;
        };
        self.ratio = self.ratio_for(update.start_value);
        self.release(host);
        tracing::debug!(separator = %self.separator, "panel drag cancelled");
        self.report(host, ResizeSource::Pointer, update);
        true
    }

    /// Set the ratio directly, as a keyboard resize would.
    pub fn set_ratio(&mut self, host: &mut dyn Host, ratio: f64) {
        let start_size = self.size();
        self.ratio = self.limits.clamp(ratio);
        host.set_attribute(&self.separator, Attr::AriaValueNow, &self.value_now());
        self.events.emit(
            RESIZABLE_PANELS_RESIZE,
            PanelResize {
                source: ResizeSource::Keyboard,
                phase: DragPhase::End,
                start_size,
                end_size: self.size(),
                ratio: self.ratio,
            },
        );
    }

    fn axis_offset(&self, update: &DragUpdate) -> f64 {
        match self.orientation {
            Orientation::Vertical => update.offset.y,
            Orientation::Horizontal | Orientation::Both => update.offset.x,
        }
    }

    fn apply_drag(&mut self, update: &DragUpdate) {
        self.ratio = self.ratio_for(update.start_value + self.axis_offset(update));
    }

    fn ratio_for(&self, size: f64) -> f64 {
        if self.container_size <= 0.0 {
            return self.ratio;
        }
        self.limits.clamp(size / self.container_size)
    }

    fn release(&mut self, host: &mut dyn Host) {
        if let Some(token) = self.listeners.take() {
            host.remove_gesture_listeners(token);
        }
    }

    fn value_now(&self) -> String {
        format!("{:.0}", self.ratio * 100.0)
    }

    fn report(&mut self, host: &mut dyn Host, source: ResizeSource, update: DragUpdate) {
        host.set_attribute(&self.separator, Attr::AriaValueNow, &self.value_now());
        self.events.emit(
            RESIZABLE_PANELS_RESIZE,
            PanelResize {
                source,
                phase: update.phase,
                start_size: update.start_value,
                end_size: self.size(),
                ratio: self.ratio,
            },
        );
    }
}

impl Widget for ResizablePanels {
    fn on_mount(&mut self, host: &mut dyn Host) {
        host.set_attribute(&self.separator, Attr::TabIndex, "0");
        host.set_attribute(&self.separator, Attr::AriaValueNow, &self.value_now());
    }

    fn on_unmount(&mut self, host: &mut dyn Host) {
        self.cancel_drag(host);
    }

    /// Keys on the focused separator.
    fn on_key(&mut self, host: &mut dyn Host, input: &KeyInput, _now_ms: u64) -> Handled {
        if input.key == Key::Escape {
            return self.cancel_drag(host).into();
        }
        if input.has_command_modifier() || self.drag.is_active() {
            return Handled::No;
        }
        let target = match self.orientation.navigation_for(input.key) {
            Some(Navigation::Next) => self.ratio + self.limits.step,
            Some(Navigation::Prev) => self.ratio - self.limits.step,
            Some(Navigation::First) => self.limits.min_ratio,
            Some(Navigation::Last) => self.limits.max_ratio,
            _ => return Handled::No,
        };
        self.set_ratio(host, target);
        Handled::Yes
    }

    fn activate(&mut self, _host: &mut dyn Host) {}

    fn focus_first(&mut self, host: &mut dyn Host) {
        host.focus(&self.separator);
    }
}
