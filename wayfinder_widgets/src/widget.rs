// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability interface every widget implements.

use wayfinder_focus::keys::KeyInput;

use crate::host::Host;

/// Whether a widget consumed an input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Handled {
    /// The widget acted on the input; the host should suppress its default.
    Yes,
    /// The widget ignored the input.
    No,
}

impl Handled {
    /// `true` for [`Handled::Yes`].
    pub const fn is_handled(self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled { Self::Yes } else { Self::No }
    }
}

/// Lifecycle hooks and capabilities shared by all widgets.
///
/// Each widget exclusively owns its navigation, selection, and overlay state;
/// hosts call these hooks from their own event loop.
pub trait Widget {
    /// The widget's nodes exist. Apply initial ARIA state and tab stops.
    fn on_mount(&mut self, host: &mut dyn Host);

    /// The widget is being removed. Release gesture listeners and restore
    /// focus from any open overlay.
    fn on_unmount(&mut self, host: &mut dyn Host);

    /// A key was pressed while focus was inside the widget.
    ///
    /// `now_ms` is a monotonic timestamp used for typeahead timeouts.
    fn on_key(&mut self, host: &mut dyn Host, input: &KeyInput, now_ms: u64) -> Handled;

    /// Perform the widget's primary action on its active item.
    fn activate(&mut self, host: &mut dyn Host);

    /// Move focus to the widget's first focusable item.
    fn focus_first(&mut self, host: &mut dyn Host);

    /// Close any overlay the widget owns. Widgets without one do nothing.
    fn close(&mut self, host: &mut dyn Host) {
        let _ = host;
    }
}
