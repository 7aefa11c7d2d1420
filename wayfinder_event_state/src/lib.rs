// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder Event State: stateful interaction machines for composite widgets.
//!
//! Each module tracks just enough state across several input events to compute
//! the next transition:
//!
//! - [`overlay`]: `closed → opening → open → closing → closed` for menus,
//!   dialogs, command palettes, and sidebars, including the focus-return
//!   target captured when the overlay opens.
//! - [`drag`]: one pointer drag gesture (for example, a resizable panel
//!   separator) with the offset since the press.
//!
//! The machines accept pre-computed information (which element had focus, where
//! the pointer is) and return transitions; they never touch a UI toolkit
//! directly.
//!
//! ## Overlay
//!
//! ```rust
//! use wayfinder_event_state::overlay::{CloseReason, OpenTrigger, OverlayPhase, OverlayState};
//!
//! let mut menu: OverlayState<&str> = OverlayState::new();
//! assert!(menu.open(OpenTrigger::Click, Some("menu-button")));
//! // Opening again while open is a no-op and does not replace the return target.
//! assert!(!menu.open(OpenTrigger::Shortcut, Some("menu-item-2")));
//! let closed = menu.close(CloseReason::Escape).unwrap();
//! assert_eq!(closed.return_target, Some("menu-button"));
//! assert_eq!(menu.phase(), OverlayPhase::Closed);
//! ```
//!
//! ## Drag
//!
//! ```rust
//! use kurbo::Point;
//! use wayfinder_event_state::drag::{DragPhase, DragState};
//!
//! let mut drag = DragState::new();
//! drag.on_down(None, Point::new(100.0, 0.0), 240.0);
//! let update = drag.on_move(None, Point::new(130.0, 5.0)).unwrap();
//! assert_eq!(update.phase, DragPhase::Move);
//! assert_eq!(update.offset.x, 30.0);
//! let end = drag.on_up(None, Point::new(140.0, 5.0)).unwrap();
//! assert_eq!(end.phase, DragPhase::End);
//! assert!(!drag.is_active());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;
pub mod overlay;
