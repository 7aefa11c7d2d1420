// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page navigation with a clamped current page.
//!
//! Pages are 1-based. The page is clamped into `1..=page_count` at
//! construction and on every change, so out-of-range requests never fail.

use wayfinder_focus::keys::{Key, KeyInput};
use wayfinder_router::events::EventTarget;

use crate::host::{Attr, Host};
use crate::widget::{Handled, Widget};

/// Event emitted before the page changes. Cancelable.
pub const PAGINATION_CHANGE: &str = "pagination-change";

/// Smallest useful window: first, gap, current, gap, last.
pub const MIN_WINDOW: usize = 5;

/// Payload of [`PAGINATION_CHANGE`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PaginationChange {
    /// The requested page.
    pub page: u32,
    /// The page before the change.
    pub previous: u32,
}

/// One slot of a rendered page window.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PageSlot {
    /// A page button.
    Page(u32),
    /// Elided pages.
    Gap,
}

/// Pagination state.
///
/// Page buttons are addressed as `{prefix}-{page}` on the host.
///
/// ```rust
/// use wayfinder_widgets::pagination::{PageSlot, Pagination};
///
/// let p = Pagination::new("pages", 12, 3);
/// assert_eq!(p.page(), 3);
///
/// let p = Pagination::new("pages", 10, 20);
/// assert_eq!(
///     p.window(7),
///     [
///         PageSlot::Page(1),
///         PageSlot::Gap,
///         PageSlot::Page(9),
///         PageSlot::Page(10),
///         PageSlot::Page(11),
///         PageSlot::Gap,
///         PageSlot::Page(20),
///     ]
/// );
/// ```
#[derive(Debug)]
pub struct Pagination {
    prefix: String,
    page: u32,
    page_count: u32,
    events: EventTarget<PaginationChange>,
}

impl Pagination {
    /// `page` clamped into `1..=page_count`; a zero count is treated as one.
    pub fn new(prefix: impl Into<String>, page: u32, page_count: u32) -> Self {
        let page_count = page_count.max(1);
        Self {
            prefix: prefix.into(),
            page: page.clamp(1, page_count),
            page_count,
            events: EventTarget::new(),
        }
    }

    /// The current page.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Listeners for [`PAGINATION_CHANGE`].
    pub fn events(&mut self) -> &mut EventTarget<PaginationChange> {
        &mut self.events
    }

    fn button(&self, page: u32) -> String {
        format!("{}-{page}", self.prefix)
    }

    /// Move to `page` (clamped).
    ///
    /// Emits [`PAGINATION_CHANGE`] only when the clamped page differs. Returns
    /// `true` if the page changed.
    pub fn set_page(&mut self, host: &mut dyn Host, page: u32) -> bool {
        let target = page.clamp(1, self.page_count);
        if target == self.page {
            return false;
        }
        let previous = self.page;
        let result = self.events.emit_cancelable(
            PAGINATION_CHANGE,
            PaginationChange {
                page: target,
                previous,
            },
        );
        if result.default_prevented {
            tracing::debug!(page = target, previous, "page change prevented");
            return false;
        }
        self.page = target;
        host.remove_attribute(&self.button(previous), Attr::AriaCurrent);
        host.set_attribute(&self.button(target), Attr::AriaCurrent, "page");
        true
    }

    /// Change the page count, clamping the current page without an event.
    pub fn set_page_count(&mut self, host: &mut dyn Host, page_count: u32) {
        self.page_count = page_count.max(1);
        let clamped = self.page.min(self.page_count);
        if clamped != self.page {
            host.remove_attribute(&self.button(self.page), Attr::AriaCurrent);
            self.page = clamped;
            host.set_attribute(&self.button(clamped), Attr::AriaCurrent, "page");
        }
    }

    /// Next page.
    pub fn next(&mut self, host: &mut dyn Host) -> bool {
        self.set_page(host, self.page.saturating_add(1))
    }

    /// Previous page.
    pub fn prev(&mut self, host: &mut dyn Host) -> bool {
        self.set_page(host, self.page.saturating_sub(1))
    }

    /// First page.
    pub fn first(&mut self, host: &mut dyn Host) -> bool {
        self.set_page(host, 1)
    }

    /// Last page.
    pub fn last(&mut self, host: &mut dyn Host) -> bool {
        self.set_page(host, self.page_count)
    }

    /// At most `size` slots (minimum [`MIN_WINDOW`]) around the current page,
    /// always including the first and last pages.
    pub fn window(&self, size: usize) -> Vec<PageSlot> {
        let size = u32::try_from(size.max(MIN_WINDOW)).unwrap_or(u32::MAX);
        let count = self.page_count;
        if count <= size {
            return (1..=count).map(PageSlot::Page).collect();
        }
        let middle = size - 4;
        let start = self.page.saturating_sub(middle / 2);
        let end = start + middle - 1;
        let mut slots = Vec::with_capacity(size as usize);
        if start <= 3 {
            slots.extend((1..=size - 2).map(PageSlot::Page));
            slots.extend([PageSlot::Gap, PageSlot::Page(count)]);
        } else if end >= count - 2 {
            slots.extend([PageSlot::Page(1), PageSlot::Gap]);
            slots.extend((count - size + 3..=count).map(PageSlot::Page));
        } else {
            slots.extend([PageSlot::Page(1), PageSlot::Gap]);
            slots.extend((start..=end).map(PageSlot::Page));
            slots.extend([PageSlot::Gap, PageSlot::Page(count)]);
        }
        slots
    }
}

impl Widget for Pagination {
    fn on_mount(&mut self, host: &mut dyn Host) {
        host.set_attribute(&self.button(self.page), Attr::AriaCurrent, "page");
    }

    fn on_unmount(&mut self, _host: &mut dyn Host) {}

    fn on_key(&mut self, host: &mut dyn Host, input: &KeyInput, _now_ms: u64) -> Handled {
        if input.has_command_modifier() {
            return Handled::No;
        }
        match input.key {
            Key::ArrowLeft | Key::PageUp => self.prev(host),
            Key::ArrowRight | Key::PageDown => self.next(host),
            Key::Home => self.first(host),
            Key::End => self.last(host),
            _ => return Handled::No,
        };
        host.focus(&self.button(self.page));
        Handled::Yes
    }

    fn activate(&mut self, _host: &mut dyn Host) {}

    fn focus_first(&mut self, host: &mut dyn Host) {
        host.focus(&self.button(self.page));
    }
}
