// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard input model shared by every composite widget.
//!
//! Hosts translate their native key events into [`KeyInput`]; widgets then map
//! arrows through an [`Orientation`] to obtain a [`Navigation`] intent.
//!
//! ```rust
//! use wayfinder_focus::Navigation;
//! use wayfinder_focus::keys::{Key, Orientation};
//!
//! assert_eq!(Orientation::Vertical.navigation_for(Key::ArrowDown), Some(Navigation::Next));
//! // Cross-axis arrows are ignored.
//! assert_eq!(Orientation::Vertical.navigation_for(Key::ArrowRight), None);
//! ```

use crate::Navigation;

/// A logical key, independent of the host's key event representation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Enter / Return.
    Enter,
    /// Space bar.
    Space,
    /// Escape.
    Escape,
    /// Tab (Shift+Tab is Tab with [`Modifiers::SHIFT`]).
    Tab,
    /// A printable character.
    Character(char),
    /// Any key the interaction model does not care about.
    Other,
}

bitflags::bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Alt / Option.
        const ALT   = 0b0000_0100;
        /// Meta / Command / Super.
        const META  = 0b0000_1000;
    }
}

/// A key press together with its modifiers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyInput {
    /// The key that was pressed.
    pub key: Key,
    /// Modifiers held at the time.
    pub modifiers: Modifiers,
}

impl KeyInput {
    /// A key press without modifiers.
    pub const fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// A key press with modifiers.
    pub const fn with(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// The printable character for typeahead, if this press is one.
    ///
    /// Presses carrying Ctrl, Alt, or Meta are shortcuts, not typing.
    pub fn typeahead_char(&self) -> Option<char> {
        if self
            .modifiers
            .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META)
        {
            return None;
        }
        match self.key {
            Key::Character(c) if !c.is_control() => Some(c),
            Key::Space => Some(' '),
            _ => None,
        }
    }

    /// Whether Ctrl or Meta is held (the platform "command" modifier).
    pub fn has_command_modifier(&self) -> bool {
        self.modifiers.intersects(Modifiers::CTRL | Modifiers::META)
    }
}

impl From<Key> for KeyInput {
    fn from(key: Key) -> Self {
        Self::plain(key)
    }
}

/// Axis along which a composite widget lays out its items.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Left/Right move (tab lists, toolbars).
    Horizontal,
    /// Up/Down move (menus, listboxes, activity bars).
    #[default]
    Vertical,
    /// Both axes move (radio groups).
    Both,
}

impl Orientation {
    /// Map a key to a navigation intent for this orientation.
    ///
    /// Home/End map to [`Navigation::First`]/[`Navigation::Last`] regardless of
    /// orientation; keys with no meaning return `None` and must be no-ops.
    pub fn navigation_for(self, key: Key) -> Option<Navigation> {
        match (self, key) {
            (_, Key::Home) => Some(Navigation::First),
            (_, Key::End) => Some(Navigation::Last),
            (Self::Vertical | Self::Both, Key::ArrowDown) => Some(Navigation::Next),
            (Self::Vertical | Self::Both, Key::ArrowUp) => Some(Navigation::Prev),
            (Self::Horizontal | Self::Both, Key::ArrowRight) => Some(Navigation::Next),
            (Self::Horizontal | Self::Both, Key::ArrowLeft) => Some(Navigation::Prev),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_ignores_vertical_arrows() {
        let o = Orientation::Horizontal;
        assert_eq!(o.navigation_for(Key::ArrowRight), Some(Navigation::Next));
        assert_eq!(o.navigation_for(Key::ArrowLeft), Some(Navigation::Prev));
        assert_eq!(o.navigation_for(Key::ArrowDown), None);
        assert_eq!(o.navigation_for(Key::Enter), None);
    }

    #[test]
    fn both_accepts_every_arrow() {
        let o = Orientation::Both;
        assert_eq!(o.navigation_for(Key::ArrowDown), Some(Navigation::Next));
        assert_eq!(o.navigation_for(Key::ArrowLeft), Some(Navigation::Prev));
        assert_eq!(o.navigation_for(Key::End), Some(Navigation::Last));
    }

    #[test]
    fn shortcuts_are_not_typeahead() {
        let typed = KeyInput::plain(Key::Character('b'));
        assert_eq!(typed.typeahead_char(), Some('b'));
        let shifted = KeyInput::with(Key::Character('B'), Modifiers::SHIFT);
        assert_eq!(shifted.typeahead_char(), Some('B'));
        let shortcut = KeyInput::with(Key::Character('k'), Modifiers::CTRL);
        assert_eq!(shortcut.typeahead_char(), None);
        assert!(shortcut.has_command_modifier());
    }
}
