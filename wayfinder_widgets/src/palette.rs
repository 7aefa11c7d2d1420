// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command palette: a shortcut-toggled overlay with a fuzzy-filtered result list.
//!
//! Focus stays in the palette's text input while it is open; the highlighted
//! result is exposed through `aria-activedescendant` on the input and
//! `aria-selected` on the results.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use wayfinder_event_state::overlay::{CloseReason, OpenTrigger, OverlayState};
use wayfinder_focus::keys::{Key, KeyInput, Orientation};
use wayfinder_focus::{FocusEntry, Navigation};
use wayfinder_router::events::EventTarget;

use crate::host::{Attr, Host, aria_bool, return_focus};
use crate::roving::{RovingGroup, RovingKey};
use crate::widget::{Handled, Widget};

/// Event emitted when a command is chosen.
pub const COMMAND_SELECT: &str = "command-select";

/// Payload of [`COMMAND_SELECT`]. Cancelable: preventing it keeps the palette open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSelect {
    /// Chosen command.
    pub id: String,
}

/// One entry in the palette.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    /// Command id, also the id of its result row on the host.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Extra search terms.
    pub keywords: Vec<String>,
    /// Whether the command is unavailable.
    pub disabled: bool,
}

impl Command {
    /// An enabled command without keywords.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            keywords: Vec::new(),
            disabled: false,
        }
    }

    /// Add search keywords.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Mark the command unavailable.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// The command palette.
pub struct CommandPalette {
    surface: String,
    input: String,
    commands: Vec<Command>,
    query: String,
    results: RovingGroup,
    matcher: SkimMatcherV2,
    overlay: OverlayState<String>,
    events: EventTarget<CommandSelect>,
}

impl std::fmt::Debug for CommandPalette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandPalette")
            .field("surface", &self.surface)
            .field("input", &self.input)
            .field("commands", &self.commands.len())
            .field("query", &self.query)
            .field("results", &self.results)
            .field("overlay", &self.overlay)
            .finish_non_exhaustive()
    }
}

impl CommandPalette {
    /// A closed palette. `surface` contains `input` and the result rows.
    pub fn new(
        surface: impl Into<String>,
        input: impl Into<String>,
        commands: Vec<Command>,
    ) -> Self {
        let mut palette = Self {
            surface: surface.into(),
            input: input.into(),
            commands,
            query: String::new(),
            results: RovingGroup::new(Vec::new(), Orientation::Vertical).without_typeahead(),
            matcher: SkimMatcherV2::default(),
            overlay: OverlayState::new(),
            events: EventTarget::new(),
        };
        palette.refilter();
        palette
    }

    /// Whether the palette is open.
    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    /// The current query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Result ids in display order.
    pub fn results(&self) -> Vec<&str> {
        self.results
            .registry()
            .items()
            .iter()
            .map(|e| e.id.as_str())
            .collect()
    }

    /// The highlighted result.
    pub fn active(&self) -> Option<&str> {
        self.results.active_id()
    }

    /// Listeners for [`COMMAND_SELECT`].
    pub fn events(&mut self) -> &mut EventTarget<CommandSelect> {
        &mut self.events
    }

    /// Replace the commands.
    pub fn set_commands(&mut self, host: &mut dyn Host, commands: Vec<Command>) {
        self.commands = commands;
        self.refilter();
        self.sync(host);
    }

    /// Update the query typed into the input.
    pub fn set_query(&mut self, host: &mut dyn Host, query: &str) {
        query.clone_into(&mut self.query);
        self.refilter();
        self.results.navigate(Navigation::First);
        self.sync(host);
    }

    fn score(&self, command: &Command) -> Option<i64> {
        std::iter::once(&command.label)
            .chain(&command.keywords)
            .filter_map(|text| self.matcher.fuzzy_match(text, &self.query))
            .max()
    }

    fn refilter(&mut self) {
        let mut scored: Vec<(&Command, i64)> = if self.query.is_empty() {
            self.commands.iter().map(|c| (c, 0)).collect()
        } else {
            self.commands
                .iter()
                .filter_map(|c| self.score(c).map(|s| (c, s)))
                .collect()
        };
        // Stable: equal scores keep declaration order.
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        let entries = scored
            .into_iter()
            .map(|(c, _)| {
                let entry = FocusEntry::new(c.id.clone(), c.label.clone());
                if c.disabled { entry.disabled() } else { entry }
            })
            .collect();
        self.results.set_items(entries);
    }

    fn sync(&self, host: &mut dyn Host) {
        let active = self.results.active_id();
        for entry in self.results.registry().items() {
            let selected = active == Some(entry.id.as_str());
            host.set_attribute(&entry.id, Attr::AriaSelected, aria_bool(selected));
        }
        match active {
            Some(id) => host.set_attribute(&self.input, Attr::AriaActiveDescendant, id),
            None => host.remove_attribute(&self.input, Attr::AriaActiveDescendant),
        }
    }

    /// Open with an empty query and focus the input.
    pub fn open(&mut self, host: &mut dyn Host, trigger: OpenTrigger) -> bool {
        if !self.overlay.begin_open(trigger, host.focused()) {
            return false;
        }
        self.query.clear();
        self.refilter();
        self.results.navigate(Navigation::First);
        self.overlay.finish_open();
        self.sync(host);
        host.focus(&self.input);
        tracing::debug!(palette = %self.surface, ?trigger, "command palette opened");
        true
    }

    /// Close and return focus. Returns `false` if already closed.
    pub fn close_with(&mut self, host: &mut dyn Host, reason: CloseReason) -> bool {
        let Some(transition) = self.overlay.close(reason) else {
            return false;
        };
        tracing::debug!(palette = %self.surface, ?reason, "command palette closed");
        if reason != CloseReason::FocusOut {
            return_focus(host, &transition);
        }
        true
    }

    /// Document-level key handler: Ctrl+K or Meta+K toggles the palette.
    pub fn on_global_key(&mut self, host: &mut dyn Host, input: &KeyInput) -> Handled {
        let is_shortcut = input.has_command_modifier()
            && matches!(input.key, Key::Character('k' | 'K'));
        if !is_shortcut {
            return Handled::No;
        }
        if self.overlay.is_visible() {
            self.close_with(host, CloseReason::Explicit);
        } else {
            self.open(host, OpenTrigger::Shortcut);
        }
        Handled::Yes
    }

    /// Pointer-down anywhere in the document.
    pub fn on_pointer_down(&mut self, host: &mut dyn Host, target: &str) {
        if self.overlay.is_visible() && !host.contains(&self.surface, target) {
            self.close_with(host, CloseReason::OutsidePointer);
        }
    }

    /// Choose `id`. Returns `true` if the choice was not prevented.
    pub fn choose(&mut self, host: &mut dyn Host, id: &str) -> bool {
        let available = self.commands.iter().any(|c| c.id == id && !c.disabled);
        if !available {
            return false;
        }
        let result = self
            .events
            .emit_cancelable(COMMAND_SELECT, CommandSelect { id: id.to_string() });
        if result.default_prevented {
            return false;
        }
        self.close_with(host, CloseReason::ItemSelected);
        true
    }
}

impl Widget for CommandPalette {
    fn on_mount(&mut self, host: &mut dyn Host) {
        self.sync(host);
    }

    fn on_unmount(&mut self, host: &mut dyn Host) {
        self.close_with(host, CloseReason::Disconnect);
    }

    fn on_key(&mut self, host: &mut dyn Host, input: &KeyInput, now_ms: u64) -> Handled {
        if !self.overlay.is_visible() {
            return Handled::No;
        }
        // Home/End edit the input text.
        if matches!(input.key, Key::Home | Key::End) {
            return Handled::No;
        }
        match self.results.handle_key(input, now_ms) {
            RovingKey::Moved => {
                self.sync(host);
                Handled::Yes
            }
            RovingKey::Stayed => Handled::Yes,
            RovingKey::Ignored => match input.key {
                Key::Escape => self.close_with(host, CloseReason::Escape).into(),
                Key::Tab => self.close_with(host, CloseReason::FocusOut).into(),
                Key::Enter => {
                    self.activate(host);
                    Handled::Yes
                }
                _ => Handled::No,
            },
        }
    }

    fn activate(&mut self, host: &mut dyn Host) {
        if let Some(id) = self.results.active_id().map(str::to_string) {
            self.choose(host, &id);
        }
    }

    fn focus_first(&mut self, host: &mut dyn Host) {
        if self.overlay.is_visible() {
            host.focus(&self.input);
        }
    }

    fn close(&mut self, host: &mut dyn Host) {
        self.close_with(host, CloseReason::Explicit);
    }
}
