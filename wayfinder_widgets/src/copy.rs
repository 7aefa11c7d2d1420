// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Copy-to-clipboard actions: code blocks and JSON diffs.
//!
//! Clipboard failures never propagate. They are logged and reported as
//! `success: false` on the emitted event.

use serde_json::Value;
use wayfinder_focus::keys::{Key, KeyInput};
use wayfinder_router::events::EventTarget;

use crate::host::Host;
use crate::widget::{Handled, Widget};

/// Event emitted after a code block copy attempt.
pub const CODE_BLOCK_COPY: &str = "code-block-copy";

/// Event emitted after a JSON diff copy attempt.
pub const JSON_DIFF_COPY: &str = "json-diff-copy";

fn write(host: &mut dyn Host, text: &str) -> bool {
    match host.write_clipboard(text) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(%err, "clipboard write failed");
            false
        }
    }
}

/// Payload of [`CODE_BLOCK_COPY`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlockCopy {
    /// The text that was copied.
    pub value: String,
    /// Whether the clipboard accepted it.
    pub success: bool,
}

/// A code sample with a copy button.
#[derive(Debug)]
pub struct CodeBlock {
    button: String,
    value: String,
    events: EventTarget<CodeBlockCopy>,
}

impl CodeBlock {
    /// A block showing `value`, copied by the host node `button`.
    pub fn new(button: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            button: button.into(),
            value: value.into(),
            events: EventTarget::new(),
        }
    }

    /// The code.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the code.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Listeners for [`CODE_BLOCK_COPY`].
    pub fn events(&mut self) -> &mut EventTarget<CodeBlockCopy> {
        &mut self.events
    }

    /// Copy the code. Returns whether the clipboard accepted it.
    pub fn copy(&mut self, host: &mut dyn Host) -> bool {
        let success = write(host, &self.value);
        self.events.emit(
            CODE_BLOCK_COPY,
            CodeBlockCopy {
                value: self.value.clone(),
                success,
            },
        );
        success
    }
}

impl Widget for CodeBlock {
    fn on_mount(&mut self, _host: &mut dyn Host) {}

    fn on_unmount(&mut self, _host: &mut dyn Host) {}

    /// Keys on the copy button.
    fn on_key(&mut self, host: &mut dyn Host, input: &KeyInput, _now_ms: u64) -> Handled {
        match input.key {
            Key::Enter | Key::Space => {
                self.copy(host);
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn activate(&mut self, host: &mut dyn Host) {
        self.copy(host);
    }

    fn focus_first(&mut self, host: &mut dyn Host) {
        host.focus(&self.button);
    }
}

/// How a JSON location differs between the two documents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DiffKind {
    /// Only present in the new document.
    Added,
    /// Only present in the old document.
    Removed,
    /// Present in both with different scalar values or types.
    Changed,
}

/// One difference, addressed by JSON pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffEntry {
    /// JSON pointer (RFC 6901) of the location; `""` is the root.
    pub path: String,
    /// Kind of difference.
    pub kind: DiffKind,
}

/// What a JSON diff copy placed on the clipboard.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CopyKind {
    /// The JSON pointer itself.
    Path,
    /// The value at the pointer, pretty-printed.
    Value,
}

/// Payload of [`JSON_DIFF_COPY`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonDiffCopy {
    /// Path or value.
    pub kind: CopyKind,
    /// The JSON pointer the action targeted.
    pub path: String,
    /// Whether anything was written to the clipboard.
    pub success: bool,
}

/// A structural diff of two JSON documents.
///
/// ```rust
/// use serde_json::json;
/// use wayfinder_widgets::copy::{DiffKind, JsonDiff};
///
/// let diff = JsonDiff::new(json!({"a": 1, "b": [1, 2]}), json!({"a": 2, "b": [1]}));
/// let changes: Vec<_> = diff.changes().iter().map(|c| (c.path.as_str(), c.kind)).collect();
/// assert_eq!(changes, [("/a", DiffKind::Changed), ("/b/1", DiffKind::Removed)]);
/// ```
#[derive(Debug)]
pub struct JsonDiff {
    before: Value,
    after: Value,
    changes: Vec<DiffEntry>,
    events: EventTarget<JsonDiffCopy>,
}

impl JsonDiff {
    /// Diff `before` against `after`.
    pub fn new(before: Value, after: Value) -> Self {
        let mut changes = Vec::new();
        diff_values(&mut String::new(), &before, &after, &mut changes);
        Self {
            before,
            after,
            changes,
            events: EventTarget::new(),
        }
    }

    /// Differences in document order.
    pub fn changes(&self) -> &[DiffEntry] {
        &self.changes
    }

    /// The old document.
    pub fn before(&self) -> &Value {
        &self.before
    }

    /// The new document.
    pub fn after(&self) -> &Value {
        &self.after
    }

    /// Listeners for [`JSON_DIFF_COPY`].
    pub fn events(&mut self) -> &mut EventTarget<JsonDiffCopy> {
        &mut self.events
    }

    /// Copy the pointer `path`.
    pub fn copy_path(&mut self, host: &mut dyn Host, path: &str) -> bool {
        let success = write(host, path);
        self.report(CopyKind::Path, path, success)
    }

    /// Copy the value at `path`, preferring the new document.
    ///
    /// Removed locations resolve in the old document. An unresolvable pointer
    /// copies nothing and reports failure.
    pub fn copy_value(&mut self, host: &mut dyn Host, path: &str) -> bool {
        let resolved = self.after.pointer(path).or_else(|| self.before.pointer(path));
        let success = match resolved.map(serde_json::to_string_pretty) {
            Some(Ok(text)) => write(host, &text),
            Some(Err(err)) => {
                tracing::warn!(path, %err, "failed to serialize diff value");
                false
            }
            None => {
                tracing::warn!(path, "diff path does not resolve");
                false
            }
        };
        self.report(CopyKind::Value, path, success)
    }

    fn report(&mut self, kind: CopyKind, path: &str, success: bool) -> bool {
        self.events.emit(
            JSON_DIFF_COPY,
            JsonDiffCopy {
                kind,
                path: path.to_string(),
                success,
            },
        );
        success
    }
}

fn push_segment(path: &mut String, segment: &str) -> usize {
    let len = path.len();
    path.push('/');
    path.push_str(&segment.replace('~', "~0").replace('/', "~1"));
    len
}

fn diff_values(path: &mut String, before: &Value, after: &Value, out: &mut Vec<DiffEntry>) {
    match (before, after) {
        (Value::Object(old), Value::Object(new)) => {
            for (key, old_value) in old {
                let len = push_segment(path, key);
                match new.get(key) {
                    Some(new_value) => diff_values(path, old_value, new_value, out),
                    None => out.push(DiffEntry {
                        path: path.clone(),
                        kind: DiffKind::Removed,
                    }),
                }
                path.truncate(len);
            }
            for key in new.keys().filter(|k| !old.contains_key(*k)) {
                let len = push_segment(path, key);
                out.push(DiffEntry {
                    path: path.clone(),
                    kind: DiffKind::Added,
                });
                path.truncate(len);
            }
        }
        (Value::Array(old), Value::Array(new)) => {
            for index in 0..old.len().max(new.len()) {
                let len = push_segment(path, &index.to_string());
                match (old.get(index), new.get(index)) {
                    (Some(o), Some(n)) => diff_values(path, o, n, out),
                    (Some(_), None) => out.push(DiffEntry {
                        path: path.clone(),
                        kind: DiffKind::Removed,
                    }),
                    (None, Some(_)) => out.push(DiffEntry {
                        path: path.clone(),
                        kind: DiffKind::Added,
                    }),
                    (None, None) => {}
                }
                path.truncate(len);
            }
        }
        _ if before != after => out.push(DiffEntry {
            path: path.clone(),
            kind: DiffKind::Changed,
        }),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClipboardError;
    use crate::host::MemoryHost;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wayfinder_router::events::{Event, Outcome};

    #[test]
    fn code_block_reports_clipboard_failure() {
        let mut host = MemoryHost::with_nodes(["copy"]);
        let mut block = CodeBlock::new("copy", "cargo add wayfinder_widgets");
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        block.events().add_listener(move |e: &mut Event<CodeBlockCopy>| {
            sink.borrow_mut().push(e.payload.success);
            Outcome::Continue
        });
        assert!(block.on_key(&mut host, &Key::Enter.into(), 0).is_handled());
        assert_eq!(host.clipboard(), Some("cargo add wayfinder_widgets"));
        host.fail_clipboard(Some(ClipboardError::Unavailable));
        assert!(!block.copy(&mut host));
        assert_eq!(*log.borrow(), [true, false]);
    }

    #[test]
    fn diff_covers_nested_objects_and_escapes_keys() {
        let diff = JsonDiff::new(
            json!({"a/b": {"x": 1, "y": true}, "t~": "same", "gone": null}),
            json!({"a/b": {"x": 1, "y": false, "z": [1]}, "t~": "same", "new": 3}),
        );
        let changes: Vec<_> = diff
            .changes()
            .iter()
            .map(|c| (c.path.as_str(), c.kind))
            .collect();
        assert_eq!(
            changes,
            [
                ("/a~1b/y", DiffKind::Changed),
                ("/a~1b/z", DiffKind::Added),
                ("/gone", DiffKind::Removed),
                ("/new", DiffKind::Added),
            ]
        );
        assert!(JsonDiff::new(json!(1), json!(1)).changes().is_empty());
        assert_eq!(
            JsonDiff::new(json!(1), json!("1")).changes(),
            [DiffEntry {
                path: String::new(),
                kind: DiffKind::Changed,
            }]
        );
    }

    #[test]
    fn copies_paths_and_pretty_values() {
        let mut host = MemoryHost::new();
        let mut diff = JsonDiff::new(json!({"old": {"k": 1}}), json!({"new": [true]}));
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        diff.events().add_listener(move |e: &mut Event<JsonDiffCopy>| {
            sink.borrow_mut().push(e.payload.clone());
            Outcome::Continue
        });

        assert!(diff.copy_path(&mut host, "/new/0"));
        assert_eq!(host.clipboard(), Some("/new/0"));
        assert!(diff.copy_value(&mut host, "/old"));
        assert_eq!(host.clipboard(), Some("{\n  \"k\": 1\n}"));
        assert!(!diff.copy_value(&mut host, "/missing"));

        let log = log.borrow();
        assert_eq!(log[0].kind, CopyKind::Path);
        assert_eq!(log[1].kind, CopyKind::Value);
        assert!(!log[2].success);
        assert_eq!(log[2].path, "/missing");
    }
}
