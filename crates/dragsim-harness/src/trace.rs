#![forbid(unsafe_code)]

//! JSONL traces of a dispatch log, with checksums for golden comparisons.
//!
//! One line per recorded event or notification, keyed by element name so the
//! trace stays stable when element ids shift. The checksum is a blake3 hash
//! of the JSONL text.

use dragsim_core::event::Modifiers;
use serde_json::{Value, json};

use crate::fake_document::{FakeDocument, Recorded};

/// Prefix that names the checksum algorithm.
const CHECKSUM_PREFIX: &str = "blake3:";

/// Serialized dispatch log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLog {
    lines: Vec<String>,
}

impl TraceLog {
    /// Trace everything `doc` has recorded.
    #[must_use]
    pub fn capture(doc: &FakeDocument) -> Self {
        Self::from_records(doc, doc.log())
    }

    /// Trace `records`, naming elements through `doc`.
    #[must_use]
    pub fn from_records(doc: &FakeDocument, records: &[Recorded]) -> Self {
        let lines = records
            .iter()
            .enumerate()
            .map(|(seq, record)| record_json(doc, seq, record).to_string())
            .collect();
        Self { lines }
    }

    /// Number of traced entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Individual JSON lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Newline-terminated JSONL text.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// `blake3:<hex>` checksum of [`to_jsonl`](Self::to_jsonl).
    #[must_use]
    pub fn checksum(&self) -> String {
        let hash = blake3::hash(self.to_jsonl().as_bytes());
        format!("{CHECKSUM_PREFIX}{}", hash.to_hex())
    }

    /// Index of the first line that differs from `expected`, if any.
    #[must_use]
    pub fn first_divergence(&self, expected: &TraceLog) -> Option<usize> {
        let common = self.lines.len().min(expected.lines.len());
        (0..common)
            .find(|&i| self.lines[i] != expected.lines[i])
            .or_else(|| (self.lines.len() != expected.lines.len()).then_some(common))
    }
}

fn record_json(doc: &FakeDocument, seq: usize, record: &Recorded) -> Value {
    match record {
        Recorded::Event { target, event } => json!({
            "seq": seq,
            "type": event.kind.name(),
            "target": doc.name_of(*target),
            "bubbles": true,
            "cancelable": event.kind.cancelable(),
            "pageX": event.page_x,
            "pageY": event.page_y,
            "clientX": event.client_x,
            "clientY": event.client_y,
            "button": event.button.code(),
            "shiftKey": event.modifiers.contains(Modifiers::SHIFT),
            "altKey": event.modifiers.contains(Modifiers::ALT),
            "ctrlKey": event.modifiers.contains(Modifiers::CTRL),
            "metaKey": event.modifiers.contains(Modifiers::META),
            "extra": event.extra,
        }),
        Recorded::Notification {
            target,
            notification,
        } => json!({
            "seq": seq,
            "type": notification.name(),
            "target": doc.name_of(*target),
        }),
    }
}
