//! Raw structured values logged straight into the console.
//!
//! A `RawObjectEntry` wraps an arbitrary JSON-like value. Arrays and
//! non-empty maps expand into child entries, one per element or field,
//! capped at [`MAX_CHILDREN`].

use crate::model::{EntryId, SourceLocation};
use serde_json::Value;
use std::sync::OnceLock;

/// Maximum number of children a raw value expands into.
pub const MAX_CHILDREN: usize = 1000;

/// A named, arbitrarily nested value in the log.
#[derive(Debug, Clone)]
pub struct RawObjectEntry {
    id: EntryId,
    name: String,
    value: Value,
    source: Option<SourceLocation>,
    annotation: Option<String>,
    display: OnceLock<String>,
}

impl RawObjectEntry {
    /// Create a raw value entry.
    pub fn new(
        id: EntryId,
        name: impl Into<String>,
        value: Value,
        source: Option<SourceLocation>,
        annotation: Option<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            value,
            source,
            annotation,
            display: OnceLock::new(),
        }
    }

    // ===== Accessors (read-only) =====

    /// Stable entry id.
    pub fn id(&self) -> &EntryId {
        &self.id
    }

    /// Display name (the key or index for children).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wrapped value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Source locator, if any.
    pub fn source(&self) -> Option<&SourceLocation> {
        self.source.as_ref()
    }

    /// Hover annotation, if any.
    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    /// One-line summary of the value, computed on first use.
    ///
    /// `null`, `Array[n]`, `Object`, a quoted string, or the scalar's JSON text.
    pub fn value_display(&self) -> &str {
        self.display.get_or_init(|| match &self.value {
            Value::Null => "null".to_string(),
            Value::Array(items) => format!("Array[{}]", items.len()),
            Value::Object(_) => "Object".to_string(),
            Value::String(s) => format!("\"{s}\""),
            scalar => scalar.to_string(),
        })
    }

    /// True iff the value is a non-empty array or a map with at least one key.
    pub fn has_children(&self) -> bool {
        match &self.value {
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            _ => false,
        }
    }

    /// Expand into child entries.
    ///
    /// Async to share the lazy-expansion contract of evaluated expressions;
    /// the data is already resident so this never suspends. Map children
    /// are numbered by enumeration order, not by key.
    pub async fn children(&self) -> Vec<RawObjectEntry> {
        match &self.value {
            Value::Array(items) => items
                .iter()
                .take(MAX_CHILDREN)
                .enumerate()
                .map(|(index, item)| {
                    RawObjectEntry::new(
                        self.id.child(index),
                        index.to_string(),
                        item.clone(),
                        None,
                        None,
                    )
                })
                .collect(),
            Value::Object(map) => map
                .iter()
                .take(MAX_CHILDREN)
                .enumerate()
                .map(|(index, (key, item))| {
                    RawObjectEntry::new(self.id.child(index), key.clone(), item.clone(), None, None)
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Plain-text form: the name, then the value as indented JSON.
    pub fn render_as_text(&self) -> String {
        let json =
            serde_json::to_string_pretty(&self.value).unwrap_or_else(|_| self.value.to_string());
        format!("{}\n{}", self.name, json)
    }
}
