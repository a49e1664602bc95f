//! REPL entry types.
//!
//! `ReplEntry` is the tagged set of everything that can appear in the
//! console log. The store and groups only ever ask two questions of an
//! entry: what is its id, and is it an open group.

use crate::model::{EntryId, RawObjectEntry, ReplGroup, SessionId, Severity, SourceLocation};

// ===== TextOutput =====

/// A run of program output text.
///
/// The text is immutable; streaming output is glued on by replacing the
/// entry. Only the repeat count changes in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOutput {
    id: EntryId,
    session: SessionId,
    text: String,
    severity: Severity,
    count: usize,
    source: Option<SourceLocation>,
}

impl TextOutput {
    /// Create output with a repeat count of one.
    pub fn new(
        id: EntryId,
        session: SessionId,
        text: impl Into<String>,
        severity: Severity,
        source: Option<SourceLocation>,
    ) -> Self {
        Self {
            id,
            session,
            text: text.into(),
            severity,
            count: 1,
            source,
        }
    }

    /// Stable entry id.
    pub fn id(&self) -> &EntryId {
        &self.id
    }

    /// Session that produced the output.
    pub fn session(&self) -> &SessionId {
        &self.session
    }

    /// Output text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Severity of the output.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Number of identical consecutive occurrences collapsed into this entry.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Source locator, if any.
    pub fn source(&self) -> Option<&SourceLocation> {
        self.source.as_ref()
    }

    /// Bump the repeat count, returning the new value.
    pub(crate) fn increment_count(&mut self) -> usize {
        self.count += 1;
        self.count
    }

    /// Text repeated `count` times, each repeat on its own line.
    pub fn render_as_text(&self, include_source: bool) -> String {
        let mut rendered = self.text.clone();
        for _ in 1..self.count {
            if !rendered.ends_with('\n') {
                rendered.push('\n');
            }
            rendered.push_str(&self.text);
        }
        append_source_name(rendered, self.source.as_ref(), include_source)
    }
}

// ===== EvaluationInput =====

/// An expression exactly as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationInput {
    id: EntryId,
    expression: String,
}

impl EvaluationInput {
    /// Create an input entry.
    pub fn new(id: EntryId, expression: impl Into<String>) -> Self {
        Self {
            id,
            expression: expression.into(),
        }
    }

    /// Stable entry id.
    pub fn id(&self) -> &EntryId {
        &self.id
    }

    /// The typed expression.
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

// ===== EvaluationResult =====

/// The resolved value of an evaluated expression.
///
/// Value, type and children are produced by the evaluator; the result only
/// records them. `available` is false when evaluation failed, in which case
/// `value` holds the failure message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult {
    id: EntryId,
    value: String,
    type_name: Option<String>,
    children_reference: Option<u64>,
    available: bool,
}

impl EvaluationResult {
    /// A successful result.
    pub fn resolved(
        id: EntryId,
        value: impl Into<String>,
        type_name: Option<String>,
        children_reference: Option<u64>,
    ) -> Self {
        Self {
            id,
            value: value.into(),
            type_name,
            children_reference,
            available: true,
        }
    }

    /// A failed result carrying the failure message as its value.
    pub fn unavailable(id: EntryId, message: impl Into<String>) -> Self {
        Self {
            id,
            value: message.into(),
            type_name: None,
            children_reference: None,
            available: false,
        }
    }

    /// Stable entry id.
    pub fn id(&self) -> &EntryId {
        &self.id
    }

    /// Display value, or the failure message.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Type name reported by the evaluator.
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Evaluator handle for fetching children, if the value is structured.
    pub fn children_reference(&self) -> Option<u64> {
        self.children_reference
    }

    /// Whether evaluation succeeded.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Whether the view should offer to expand this result.
    pub fn has_children(&self) -> bool {
        self.children_reference.is_some()
    }
}

// ===== ReplEntry =====

/// One unit in the console log.
#[derive(Debug, Clone)]
pub enum ReplEntry {
    /// Program output text.
    Output(TextOutput),
    /// Raw structured value.
    Object(RawObjectEntry),
    /// Expression typed by the user.
    Input(EvaluationInput),
    /// Result of an evaluated expression.
    Result(EvaluationResult),
    /// Collapsible group of nested entries.
    Group(ReplGroup),
}

impl ReplEntry {
    /// Stable id of the entry, whatever its kind.
    pub fn id(&self) -> &EntryId {
        match self {
            ReplEntry::Output(output) => output.id(),
            ReplEntry::Object(object) => object.id(),
            ReplEntry::Input(input) => input.id(),
            ReplEntry::Result(result) => result.id(),
            ReplEntry::Group(group) => group.id(),
        }
    }

    /// Plain-text form for copy and export.
    pub fn render_as_text(&self, include_source: bool) -> String {
        match self {
            ReplEntry::Output(output) => output.render_as_text(include_source),
            ReplEntry::Object(object) => object.render_as_text(),
            ReplEntry::Input(input) => input.expression().to_string(),
            ReplEntry::Result(result) => result.value().to_string(),
            ReplEntry::Group(group) => group.render_as_text(include_source),
        }
    }

    /// Whether the view should render an expansion affordance.
    pub fn has_children(&self) -> bool {
        match self {
            ReplEntry::Output(_) | ReplEntry::Input(_) => false,
            ReplEntry::Object(object) => object.has_children(),
            ReplEntry::Result(result) => result.has_children(),
            ReplEntry::Group(group) => group.has_children(),
        }
    }

    /// The group, if this entry is one.
    pub fn as_group(&self) -> Option<&ReplGroup> {
        match self {
            ReplEntry::Group(group) => Some(group),
            _ => None,
        }
    }

    /// The output, if this entry is text output.
    pub fn as_output(&self) -> Option<&TextOutput> {
        match self {
            ReplEntry::Output(output) => Some(output),
            _ => None,
        }
    }

    /// Mutable access to this entry if it is a group that has not ended.
    pub(crate) fn as_open_group_mut(&mut self) -> Option<&mut ReplGroup> {
        match self {
            ReplEntry::Group(group) if !group.has_ended() => Some(group),
            _ => None,
        }
    }
}

impl From<TextOutput> for ReplEntry {
    fn from(output: TextOutput) -> Self {
        ReplEntry::Output(output)
    }
}

impl From<RawObjectEntry> for ReplEntry {
    fn from(object: RawObjectEntry) -> Self {
        ReplEntry::Object(object)
    }
}

impl From<EvaluationInput> for ReplEntry {
    fn from(input: EvaluationInput) -> Self {
        ReplEntry::Input(input)
    }
}

impl From<EvaluationResult> for ReplEntry {
    fn from(result: EvaluationResult) -> Self {
        ReplEntry::Result(result)
    }
}

impl From<ReplGroup> for ReplEntry {
    fn from(group: ReplGroup) -> Self {
        ReplEntry::Group(group)
    }
}

/// Append `" <source name>"` when asked to and a locator is present.
pub(crate) fn append_source_name(
    mut text: String,
    source: Option<&SourceLocation>,
    include_source: bool,
) -> String {
    if let (true, Some(source)) = (include_source, source) {
        text.push(' ');
        text.push_str(&source.name);
    }
    text
}

// ===== Tests =====
