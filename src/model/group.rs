//! Collapsible output groups.
//!
//! Groups nest like a call stack. Adding a child or ending a group always
//! lands on the deepest group that is still open, so the outermost group
//! only receives entries again once everything inside it has ended.

use crate::model::entry::append_source_name;
use crate::model::{EntryId, ReplEntry, SourceLocation};

/// A named scope owning a nested sequence of entries.
#[derive(Debug, Clone)]
pub struct ReplGroup {
    id: EntryId,
    name: String,
    auto_expand: bool,
    source: Option<SourceLocation>,
    children: Vec<ReplEntry>,
    ended: bool,
}

impl ReplGroup {
    /// Create an open, empty group.
    pub fn new(
        id: EntryId,
        name: impl Into<String>,
        auto_expand: bool,
        source: Option<SourceLocation>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            auto_expand,
            source,
            children: Vec::new(),
            ended: false,
        }
    }

    // ===== Accessors (read-only) =====

    /// Stable entry id.
    pub fn id(&self) -> &EntryId {
        &self.id
    }

    /// Group label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hint that the view should show the group expanded initially.
    pub fn auto_expand(&self) -> bool {
        self.auto_expand
    }

    /// Source locator, if any.
    pub fn source(&self) -> Option<&SourceLocation> {
        self.source.as_ref()
    }

    /// Live ordered children.
    pub fn children(&self) -> &[ReplEntry] {
        &self.children
    }

    /// Whether the group has been closed.
    pub fn has_ended(&self) -> bool {
        self.ended
    }

    /// Always true: an empty group is still expandable.
    pub fn has_children(&self) -> bool {
        true
    }

    // ===== Mutation (store-only) =====

    /// Append to the innermost open group at or below this one.
    ///
    /// Only called on groups that have not ended.
    pub(crate) fn add_child(&mut self, entry: ReplEntry) {
        match self.children.last_mut().and_then(ReplEntry::as_open_group_mut) {
            Some(inner) => inner.add_child(entry),
            None => self.children.push(entry),
        }
    }

    /// End the innermost open group at or below this one.
    ///
    /// Ending is idempotent: once this group itself has ended, further
    /// calls change nothing.
    pub(crate) fn end(&mut self) {
        match self.children.last_mut().and_then(ReplEntry::as_open_group_mut) {
            Some(inner) => inner.end(),
            None => self.ended = true,
        }
    }

    /// Plain-text form: the group name.
    pub fn render_as_text(&self, include_source: bool) -> String {
        append_source_name(self.name.clone(), self.source.as_ref(), include_source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EvaluationInput, IdAllocator, IdKind};

    fn group(ids: &mut IdAllocator, name: &str) -> ReplGroup {
        ReplGroup::new(ids.allocate(IdKind::Group), name, true, None)
    }

    fn input(ids: &mut IdAllocator, text: &str) -> ReplEntry {
        EvaluationInput::new(ids.allocate(IdKind::Input), text).into()
    }

    fn names(entries: &[ReplEntry]) -> Vec<String> {
        entries.iter().map(|e| e.render_as_text(false)).collect()
    }

    #[test]
    fn new_group_is_open_and_empty() {
        let mut ids = IdAllocator::new();
        let g = group(&mut ids, "A");

        assert!(!g.has_ended());
        assert!(g.children().is_empty());
        assert!(g.has_children(), "Empty group is still expandable");
    }

    #[test]
    fn add_child_appends_in_order() {
        let mut ids = IdAllocator::new();
        let mut g = group(&mut ids, "A");

        g.add_child(input(&mut ids, "x"));
        g.add_child(input(&mut ids, "y"));

        assert_eq!(names(g.children()), vec!["x", "y"]);
    }

    #[test]
    fn add_child_routes_to_innermost_open_group() {
        let mut ids = IdAllocator::new();
        let mut outer = group(&mut ids, "A");
        let inner = group(&mut ids, "B");

        outer.add_child(inner.into());
        outer.add_child(input(&mut ids, "y"));

        assert_eq!(outer.children().len(), 1);
        let inner = outer.children()[0].as_group().expect("inner group");
        assert_eq!(names(inner.children()), vec!["y"]);
    }

    #[test]
    fn end_closes_innermost_group_first() {
        let mut ids = IdAllocator::new();
        let mut outer = group(&mut ids, "A");
        outer.add_child(group(&mut ids, "B").into());

        outer.end();

        assert!(!outer.has_ended(), "Outer stays open while inner was open");
        let inner = outer.children()[0].as_group().expect("inner group");
        assert!(inner.has_ended());

        outer.add_child(input(&mut ids, "z"));
        assert_eq!(names(outer.children()), vec!["B", "z"]);

        outer.end();
        assert!(outer.has_ended());
    }

    #[test]
    fn end_is_idempotent() {
        let mut ids = IdAllocator::new();
        let mut g = group(&mut ids, "A");

        g.end();
        g.end();

        assert!(g.has_ended());
    }

    #[test]
    fn render_uses_name_and_optional_source() {
        let mut ids = IdAllocator::new();
        let g = ReplGroup::new(
            ids.allocate(IdKind::Group),
            "setup",
            false,
            Some(SourceLocation::new("/tests/setup.js", 3, 1)),
        );

        assert_eq!(g.render_as_text(false), "setup");
        assert_eq!(g.render_as_text(true), "setup setup.js");
        assert!(!g.auto_expand());
    }
}
