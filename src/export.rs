//! Plain-text export of the console log.
//!
//! Each entry is written with its `render_as_text` form. Group children
//! follow their group, indented two spaces per level. Multi-line entries
//! keep the indentation on every line.

use crate::model::ReplEntry;

const INDENT: &str = "  ";

/// Render entries (and group subtrees) as text, one entry per line.
pub fn render_log<'a, I>(entries: I, include_source: bool) -> String
where
    I: IntoIterator<Item = &'a ReplEntry>,
{
    let mut out = String::new();
    for entry in entries {
        render_entry(&mut out, entry, 0, include_source);
    }
    out
}

fn render_entry(out: &mut String, entry: &ReplEntry, depth: usize, include_source: bool) {
    let text = entry.render_as_text(include_source);
    let prefix = INDENT.repeat(depth);
    for line in text.trim_end_matches('\n').split('\n') {
        out.push_str(&prefix);
        out.push_str(line.trim_end_matches('\r'));
        out.push('\n');
    }

    if let ReplEntry::Group(group) = entry {
        for child in group.children() {
            render_entry(out, child, depth + 1, include_source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SessionId, Severity, SourceLocation};
    use crate::repl::ReplModel;
    use insta::assert_snapshot;
    use serde_json::json;

    fn session() -> SessionId {
        SessionId::new("session-1").expect("valid session id")
    }

    #[test]
    fn empty_log_renders_nothing() {
        let model = ReplModel::default();
        assert_eq!(render_log(model.entries(), false), "");
    }

    #[test]
    fn nested_groups_are_indented() {
        let mut model = ReplModel::default();
        model.append_output(&session(), "before\n", Severity::Info, None);
        model.start_group("outer", true, None);
        model.append_output(&session(), "one\n", Severity::Info, None);
        model.start_group("inner", false, None);
        model.append_output(&session(), "two\n", Severity::Info, None);
        model.end_group();
        model.end_group();
        model.append_output(&session(), "after\n", Severity::Info, None);

        assert_snapshot!(render_log(model.entries(), false).trim_end(), @r"
        before
        outer
          one
          inner
            two
        after
        ");
    }

    #[test]
    fn repeated_output_and_sources_render() {
        let mut model = ReplModel::default();
        let source = SourceLocation::new("/app/index.js", 12, 3);
        for _ in 0..3 {
            model.append_output(&session(), "ping", Severity::Info, Some(source.clone()));
        }

        assert_snapshot!(render_log(model.entries(), true).trim_end(), @r"
        ping
        ping
        ping index.js
        ");
    }

    #[test]
    fn structured_values_render_as_indented_json() {
        let mut model = ReplModel::default();
        model.start_group("state", true, None);
        model.append_structured("point", json!({"x": 1, "y": 2}), None, None);

        assert_snapshot!(render_log(model.entries(), false).trim_end(), @r#"
        state
          point
          {
            "x": 1,
            "y": 2
          }
        "#);
    }
}
