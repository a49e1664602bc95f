//! Coalescing policy for program output.
//!
//! Decides whether new text merges into the previous top-level entry or
//! becomes a new one. The store applies the decision; nothing here mutates.

use crate::model::{sources_equal, ReplEntry, Severity, SourceLocation};

/// ANSI "erase entire screen" sequence that clears the console.
pub const CLEAR_SEQUENCE: &str = "\u{1b}[2J";

/// Text of the synthetic notice appended after a clear.
pub const CONSOLE_CLEARED: &str = "Console was cleared";

/// What to do with a piece of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Coalesce {
    /// Identical to the previous entry: bump its count.
    Repeat,
    /// Continuation of an unterminated line: replace the previous entry
    /// with one holding the joined text.
    Concat(String),
    /// Start a new entry.
    Append,
}

/// Text following the last clear-screen sequence, if there is one.
pub(crate) fn after_last_clear(data: &str) -> Option<&str> {
    data.rfind(CLEAR_SEQUENCE)
        .map(|index| &data[index + CLEAR_SEQUENCE.len()..])
}

/// Decide how `data` relates to the previous top-level entry.
pub(crate) fn decide(
    prev: Option<&ReplEntry>,
    data: &str,
    severity: Severity,
    source: Option<&SourceLocation>,
    collapse_identical_lines: bool,
) -> Coalesce {
    let Some(prev) = prev.and_then(ReplEntry::as_output) else {
        return Coalesce::Append;
    };
    if prev.severity() != severity {
        return Coalesce::Append;
    }

    if prev.text() == data && sources_equal(prev.source(), source) && collapse_identical_lines {
        return Coalesce::Repeat;
    }

    // "\r\n" also ends with '\n'
    if !prev.text().ends_with('\n') && prev.count() == 1 {
        return Coalesce::Concat(format!("{}{}", prev.text(), data));
    }

    Coalesce::Append
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EvaluationInput, IdAllocator, IdKind, SessionId, TextOutput};

    fn output(text: &str, severity: Severity, source: Option<SourceLocation>) -> ReplEntry {
        let mut ids = IdAllocator::new();
        TextOutput::new(
            ids.allocate(IdKind::Output),
            SessionId::new("s").expect("valid session id"),
            text,
            severity,
            source,
        )
        .into()
    }

    // ===== after_last_clear =====

    #[test]
    fn no_clear_sequence_returns_none() {
        assert_eq!(after_last_clear("plain text"), None);
    }

    #[test]
    fn remainder_follows_last_clear() {
        let data = "a\u{1b}[2Jb\u{1b}[2Jc";
        assert_eq!(after_last_clear(data), Some("c"));
    }

    #[test]
    fn trailing_clear_leaves_empty_remainder() {
        assert_eq!(after_last_clear("before\u{1b}[2J"), Some(""));
    }

    // ===== decide =====

    #[test]
    fn empty_log_appends() {
        assert_eq!(
            decide(None, "x", Severity::Info, None, true),
            Coalesce::Append
        );
    }

    #[test]
    fn identical_line_repeats_when_collapsing() {
        let prev = output("same\n", Severity::Info, None);
        assert_eq!(
            decide(Some(&prev), "same\n", Severity::Info, None, true),
            Coalesce::Repeat
        );
    }

    #[test]
    fn identical_line_appends_when_not_collapsing() {
        let prev = output("same\n", Severity::Info, None);
        assert_eq!(
            decide(Some(&prev), "same\n", Severity::Info, None, false),
            Coalesce::Append
        );
    }

    #[test]
    fn identical_unterminated_text_concatenates_when_not_collapsing() {
        let prev = output("ab", Severity::Info, None);
        assert_eq!(
            decide(Some(&prev), "ab", Severity::Info, None, false),
            Coalesce::Concat("abab".to_string())
        );
    }

    #[test]
    fn different_source_prevents_repeat() {
        let prev = output("same\n", Severity::Info, Some(SourceLocation::new("a.rs", 1, 1)));
        let source = SourceLocation::new("a.rs", 2, 1);
        assert_eq!(
            decide(Some(&prev), "same\n", Severity::Info, Some(&source), true),
            Coalesce::Append
        );
    }

    #[test]
    fn unterminated_line_concatenates() {
        let prev = output("Loading", Severity::Info, None);
        assert_eq!(
            decide(Some(&prev), "...done\n", Severity::Info, None, true),
            Coalesce::Concat("Loading...done\n".to_string())
        );
    }

    #[test]
    fn terminated_line_appends() {
        let prev = output("line\r\n", Severity::Info, None);
        assert_eq!(
            decide(Some(&prev), "next", Severity::Info, None, true),
            Coalesce::Append
        );
    }

    #[test]
    fn severity_change_appends() {
        let prev = output("partial", Severity::Info, None);
        assert_eq!(
            decide(Some(&prev), "oops", Severity::Error, None, true),
            Coalesce::Append
        );
    }

    #[test]
    fn non_output_previous_entry_appends() {
        let mut ids = IdAllocator::new();
        let prev: ReplEntry = EvaluationInput::new(ids.allocate(IdKind::Input), "x").into();
        assert_eq!(
            decide(Some(&prev), "x", Severity::Info, None, true),
            Coalesce::Append
        );
    }
}
