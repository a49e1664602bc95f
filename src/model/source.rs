//! Source locators attached to output and groups.

use serde::Deserialize;

/// Location in a source file that produced a piece of output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceLocation {
    /// Source URI (a path or a debug-adapter source reference URI).
    pub uri: String,
    /// Short display name, usually the file name.
    #[serde(default)]
    pub name: String,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column.
    #[serde(default = "default_column")]
    pub column: u32,
}

fn default_column() -> u32 {
    1
}

impl SourceLocation {
    /// Create a locator, deriving the display name from the last URI segment.
    pub fn new(uri: impl Into<String>, line: u32, column: u32) -> Self {
        let uri = uri.into();
        let name = display_name(&uri).to_string();
        Self {
            uri,
            name,
            line,
            column,
        }
    }

    /// Replace the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Fill in the display name if the transcript left it empty.
    pub(crate) fn normalized(mut self) -> Self {
        if self.name.is_empty() {
            self.name = display_name(&self.uri).to_string();
        }
        self
    }
}

fn display_name(uri: &str) -> &str {
    uri.rsplit(['/', '\\']).next().unwrap_or(uri)
}

/// Compare two optional locators the way the coalescing policy needs.
///
/// Both absent is equal. Both present is equal iff column, line and URI
/// match; the display name is ignored. One present and one absent is unequal.
pub fn sources_equal(a: Option<&SourceLocation>, b: Option<&SourceLocation>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.column == b.column && a.line == b.line && a.uri == b.uri,
        _ => false,
    }
}
