//! Core identifier newtypes with smart constructors.
//!
//! `SessionId` validates non-empty strings at construction time.
//! `EntryId` values are never parsed from user input; they are minted by
//! an `IdAllocator` owned by the log store, or derived from a parent id.

use std::fmt;

/// Stable identity of a REPL entry, used by a view layer for diffing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryId(String);

impl EntryId {
    /// Derive the id of the `index`-th child of this entry (`parent:index`).
    pub fn child(&self, index: usize) -> Self {
        Self(format!("{}:{}", self.0, index))
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Debug session identifier owning a piece of output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Smart constructor: validates non-empty session ID
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidSessionId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidSessionId::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stack frame identifier as handed out by the debug adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame-{}", self.0)
    }
}

/// Handle returned by `ReplModel::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

// ===== IdAllocator =====

/// Kind prefix of a freshly allocated entry id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    /// Program output text.
    Output,
    /// Output group.
    Group,
    /// Expression typed by the user.
    Input,
    /// Evaluation result.
    Result,
    /// Raw structured value.
    Object,
}

impl IdKind {
    fn prefix(self) -> &'static str {
        match self {
            IdKind::Output => "output",
            IdKind::Group => "group",
            IdKind::Input => "input",
            IdKind::Result => "result",
            IdKind::Object => "object",
        }
    }
}

/// Monotonic id source owned by a single log store.
///
/// Every allocation draws from one counter regardless of kind, so two
/// stores fed the same operations produce identical ids. Outside the crate
/// ids come from `ReplModel::allocate_id`.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Create an allocator starting at zero.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Mint the next id of the given kind.
    pub(crate) fn allocate(&mut self, kind: IdKind) -> EntryId {
        let id = EntryId(format!("{}:{}", kind.prefix(), self.next));
        self.next += 1;
        id
    }
}

// ===== Error Types =====

/// Rejected session identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSessionId {
    /// The identifier was the empty string.
    #[error("Session ID cannot be empty")]
    Empty,
}

// ===== Tests =====
