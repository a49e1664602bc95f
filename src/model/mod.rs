//! Domain model types (pure).
//!
//! Entries, identifiers and errors. Everything here is plain data with
//! narrow mutation hooks used by the store in [`crate::repl`].

pub mod entry;
pub mod error;
pub mod group;
pub mod identifiers;
pub mod raw_object;
pub mod severity;
pub mod source;

// Re-export for convenience
pub use entry::{EvaluationInput, EvaluationResult, ReplEntry, TextOutput};
pub use error::{AppError, EvaluationError, TranscriptError};
pub use group::ReplGroup;
pub(crate) use identifiers::IdAllocator;
pub use identifiers::{EntryId, FrameId, IdKind, InvalidSessionId, SessionId, SubscriptionId};
pub use raw_object::{RawObjectEntry, MAX_CHILDREN};
pub use severity::Severity;
pub use source::{sources_equal, SourceLocation};
