//! The REPL log store.
//!
//! `ReplModel` owns the ordered top-level entries of a debug console. It
//! routes insertions into the innermost open group, applies the output
//! coalescing policy, bounds retention to [`MAX_REPL_LENGTH`] top-level
//! slots and notifies subscribers of every structural change.
//!
//! All mutation goes through `&mut self`, so operations never interleave
//! with one another. The one suspension point is evaluation; see
//! [`ReplModel::begin_evaluation`].

pub mod coalesce;
pub mod evaluation;
pub mod events;
pub mod output;

pub use coalesce::{CLEAR_SEQUENCE, CONSOLE_CLEARED};
pub use evaluation::{
    Evaluation, EvaluationContext, EvaluationRequest, Evaluator, PendingEvaluation,
};
pub use events::ReplEvent;
pub use output::{GroupMarker, OutputEvent};

use crate::config::ConsoleConfig;
use crate::model::{
    EntryId, EvaluationInput, EvaluationResult, FrameId, IdAllocator, IdKind, RawObjectEntry,
    ReplEntry, ReplGroup, SessionId, Severity, SourceLocation, SubscriptionId, TextOutput,
};
use coalesce::Coalesce;
use events::Observers;
use serde_json::Value;
use std::collections::VecDeque;
use tracing::{debug, trace};

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;

/// Maximum number of top-level entries retained.
///
/// A group counts as one slot however many children it holds.
pub const MAX_REPL_LENGTH: usize = 10_000;

/// Ordered, bounded, observable log of console entries.
#[derive(Debug, Default)]
pub struct ReplModel {
    /// Top-level entries (oldest at front, newest at back)
    entries: VecDeque<ReplEntry>,
    ids: IdAllocator,
    config: ConsoleConfig,
    observers: Observers,
}

impl ReplModel {
    /// Create an empty log.
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            entries: VecDeque::new(),
            ids: IdAllocator::new(),
            config,
            observers: Observers::default(),
        }
    }

    // ===== Read path =====

    /// Live top-level entries, oldest first.
    pub fn entries(&self) -> &VecDeque<ReplEntry> {
        &self.entries
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log has no top-level entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current console settings.
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Replace the console settings.
    pub fn set_config(&mut self, config: ConsoleConfig) {
        self.config = config;
    }

    // ===== Change notification =====

    /// Register a listener for every subsequent [`ReplEvent`].
    ///
    /// Listeners run synchronously, in subscription order, inside the
    /// mutating call.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ReplEvent) + 'static,
    {
        self.observers.subscribe(Box::new(listener))
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn notify(&mut self, event: ReplEvent) {
        self.observers.notify(&event);
    }

    // ===== Structural mutation =====

    /// Mint a fresh id from this log's allocator.
    ///
    /// Entries built by callers for [`insert`](Self::insert) must take their
    /// id from here; ids are unique only within the log that issued them.
    pub fn allocate_id(&mut self, kind: IdKind) -> EntryId {
        self.ids.allocate(kind)
    }

    /// Insert an entry at the current insertion point.
    ///
    /// If the last top-level entry is an open group the entry goes to its
    /// innermost open group; otherwise it becomes a new top-level entry.
    /// The oldest top-level entries are then evicted down to
    /// [`MAX_REPL_LENGTH`]. Subscribers are notified once.
    ///
    /// ```
    /// use dbgcon::model::{EvaluationInput, IdKind};
    /// use dbgcon::repl::ReplModel;
    ///
    /// let mut model = ReplModel::default();
    /// let id = model.allocate_id(IdKind::Input);
    /// model.insert(EvaluationInput::new(id, "1+1"));
    /// assert_eq!(model.len(), 1);
    /// ```
    pub fn insert(&mut self, entry: impl Into<ReplEntry>) {
        let entry = entry.into();
        match self
            .entries
            .back_mut()
            .and_then(ReplEntry::as_open_group_mut)
        {
            Some(group) => group.add_child(entry),
            None => self.entries.push_back(entry),
        }

        if self.entries.len() > MAX_REPL_LENGTH {
            let excess = self.entries.len() - MAX_REPL_LENGTH;
            self.entries.drain(..excess);
            debug!(evicted = excess, "Evicted oldest REPL entries");
        }

        self.notify(ReplEvent::EntriesChanged);
    }

    /// Append program output, applying the coalescing policy.
    ///
    /// A clear-screen sequence anywhere in `data` clears the log, adds a
    /// "Console was cleared" notice, and keeps only the text after the last
    /// sequence. Identical consecutive output may bump the previous entry's
    /// count, and output following an unterminated line is glued onto it.
    pub fn append_output(
        &mut self,
        session: &SessionId,
        data: &str,
        severity: Severity,
        source: Option<SourceLocation>,
    ) {
        let data = match coalesce::after_last_clear(data) {
            Some(remainder) => {
                self.clear();
                self.append_output(session, CONSOLE_CLEARED, Severity::Ignore, None);
                if remainder.is_empty() {
                    return;
                }
                remainder
            }
            None => data,
        };

        let decision = coalesce::decide(
            self.entries.back(),
            data,
            severity,
            source.as_ref(),
            self.config.collapse_identical_lines,
        );
        trace!(?decision, ?severity, "Coalescing output");

        match decision {
            Coalesce::Repeat => {
                if let Some(ReplEntry::Output(prev)) = self.entries.back_mut() {
                    let count = prev.increment_count();
                    let id = prev.id().clone();
                    self.notify(ReplEvent::CountChanged { id, count });
                }
            }
            Coalesce::Concat(text) => {
                let id = self.ids.allocate(IdKind::Output);
                let replacement = TextOutput::new(id, session.clone(), text, severity, source);
                if let Some(last) = self.entries.back_mut() {
                    *last = replacement.into();
                }
                self.notify(ReplEvent::EntriesChanged);
            }
            Coalesce::Append => {
                let id = self.ids.allocate(IdKind::Output);
                self.insert(TextOutput::new(id, session.clone(), data, severity, source));
            }
        }
    }

    /// Insert a raw structured value.
    pub fn append_structured(
        &mut self,
        name: impl Into<String>,
        value: Value,
        source: Option<SourceLocation>,
        annotation: Option<String>,
    ) {
        let id = self.ids.allocate(IdKind::Object);
        self.insert(RawObjectEntry::new(id, name, value, source, annotation));
    }

    /// Open a new group at the current insertion point.
    pub fn start_group(
        &mut self,
        name: impl Into<String>,
        auto_expand: bool,
        source: Option<SourceLocation>,
    ) {
        let id = self.ids.allocate(IdKind::Group);
        let group = ReplGroup::new(id, name, auto_expand, source);
        debug!(id = %group.id(), name = group.name(), "Starting group");
        self.insert(group);
    }

    /// End the innermost open group.
    ///
    /// Does nothing if the last top-level entry is not a group. Ending does
    /// not change what a view renders, so no event is fired.
    pub fn end_group(&mut self) {
        if let Some(ReplEntry::Group(group)) = self.entries.back_mut() {
            group.end();
        }
    }

    /// Remove every entry, including all group subtrees.
    ///
    /// Notifies only if the log was non-empty.
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        debug!(removed = self.entries.len(), "Clearing REPL");
        self.entries.clear();
        self.notify(ReplEvent::EntriesChanged);
    }

    // ===== Evaluation =====

    /// Insert the typed expression and prepare its evaluation.
    ///
    /// The returned [`PendingEvaluation`] borrows nothing from the log:
    /// resolve it, then pass the result to
    /// [`complete_evaluation`](Self::complete_evaluation). Output appended in
    /// between lands before the result.
    pub fn begin_evaluation(
        &mut self,
        session: Option<&SessionId>,
        frame: Option<FrameId>,
        expression: &str,
    ) -> PendingEvaluation {
        let input_id = self.ids.allocate(IdKind::Input);
        self.insert(EvaluationInput::new(input_id, expression));

        let result_id = self.ids.allocate(IdKind::Result);
        PendingEvaluation::new(
            EvaluationRequest {
                expression: expression.to_string(),
                session: session.cloned(),
                frame,
                context: EvaluationContext::Repl,
            },
            result_id,
        )
    }

    /// Insert a resolved evaluation result at the current insertion point.
    pub fn complete_evaluation(&mut self, result: EvaluationResult) {
        self.insert(result);
    }

    /// Insert the expression, evaluate it, then insert the result.
    ///
    /// Holds the log for the whole evaluation; use
    /// [`begin_evaluation`](Self::begin_evaluation) when other output must
    /// be able to arrive while the evaluator runs.
    pub async fn add_evaluation<E>(
        &mut self,
        evaluator: &E,
        session: Option<&SessionId>,
        frame: Option<FrameId>,
        expression: &str,
    ) where
        E: Evaluator + ?Sized,
    {
        let pending = self.begin_evaluation(session, frame, expression);
        let result = pending.resolve(evaluator).await;
        self.complete_evaluation(result);
    }
}
