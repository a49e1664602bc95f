//! Change notification for views attached to the log.

use crate::model::{EntryId, SubscriptionId};
use std::fmt;

/// A change to the log, delivered synchronously to every subscriber.
///
/// Entries carry no listeners of their own. A repeat-count bump is reported
/// here as [`ReplEvent::CountChanged`], naming the entry, so a view can
/// update that one row instead of re-reading every entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplEvent {
    /// The structure of the log changed: entries were added, replaced,
    /// evicted or cleared. Views should re-read `entries()`.
    EntriesChanged,
    /// Only the repeat count of one output entry changed.
    CountChanged {
        /// Entry whose count changed.
        id: EntryId,
        /// New repeat count.
        count: usize,
    },
}

type Listener = Box<dyn FnMut(&ReplEvent)>;

/// Ordered observer list.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Deliver to subscribers in subscription order.
    pub(crate) fn notify(&mut self, event: &ReplEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
