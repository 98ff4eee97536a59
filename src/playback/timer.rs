use std::collections::BTreeMap;

use crate::foundation::core::{Epoch, Millis};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TimerKind {
    /// Recurring progress update.
    Tick,
    /// One-shot end of the active scene.
    SceneEnd,
}

/// Handle returned by [`TimerQueue::schedule`]; orders by deadline, then scheduling order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct TimerId {
    deadline: Millis,
    seq: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Timer {
    pub(crate) deadline: Millis,
    pub(crate) kind: TimerKind,
    /// Epoch the timer was scheduled under; a mismatch at fire time means it is stale.
    pub(crate) epoch: Epoch,
}

/// Deterministic virtual-time timer queue.
///
/// Nothing here reads a wall clock: the owner pops due timers as it advances its own notion of
/// "now". Ties on the deadline fire in scheduling order.
#[derive(Debug, Default)]
pub(crate) struct TimerQueue {
    entries: BTreeMap<TimerId, Timer>,
    next_seq: u64,
}

impl TimerQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn schedule(&mut self, deadline: Millis, kind: TimerKind, epoch: Epoch) -> TimerId {
        let id = TimerId {
            deadline,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.entries.insert(
            id,
            Timer {
                deadline,
                kind,
                epoch,
            },
        );
        id
    }

    pub(crate) fn cancel(&mut self, id: TimerId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Drop every pending timer, returning how many were cancelled.
    pub(crate) fn clear(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    /// Remove and return the earliest timer whose deadline is `<= until`.
    pub(crate) fn pop_due(&mut self, until: Millis) -> Option<Timer> {
        let (&id, timer) = self.entries.first_key_value()?;
        if timer.deadline > until {
            return None;
        }
        self.entries.remove(&id)
    }

    pub(crate) fn next_deadline(&self) -> Option<Millis> {
        self.entries.first_key_value().map(|(_, t)| t.deadline)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/timer.rs"]
mod tests;
