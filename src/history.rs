/*!
This module handles the bounded undo history of a session.
*/

use std::collections::VecDeque;

use crate::Snapshot;

/// A bounded stack of [`Snapshot`]s.
///
/// Pushing past the maximum depth evicts the *oldest* entry, so a long play
/// session always retains its most recent moves. Purely in-memory, never
/// persisted; cleared only by session reset.
#[derive(Eq, PartialEq, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct History {
    entries: VecDeque<Snapshot>,
    max_depth: usize,
}

impl History {
    /// Creates an empty history retaining at most `max_depth` snapshots.
    ///
    /// A depth of `0` makes every [`save`](History::save) a no-op and thereby
    /// disables undo.
    pub fn new(max_depth: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Pushes a snapshot, evicting the oldest entry when over capacity.
    pub fn save(&mut self, snapshot: Snapshot) {
        self.entries.push_back(snapshot);
        while self.entries.len() > self.max_depth {
            self.entries.pop_front();
        }
    }

    /// Pops and returns the most recent snapshot, or `None` if the history
    /// is empty (not an error; callers check [`has_history`](History::has_history)
    /// first or tolerate the no-op).
    pub fn undo(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    /// Whether any snapshot is retained.
    pub fn has_history(&self) -> bool {
        !self.entries.is_empty()
    }

    /// The number of retained snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no snapshot is retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The maximum number of snapshots retained.
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Drops all retained snapshots.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
