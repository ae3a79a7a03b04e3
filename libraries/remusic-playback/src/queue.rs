//! Manual play queue
//!
//! FIFO list of user-requested upcoming tracks. It always pre-empts the
//! playlist, genre and catalog-order sources when choosing the next track.

use std::collections::VecDeque;

/// Manual queue
///
/// Structure:
/// ```text
/// Currently Playing: Track A
/// ─────────────────────────────
/// Queue (soonest first):
///   - Track B (user added)
///   - Track C (user added)
///   - Track B (same track may appear twice)
/// ```
#[derive(Debug, Clone)]
pub struct Queue<T> {
    /// Queued entries (front = plays next)
    entries: VecDeque<T>,
}

impl<T> Queue<T> {
    /// Create new empty queue
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Append an entry at the back
    pub fn enqueue(&mut self, entry: T) {
        self.entries.push_back(entry);
    }

    /// Remove and return the earliest-enqueued entry
    ///
    /// `None` is the empty sentinel; callers fall through on it.
    pub fn dequeue(&mut self) -> Option<T> {
        self.entries.pop_front()
    }

    /// Peek at the next entry without removing
    pub fn peek(&self) -> Option<&T> {
        self.entries.front()
    }

    /// All entries, soonest first
    pub fn peek_all(&self) -> Vec<&T> {
        self.entries.iter().collect()
    }

    /// Number of queued entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear the queue
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}
