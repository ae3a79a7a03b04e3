//! Playback history tracking
//!
//! LIFO record of previously current tracks, used by "previous" navigation

use std::collections::VecDeque;

/// Playback history stack
///
/// Unbounded by default. With a limit set it behaves as a ring buffer that
/// discards the oldest entry on overflow. Entries are not deduplicated.
#[derive(Debug, Clone)]
pub struct History<T> {
    /// History buffer (most recent = back)
    entries: VecDeque<T>,

    /// Maximum history size (None = unbounded)
    limit: Option<usize>,
}

impl<T> History<T> {
    /// Create new unbounded history
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            limit: None,
        }
    }

    /// Create history that keeps at most `limit` entries
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit: Some(limit),
        }
    }

    /// Push an entry
    ///
    /// If history is full, oldest entry is discarded
    pub fn push(&mut self, entry: T) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            if self.entries.len() >= limit {
                self.entries.pop_front(); // Remove oldest
            }
        }
        self.entries.push_back(entry);
    }

    /// Pop most recent entry
    ///
    /// `None` is the empty sentinel; callers fall through on it.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop_back()
    }

    /// Get most recent entry (without removing)
    pub fn peek(&self) -> Option<&T> {
        self.entries.back()
    }

    /// All entries, most recent first
    pub fn peek_all(&self) -> Vec<&T> {
        self.entries.iter().rev().collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Maximum history size, if bounded
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}
