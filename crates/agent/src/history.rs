//! Decision history: the training set of the learning strategist.

use std::collections::VecDeque;

use puzzle_core::Decision;
use serde::{Deserialize, Serialize};

use crate::assess::Assessment;
use crate::directive::TreeLabel;

/// One decision cycle as seen by the learner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub assessment: Assessment,
    /// Tree leaf before resolution.
    pub derived: TreeLabel,
    pub resolved: Decision,
    pub score: i32,
}

impl HistoryItem {
    pub fn new(assessment: Assessment, derived: TreeLabel, resolved: Decision, score: i32) -> Self {
        Self {
            assessment,
            derived,
            resolved,
            score,
        }
    }

    /// Penalized items mark cycles whose tree traversal failed.
    pub fn is_penalized(&self) -> bool {
        self.score < 0
    }
}

/// Append-only log of history items with an optional size cap.
///
/// Without a cap the log grows for the whole session. With a cap the oldest
/// items are evicted first.
#[derive(Clone, Debug, Default)]
pub struct HistoryLog {
    items: VecDeque<HistoryItem>,
    capacity: Option<usize>,
}

impl HistoryLog {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            items: VecDeque::new(),
            capacity,
        }
    }

    pub fn push(&mut self, item: HistoryItem) {
        self.items.push_back(item);
        if let Some(capacity) = self.capacity {
            while self.items.len() > capacity {
                self.items.pop_front();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryItem> {
        self.items.iter()
    }

    /// Copies the current items, oldest first, for an off-path rebuild.
    pub fn snapshot(&self) -> Vec<HistoryItem> {
        self.items.iter().copied().collect()
    }
}

impl<'a> IntoIterator for &'a HistoryLog {
    type Item = &'a HistoryItem;
    type IntoIter = std::collections::vec_deque::Iter<'a, HistoryItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
