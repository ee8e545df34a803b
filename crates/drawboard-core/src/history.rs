//! Undo history of whole-surface snapshots.

use crate::surface::Snapshot;
use log::debug;
use std::collections::VecDeque;

/// LIFO stack of snapshots, optionally capped.
#[derive(Debug, Clone, Default)]
pub struct History {
    stack: VecDeque<Snapshot>,
    max: Option<usize>,
}

impl History {
    /// Unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// History that keeps at most `max` snapshots, dropping the oldest.
    pub fn with_capacity_limit(max: Option<usize>) -> Self {
        Self {
            stack: VecDeque::new(),
            max,
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.stack.push_back(snapshot);
        if let Some(max) = self.max {
            while self.stack.len() > max {
                self.stack.pop_front();
            }
        }
        debug!("History push ({} entries)", self.stack.len());
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.stack.pop_back()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Oldest first.
    pub fn entries(&mut self) -> &[Snapshot] {
        self.stack.make_contiguous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo() {
        let mut history = History::new();
        history.push(Snapshot::new("a"));
        history.push(Snapshot::new("b"));
        assert_eq!(history.pop(), Some(Snapshot::new("b")));
        assert_eq!(history.pop(), Some(Snapshot::new("a")));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut history = History::with_capacity_limit(Some(2));
        for s in ["a", "b", "c"] {
            history.push(Snapshot::new(s));
        }
        assert_eq!(history.entries(), &[Snapshot::new("b"), Snapshot::new("c")]);
    }

    #[test]
    fn test_cap_over_many_pushes() {
        let mut history = History::with_capacity_limit(Some(3));
        for i in 0..100 {
            history.push(Snapshot::new(i.to_string()));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.pop(), Some(Snapshot::new("99")));
        assert_eq!(
            history.entries(),
            &[Snapshot::new("97"), Snapshot::new("98")]
        );
    }

    #[test]
    fn test_zero_cap_keeps_nothing() {
        let mut history = History::with_capacity_limit(Some(0));
        history.push(Snapshot::new("a"));
        assert!(history.is_empty());
    }
}
