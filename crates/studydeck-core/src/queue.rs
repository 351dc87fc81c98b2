// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::types::card::CardId;
use crate::types::timestamp::Timestamp;

/// An ordered traversal over the cards due in a session.
///
/// Membership and order are fixed at construction: cards are sorted
/// ascending by due time, ties broken by id, and never re-sorted even as
/// reviews push their due times forward. A poorly rated card reappears in
/// a future session, not later in this one.
#[derive(Clone, Debug)]
pub struct ReviewQueue {
    entries: Vec<CardId>,
    cursor: usize,
}

impl ReviewQueue {
    pub fn new(items: impl IntoIterator<Item = (CardId, Timestamp)>) -> Self {
        let mut items: Vec<(CardId, Timestamp)> = items.into_iter().collect();
        items.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        Self {
            entries: items.into_iter().map(|(id, _)| id).collect(),
            cursor: 0,
        }
    }

    /// The card at the cursor, or `None` once the queue is exhausted.
    pub fn current(&self) -> Option<CardId> {
        self.entries.get(self.cursor).copied()
    }

    /// Moves the cursor forward by one. Safe to call at the end; the
    /// queue just stays exhausted.
    pub fn advance(&mut self) {
        if self.cursor < self.entries.len() {
            self.cursor += 1;
        }
    }

    /// Cards from the cursor to the end, current one included.
    pub fn remaining(&self) -> usize {
        self.entries.len() - self.cursor
    }

    /// Cards already consumed.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    #[test]
    fn test_orders_by_due_time() {
        let queue = ReviewQueue::new([
            (CardId::new(1), ts("2024-01-03T00:00:00")),
            (CardId::new(2), ts("2024-01-01T00:00:00")),
            (CardId::new(3), ts("2024-01-02T00:00:00")),
        ]);
        let mut queue = queue;
        assert_eq!(queue.current(), Some(CardId::new(2)));
        queue.advance();
        assert_eq!(queue.current(), Some(CardId::new(3)));
        queue.advance();
        assert_eq!(queue.current(), Some(CardId::new(1)));
    }

    #[test]
    fn test_ties_broken_by_id() {
        let due = ts("2024-01-01T00:00:00");
        let mut queue = ReviewQueue::new([
            (CardId::new(9), due),
            (CardId::new(3), due),
            (CardId::new(5), due),
        ]);
        assert_eq!(queue.current(), Some(CardId::new(3)));
        queue.advance();
        assert_eq!(queue.current(), Some(CardId::new(5)));
        queue.advance();
        assert_eq!(queue.current(), Some(CardId::new(9)));
    }

    #[test]
    fn test_advance_past_end() {
        let mut queue = ReviewQueue::new([(CardId::new(1), ts("2024-01-01T00:00:00"))]);
        assert_eq!(queue.remaining(), 1);
        queue.advance();
        assert_eq!(queue.current(), None);
        assert_eq!(queue.remaining(), 0);
        queue.advance();
        queue.advance();
        assert_eq!(queue.current(), None);
        assert_eq!(queue.position(), 1);
    }

    #[test]
    fn test_empty() {
        let queue = ReviewQueue::new([]);
        assert!(queue.is_empty());
        assert_eq!(queue.current(), None);
        assert_eq!(queue.remaining(), 0);
    }

    #[test]
    fn test_remaining_counts_down() {
        let mut queue = ReviewQueue::new([
            (CardId::new(1), ts("2024-01-01T00:00:00")),
            (CardId::new(2), ts("2024-01-02T00:00:00")),
            (CardId::new(3), ts("2024-01-03T00:00:00")),
        ]);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.remaining(), 3);
        queue.advance();
        assert_eq!(queue.remaining(), 2);
        assert_eq!(queue.position(), 1);
    }
}
