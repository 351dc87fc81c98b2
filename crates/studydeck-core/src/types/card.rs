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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::types::scheduling::SchedulingState;
use crate::types::timestamp::Timestamp;

/// A card identifier, assigned by the storage layer. Ordered so it can
/// break ties when sorting cards due at the same instant.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct CardId(i64);

impl CardId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn into_inner(self) -> i64 {
        self.0
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CardId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A flashcard: the question/answer content plus its scheduling state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: CardId,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub scheduling: SchedulingState,
}

impl Flashcard {
    /// A new card, due for its first review immediately.
    pub fn new(
        id: CardId,
        question: impl Into<String>,
        answer: impl Into<String>,
        category: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            question: question.into(),
            answer: answer.into(),
            category: category.into(),
            notes: None,
            created_at,
            scheduling: SchedulingState::fresh(created_at),
        }
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.scheduling.next_review_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    #[test]
    fn test_card_id_ordering() {
        assert!(CardId::new(1) < CardId::new(2));
        assert_eq!(CardId::new(7).to_string(), "7");
    }

    #[test]
    fn test_new_card_is_due() {
        let created = ts("2024-05-01T08:00:00");
        let card = Flashcard::new(CardId::new(1), "2 + 2?", "4", "Math", created);
        assert!(card.is_due(created));
        assert!(card.is_due(ts("2024-05-02T08:00:00")));
        assert!(!card.is_due(ts("2024-04-30T08:00:00")));
    }
}
