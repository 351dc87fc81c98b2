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

//! The review-session state machine.
//!
//! A session walks a fixed queue of due cards, enforcing the
//! question -> answer -> rating protocol for each one. Rating a card is
//! the only point where scheduling state changes; the updated record is
//! handed back to the caller so the storage layer can persist it. The
//! session itself never touches storage.

use std::fmt::Display;
use std::fmt::Formatter;

use crate::error::CoreError;
use crate::error::Fallible;
use crate::queue::ReviewQueue;
use crate::types::card::Flashcard;
use crate::types::scheduling::apply_review;
use crate::types::timestamp::Timestamp;

/// Where the session is in the per-card protocol.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionPhase {
    /// The question is shown, the answer is hidden.
    AwaitingReveal,
    /// The answer is shown, waiting for a rating.
    AwaitingRating,
    /// Terminal: the queue is exhausted or the session was ended early.
    Completed,
}

impl Display for SessionPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPhase::AwaitingReveal => write!(f, "awaiting reveal"),
            SessionPhase::AwaitingRating => write!(f, "awaiting rating"),
            SessionPhase::Completed => write!(f, "completed"),
        }
    }
}

/// How a completed session ended. Ratings already applied stand either
/// way; the distinction is for reporting only.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionOutcome {
    /// Every card in the queue was rated.
    Finished,
    /// The session was ended before the queue was exhausted.
    EndedEarly,
}

pub struct ReviewSession {
    /// In queue order; index `queue.position()` is the current card.
    cards: Vec<Flashcard>,
    queue: ReviewQueue,
    phase: SessionPhase,
    reviewed_count: usize,
    outcome: Option<SessionOutcome>,
}

impl ReviewSession {
    /// Starts a session over the given cards. Fails with `EmptyQueue` if
    /// there is nothing to review.
    pub fn start(mut cards: Vec<Flashcard>) -> Fallible<Self> {
        if cards.is_empty() {
            return Err(CoreError::EmptyQueue);
        }
        cards.sort_by(|a, b| {
            a.scheduling
                .next_review_at
                .cmp(&b.scheduling.next_review_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        let queue = ReviewQueue::new(cards.iter().map(|c| (c.id, c.scheduling.next_review_at)));
        Ok(Self {
            cards,
            queue,
            phase: SessionPhase::AwaitingReveal,
            reviewed_count: 0,
            outcome: None,
        })
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    pub fn is_completed(&self) -> bool {
        self.phase == SessionPhase::Completed
    }

    /// The card currently being reviewed, or `None` once completed.
    pub fn current_card(&self) -> Option<&Flashcard> {
        match self.phase {
            SessionPhase::Completed => None,
            _ => self.cards.get(self.queue.position()),
        }
    }

    /// Cards rated so far.
    pub fn reviewed_count(&self) -> usize {
        self.reviewed_count
    }

    /// Cards left to rate, current one included.
    pub fn remaining(&self) -> usize {
        self.queue.remaining()
    }

    pub fn total_cards(&self) -> usize {
        self.queue.len()
    }

    /// Shows the answer for the current card.
    pub fn reveal(&mut self) -> Fallible<()> {
        match self.phase {
            SessionPhase::AwaitingReveal => {
                self.phase = SessionPhase::AwaitingRating;
                Ok(())
            }
            phase => Err(CoreError::InvalidTransition {
                action: "reveal the answer",
                phase,
            }),
        }
    }

    /// Rates the current card, applies the scheduler to it, and moves on
    /// to the next card (or completes the session). Returns the updated
    /// card so the caller can persist it. An out-of-range rating fails
    /// before anything changes.
    pub fn rate(&mut self, quality: u8, now: Timestamp) -> Fallible<Flashcard> {
        if self.phase != SessionPhase::AwaitingRating {
            return Err(CoreError::InvalidTransition {
                action: "rate the card",
                phase: self.phase,
            });
        }
        // The phase guarantees the queue is not exhausted.
        let card = &mut self.cards[self.queue.position()];
        card.scheduling = apply_review(card.scheduling, quality, now)?;
        let updated = card.clone();
        self.reviewed_count += 1;
        self.queue.advance();
        if self.queue.current().is_none() {
            self.phase = SessionPhase::Completed;
            self.outcome = Some(SessionOutcome::Finished);
        } else {
            self.phase = SessionPhase::AwaitingReveal;
        }
        Ok(updated)
    }

    /// Ends the session early. Ratings already applied are not undone.
    pub fn end(&mut self) -> Fallible<()> {
        match self.phase {
            SessionPhase::Completed => Err(CoreError::InvalidTransition {
                action: "end the session",
                phase: self.phase,
            }),
            _ => {
                self.phase = SessionPhase::Completed;
                self.outcome = Some(SessionOutcome::EndedEarly);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::card::CardId;
    use crate::types::scheduling::SchedulingState;

    fn ts(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    fn card(id: i64, due: &str) -> Flashcard {
        let created = ts("2024-01-01T08:00:00");
        let mut card = Flashcard::new(CardId::new(id), format!("q{id}"), format!("a{id}"), "General", created);
        card.scheduling.next_review_at = ts(due);
        card
    }

    #[test]
    fn test_empty_queue() {
        let result = ReviewSession::start(vec![]);
        assert!(matches!(result, Err(CoreError::EmptyQueue)));
    }

    #[test]
    fn test_cards_come_up_in_due_order() {
        let session = ReviewSession::start(vec![
            card(1, "2024-01-03T00:00:00"),
            card(2, "2024-01-01T00:00:00"),
            card(3, "2024-01-02T00:00:00"),
        ])
        .unwrap();
        assert_eq!(session.current_card().unwrap().id, CardId::new(2));
        assert_eq!(session.remaining(), 3);
    }

    #[test]
    fn test_reveal_twice_fails() {
        let mut session = ReviewSession::start(vec![card(1, "2024-01-01T00:00:00")]).unwrap();
        session.reveal().unwrap();
        let result = session.reveal();
        assert!(matches!(
            result,
            Err(CoreError::InvalidTransition {
                phase: SessionPhase::AwaitingRating,
                ..
            })
        ));
    }

    #[test]
    fn test_rate_before_reveal_fails() {
        let mut session = ReviewSession::start(vec![card(1, "2024-01-01T00:00:00")]).unwrap();
        let result = session.rate(4, ts("2024-01-05T10:00:00"));
        assert!(matches!(
            result,
            Err(CoreError::InvalidTransition {
                phase: SessionPhase::AwaitingReveal,
                ..
            })
        ));
    }

    #[test]
    fn test_rating_every_card_completes_the_session() {
        let now = ts("2024-01-05T10:00:00");
        let mut session = ReviewSession::start(vec![
            card(1, "2024-01-01T00:00:00"),
            card(2, "2024-01-02T00:00:00"),
            card(3, "2024-01-03T00:00:00"),
        ])
        .unwrap();
        let total = session.remaining();
        for _ in 0..total {
            session.reveal().unwrap();
            session.rate(4, now).unwrap();
        }
        assert_eq!(session.phase(), SessionPhase::Completed);
        assert_eq!(session.outcome(), Some(SessionOutcome::Finished));
        assert_eq!(session.reviewed_count(), 3);
        assert_eq!(session.remaining(), 0);
        assert!(session.current_card().is_none());
    }

    #[test]
    fn test_rate_returns_the_updated_card() {
        let now = ts("2024-01-05T10:00:00");
        let mut session = ReviewSession::start(vec![card(1, "2024-01-01T00:00:00")]).unwrap();
        session.reveal().unwrap();
        let updated = session.rate(5, now).unwrap();
        assert_eq!(updated.id, CardId::new(1));
        assert_eq!(updated.scheduling.repetitions, 1);
        assert_eq!(updated.scheduling.interval_days, 1);
        assert_eq!(updated.scheduling.last_reviewed_at, Some(now));
    }

    #[test]
    fn test_invalid_quality_leaves_session_untouched() {
        let now = ts("2024-01-05T10:00:00");
        let mut session = ReviewSession::start(vec![card(1, "2024-01-01T00:00:00")]).unwrap();
        session.reveal().unwrap();
        let before = session.current_card().unwrap().clone();
        let result = session.rate(9, now);
        assert_eq!(result, Err(CoreError::InvalidQuality(9)));
        assert_eq!(session.phase(), SessionPhase::AwaitingRating);
        assert_eq!(session.reviewed_count(), 0);
        assert_eq!(session.current_card().unwrap(), &before);
        // Still usable after the failed call.
        session.rate(3, now).unwrap();
        assert_eq!(session.reviewed_count(), 1);
    }

    #[test]
    fn test_end_early() {
        let mut session = ReviewSession::start(vec![
            card(1, "2024-01-01T00:00:00"),
            card(2, "2024-01-02T00:00:00"),
        ])
        .unwrap();
        session.reveal().unwrap();
        session.rate(4, ts("2024-01-05T10:00:00")).unwrap();
        session.end().unwrap();
        assert_eq!(session.phase(), SessionPhase::Completed);
        assert_eq!(session.outcome(), Some(SessionOutcome::EndedEarly));
        // The rating already applied stands.
        assert_eq!(session.reviewed_count(), 1);
    }

    #[test]
    fn test_end_from_either_active_phase() {
        let mut session = ReviewSession::start(vec![card(1, "2024-01-01T00:00:00")]).unwrap();
        assert!(session.end().is_ok());

        let mut session = ReviewSession::start(vec![card(1, "2024-01-01T00:00:00")]).unwrap();
        session.reveal().unwrap();
        assert!(session.end().is_ok());
    }

    #[test]
    fn test_end_after_completion_fails() {
        let mut session = ReviewSession::start(vec![card(1, "2024-01-01T00:00:00")]).unwrap();
        session.reveal().unwrap();
        session.rate(4, ts("2024-01-05T10:00:00")).unwrap();
        let result = session.end();
        assert!(matches!(
            result,
            Err(CoreError::InvalidTransition {
                phase: SessionPhase::Completed,
                ..
            })
        ));
        // Natural completion is not overwritten.
        assert_eq!(session.outcome(), Some(SessionOutcome::Finished));
    }
}
