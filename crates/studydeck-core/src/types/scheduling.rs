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

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::sm2::EaseFactor;
use crate::sm2::INITIAL_EASE_FACTOR;
use crate::sm2::LAPSE_INTERVAL_DAYS;
use crate::sm2::Quality;
use crate::sm2::new_ease_factor;
use crate::sm2::next_interval;
use crate::types::timestamp::Timestamp;

/// The scheduling state embedded in each card.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchedulingState {
    /// Consecutive successful recalls since the last lapse.
    pub repetitions: u32,
    /// Governs interval growth; never below 1.3.
    pub ease_factor: EaseFactor,
    /// Days until the next review, as of the last update. Zero only for
    /// cards that have never been reviewed.
    pub interval_days: u32,
    /// The card is due when the current time reaches this.
    pub next_review_at: Timestamp,
    /// The last review time, or `None` for a card never reviewed.
    pub last_reviewed_at: Option<Timestamp>,
}

impl SchedulingState {
    /// The state of a newly created card: due immediately.
    pub fn fresh(now: Timestamp) -> Self {
        Self {
            repetitions: 0,
            ease_factor: INITIAL_EASE_FACTOR,
            interval_days: 0,
            next_review_at: now,
            last_reviewed_at: None,
        }
    }
}

/// Applies one review to a card's scheduling state and returns the new
/// state. The input is not mutated; the only failure is an out-of-range
/// quality rating.
///
/// A lapse (quality below 3) resets the repetition count and schedules
/// the card for tomorrow. A success advances the interval progression
/// using the pre-review ease factor. Either way the ease factor itself is
/// then updated from the rating.
pub fn apply_review(state: SchedulingState, quality: u8, now: Timestamp) -> Fallible<SchedulingState> {
    let quality = Quality::new(quality)?;
    let (repetitions, interval_days) = if quality.is_lapse() {
        (0, LAPSE_INTERVAL_DAYS)
    } else {
        let interval = next_interval(state.repetitions, state.interval_days, state.ease_factor);
        (state.repetitions + 1, interval)
    };
    Ok(SchedulingState {
        repetitions,
        ease_factor: new_ease_factor(state.ease_factor, quality),
        interval_days,
        next_review_at: now.plus_days(interval_days as i64),
        last_reviewed_at: Some(now),
    })
}
