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

//! SM-2 scheduling primitives.
//!
//! Recall ratings run 0-5: anything below 3 is a lapse that resets the
//! repetition count, anything at or above 3 advances the interval
//! progression (1 day, 6 days, then the previous interval times the ease
//! factor). The ease factor moves on every review, lapse or not, and
//! never drops below 1.3.

use std::fmt::Display;
use std::fmt::Formatter;

use crate::error::CoreError;
use crate::error::Fallible;

pub type EaseFactor = f64;

/// The ease factor assigned to a card that has never been reviewed.
pub const INITIAL_EASE_FACTOR: EaseFactor = 2.5;

/// The ease factor floor.
pub const MIN_EASE_FACTOR: EaseFactor = 1.3;

/// Interval after the first successful recall, in days.
pub const FIRST_INTERVAL_DAYS: u32 = 1;

/// Interval after the second consecutive successful recall, in days.
pub const SECOND_INTERVAL_DAYS: u32 = 6;

/// Interval after a lapse, in days.
pub const LAPSE_INTERVAL_DAYS: u32 = 1;

/// Ratings below this are lapses.
const SUCCESS_THRESHOLD: u8 = 3;

/// A validated recall rating in the range 0-5.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Fallible<Self> {
        if value > Self::MAX {
            return Err(CoreError::InvalidQuality(value));
        }
        Ok(Self(value))
    }

    /// Every rating from 0 to 5, in order.
    pub fn all() -> [Quality; 6] {
        [
            Quality(0),
            Quality(1),
            Quality(2),
            Quality(3),
            Quality(4),
            Quality(5),
        ]
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this rating counts as a failed recall.
    pub fn is_lapse(self) -> bool {
        self.0 < SUCCESS_THRESHOLD
    }

    /// Short label for rating buttons.
    pub fn label(self) -> &'static str {
        match self.0 {
            0 => "Again",
            1 => "Hard",
            2 => "Difficult",
            3 => "Okay",
            4 => "Good",
            _ => "Easy",
        }
    }
}

impl TryFrom<u8> for Quality {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Quality::new(value)
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The SM-2 ease factor update:
///
/// ```text
/// EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
/// ```
///
/// clamped from below at [`MIN_EASE_FACTOR`]. Applied on every review,
/// including lapses.
pub fn new_ease_factor(ef: EaseFactor, q: Quality) -> EaseFactor {
    let q = q.value() as f64;
    let ef = ef + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02));
    ef.max(MIN_EASE_FACTOR)
}

/// The interval, in days, after a successful recall. `repetitions` and
/// `interval_days` are the values from before this review; the ease
/// factor is likewise the pre-update one. The product is rounded to the
/// nearest whole day, ties away from zero.
pub fn next_interval(repetitions: u32, interval_days: u32, ef: EaseFactor) -> u32 {
    match repetitions {
        0 => FIRST_INTERVAL_DAYS,
        1 => SECOND_INTERVAL_DAYS,
        _ => (interval_days as f64 * ef).round() as u32,
    }
}
