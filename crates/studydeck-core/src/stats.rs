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

use crate::types::date::Date;

/// Accumulated study-habit metrics. The total counters are maintained by
/// the host; the streak fields move only through [`record_study_event`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyStats {
    pub total_cards_reviewed: u64,
    pub total_pomodoros_completed: u64,
    pub total_study_minutes: u64,
    /// Consecutive calendar days with at least one study event.
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_study_date: Option<Date>,
}

/// Records that studying happened on `today` and returns the updated
/// stats.
///
/// Calling this again for the same day is a no-op, so hosts may call it
/// once per review rather than once per day without inflating the streak.
/// A gap of exactly one day extends the streak; any other gap restarts it
/// at 1.
pub fn record_study_event(stats: StudyStats, today: Date) -> StudyStats {
    match stats.last_study_date {
        Some(last) if last == today => stats,
        Some(last) if today.days_since(last) == 1 => {
            let current_streak = stats.current_streak + 1;
            StudyStats {
                current_streak,
                longest_streak: stats.longest_streak.max(current_streak),
                last_study_date: Some(today),
                ..stats
            }
        }
        _ => StudyStats {
            current_streak: 1,
            last_study_date: Some(today),
            ..stats
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> Date {
        Date::try_from(s.to_string()).unwrap()
    }

    #[test]
    fn test_first_study_day() {
        let stats = record_study_event(StudyStats::default(), date("2024-06-01"));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.last_study_date, Some(date("2024-06-01")));
    }

    #[test]
    fn test_same_day_is_idempotent() {
        let today = date("2024-06-01");
        let once = record_study_event(StudyStats::default(), today);
        let twice = record_study_event(once, today);
        let thrice = record_study_event(twice, today);
        assert_eq!(once, twice);
        assert_eq!(once, thrice);
        assert_eq!(thrice.current_streak, 1);
    }

    #[test]
    fn test_consecutive_days_extend_the_streak() {
        let mut stats = StudyStats::default();
        for day in ["2024-06-01", "2024-06-02", "2024-06-03"] {
            stats = record_study_event(stats, date(day));
        }
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.longest_streak, 3);
    }

    #[test]
    fn test_gap_resets_to_one() {
        let mut stats = StudyStats::default();
        stats = record_study_event(stats, date("2024-06-01"));
        stats = record_study_event(stats, date("2024-06-02"));
        stats = record_study_event(stats, date("2024-06-03"));
        // Two-day gap.
        stats = record_study_event(stats, date("2024-06-06"));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 3);
        assert_eq!(stats.last_study_date, Some(date("2024-06-06")));
    }

    #[test]
    fn test_longest_streak_survives_resets() {
        let mut stats = StudyStats::default();
        for day in ["2024-06-01", "2024-06-02", "2024-06-03", "2024-06-04"] {
            stats = record_study_event(stats, date(day));
        }
        stats = record_study_event(stats, date("2024-06-10"));
        stats = record_study_event(stats, date("2024-06-11"));
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.longest_streak, 4);
    }

    #[test]
    fn test_backwards_date_restarts() {
        let mut stats = StudyStats::default();
        stats = record_study_event(stats, date("2024-06-05"));
        stats = record_study_event(stats, date("2024-06-02"));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.last_study_date, Some(date("2024-06-02")));
    }

    #[test]
    fn test_counters_are_untouched() {
        let stats = StudyStats {
            total_cards_reviewed: 10,
            total_pomodoros_completed: 4,
            total_study_minutes: 100,
            ..StudyStats::default()
        };
        let updated = record_study_event(stats, date("2024-06-01"));
        assert_eq!(updated.total_cards_reviewed, 10);
        assert_eq!(updated.total_pomodoros_completed, 4);
        assert_eq!(updated.total_study_minutes, 100);
    }
}
