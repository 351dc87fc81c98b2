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

//! The SQLite store. The core never sees SQL: this module loads and saves
//! plain core records. Timestamps and dates are stored in the core types'
//! canonical string encoding; the ease factor is a `REAL` column, which
//! round-trips an f64 losslessly.

use rusqlite::Connection;
use rusqlite::Row;
use rusqlite::params;
use rusqlite::types::Type;
use studydeck_core::CardId;
use studydeck_core::Date;
use studydeck_core::Flashcard;
use studydeck_core::SchedulingState;
use studydeck_core::StudyStats;
use studydeck_core::Timestamp;

use crate::error::Fallible;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &str) -> Fallible<Self> {
        let conn = Connection::open(path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS cards (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                category TEXT NOT NULL,
                notes TEXT,
                created_at TEXT NOT NULL,
                repetitions INTEGER NOT NULL,
                ease_factor REAL NOT NULL,
                interval_days INTEGER NOT NULL,
                next_review_at TEXT NOT NULL,
                last_reviewed_at TEXT
            )",
            (),
        )?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS stats (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                total_cards_reviewed INTEGER NOT NULL,
                total_pomodoros_completed INTEGER NOT NULL,
                total_study_minutes INTEGER NOT NULL,
                current_streak INTEGER NOT NULL,
                longest_streak INTEGER NOT NULL,
                last_study_date TEXT
            )",
            (),
        )?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS pomodoro_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                started_at TEXT NOT NULL,
                ended_at TEXT NOT NULL,
                completed_pomodoros INTEGER NOT NULL
            )",
            (),
        )?;
        Ok(Self { conn })
    }

    /// Inserts a new card, due immediately, and returns its id.
    pub fn insert_card(
        &self,
        question: &str,
        answer: &str,
        category: &str,
        notes: Option<&str>,
        created_at: Timestamp,
    ) -> Fallible<CardId> {
        let scheduling = SchedulingState::fresh(created_at);
        self.conn.execute(
            "INSERT INTO cards (question, answer, category, notes, created_at,
                repetitions, ease_factor, interval_days, next_review_at, last_reviewed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, NULL)",
            params![
                question,
                answer,
                category,
                notes,
                created_at.to_string(),
                scheduling.repetitions,
                scheduling.ease_factor,
                scheduling.interval_days,
                scheduling.next_review_at.to_string(),
            ],
        )?;
        Ok(CardId::new(self.conn.last_insert_rowid()))
    }

    /// Writes a card's scheduling state back after a review.
    pub fn save_card(&self, card: &Flashcard) -> Fallible<()> {
        self.conn.execute(
            "UPDATE cards
             SET repetitions = ?1, ease_factor = ?2, interval_days = ?3,
                 next_review_at = ?4, last_reviewed_at = ?5
             WHERE id = ?6",
            params![
                card.scheduling.repetitions,
                card.scheduling.ease_factor,
                card.scheduling.interval_days,
                card.scheduling.next_review_at.to_string(),
                card.scheduling.last_reviewed_at.map(|ts| ts.to_string()),
                card.id.into_inner(),
            ],
        )?;
        Ok(())
    }

    /// Cards due at `now`, ordered by due time then id.
    pub fn due_cards(&self, now: Timestamp) -> Fallible<Vec<Flashcard>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, question, answer, category, notes, created_at,
                    repetitions, ease_factor, interval_days, next_review_at, last_reviewed_at
             FROM cards
             WHERE next_review_at <= ?1
             ORDER BY next_review_at ASC, id ASC",
        )?;
        let cards = stmt
            .query_map(params![now.to_string()], row_to_card)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cards)
    }

    pub fn all_cards(&self) -> Fallible<Vec<Flashcard>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, question, answer, category, notes, created_at,
                    repetitions, ease_factor, interval_days, next_review_at, last_reviewed_at
             FROM cards
             ORDER BY id ASC",
        )?;
        let cards = stmt
            .query_map([], row_to_card)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cards)
    }

    pub fn card_count(&self) -> Fallible<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// How many cards were created on the given calendar day.
    pub fn cards_created_on(&self, day: Date) -> Fallible<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM cards WHERE substr(created_at, 1, 10) = ?1",
            params![day.to_string()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// The single stats row, or fresh zeroed stats if none exists yet.
    pub fn load_stats(&self) -> Fallible<StudyStats> {
        let mut stmt = self.conn.prepare(
            "SELECT total_cards_reviewed, total_pomodoros_completed, total_study_minutes,
                    current_streak, longest_streak, last_study_date
             FROM stats WHERE id = 1",
        )?;
        let mut rows = stmt
            .query_map([], |row| {
                let last_study_date: Option<String> = row.get(5)?;
                let last_study_date = match last_study_date {
                    Some(s) => Some(parse_date(5, s)?),
                    None => None,
                };
                Ok(StudyStats {
                    total_cards_reviewed: row.get::<_, i64>(0)? as u64,
                    total_pomodoros_completed: row.get::<_, i64>(1)? as u64,
                    total_study_minutes: row.get::<_, i64>(2)? as u64,
                    current_streak: row.get(3)?,
                    longest_streak: row.get(4)?,
                    last_study_date,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows.pop().unwrap_or_default())
    }

    pub fn save_stats(&self, stats: &StudyStats) -> Fallible<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO stats
                (id, total_cards_reviewed, total_pomodoros_completed, total_study_minutes,
                 current_streak, longest_streak, last_study_date)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                stats.total_cards_reviewed as i64,
                stats.total_pomodoros_completed as i64,
                stats.total_study_minutes as i64,
                stats.current_streak,
                stats.longest_streak,
                stats.last_study_date.map(|d| d.to_string()),
            ],
        )?;
        Ok(())
    }

    pub fn insert_pomodoro_session(
        &self,
        started_at: Timestamp,
        ended_at: Timestamp,
        completed_pomodoros: u32,
    ) -> Fallible<()> {
        self.conn.execute(
            "INSERT INTO pomodoro_sessions (started_at, ended_at, completed_pomodoros)
             VALUES (?1, ?2, ?3)",
            params![
                started_at.to_string(),
                ended_at.to_string(),
                completed_pomodoros,
            ],
        )?;
        Ok(())
    }
}

fn row_to_card(row: &Row) -> rusqlite::Result<Flashcard> {
    let last_reviewed_at: Option<String> = row.get(10)?;
    let last_reviewed_at = match last_reviewed_at {
        Some(s) => Some(parse_timestamp(10, s)?),
        None => None,
    };
    Ok(Flashcard {
        id: CardId::new(row.get(0)?),
        question: row.get(1)?,
        answer: row.get(2)?,
        category: row.get(3)?,
        notes: row.get(4)?,
        created_at: parse_timestamp(5, row.get(5)?)?,
        scheduling: SchedulingState {
            repetitions: row.get(6)?,
            ease_factor: row.get(7)?,
            interval_days: row.get(8)?,
            next_review_at: parse_timestamp(9, row.get(9)?)?,
            last_reviewed_at,
        },
    })
}

fn parse_timestamp(column: usize, value: String) -> rusqlite::Result<Timestamp> {
    Timestamp::try_from(value)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

fn parse_date(column: usize, value: String) -> rusqlite::Result<Date> {
    Date::try_from(value)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}
