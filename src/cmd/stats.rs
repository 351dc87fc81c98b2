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

use studydeck_core::Timestamp;

use crate::db::Database;
use crate::error::Fallible;

/// Prints the stats dashboard. Due-today and created-today are derived
/// from the card table at display time rather than stored.
pub fn print_stats(db_path: &str) -> Fallible<()> {
    let db = Database::open(db_path)?;
    let now = Timestamp::now();
    let stats = db.load_stats()?;
    let total = db.card_count()?;
    let due_today = db.due_cards(now)?.len();
    let created_today = db.cards_created_on(now.date())?;

    println!("Cards");
    println!("  total:          {total}");
    println!("  due today:      {due_today}");
    println!("  created today:  {created_today}");
    println!();
    println!("Reviews");
    println!("  total reviewed: {}", stats.total_cards_reviewed);
    println!();
    println!("Streak");
    println!("  current:        {} day(s)", stats.current_streak);
    println!("  longest:        {} day(s)", stats.longest_streak);
    match stats.last_study_date {
        Some(date) => println!("  last studied:   {date}"),
        None => println!("  last studied:   never"),
    }
    println!();
    println!("Pomodoro");
    println!("  completed:      {}", stats.total_pomodoros_completed);
    println!("  study minutes:  {}", stats.total_study_minutes);
    Ok(())
}
