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

pub fn list_due(db_path: &str) -> Fallible<()> {
    let db = Database::open(db_path)?;
    let due = db.due_cards(Timestamp::now())?;
    if due.is_empty() {
        println!("No cards due for review.");
        return Ok(());
    }
    for card in &due {
        println!(
            "{:>6}  {:<12}  due {}  {}",
            card.id.into_inner(),
            card.category,
            card.scheduling.next_review_at.date(),
            truncate(&card.question, 60),
        );
    }
    println!("{} card(s) due.", due.len());
    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly-ten", 11), "exactly-ten");
        assert_eq!(truncate("a longer question than fits", 8), "a longer...");
    }
}
