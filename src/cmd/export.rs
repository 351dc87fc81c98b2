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

use std::fs::write;

use crate::db::Database;
use crate::error::Fallible;

/// Dumps every card, scheduling state included, as JSON. All fields
/// round-trip losslessly, so an export can be re-imported by external
/// tooling without losing scheduling history.
pub fn export_cards(db_path: &str, output: Option<&str>) -> Fallible<()> {
    let db = Database::open(db_path)?;
    let cards = db.all_cards()?;
    let json = serde_json::to_string_pretty(&cards)?;
    match output {
        Some(path) => write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
