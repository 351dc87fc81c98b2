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

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use serde::Deserialize;
use studydeck_core::StudyStats;
use studydeck_core::Timestamp;
use studydeck_core::record_study_event;

use crate::cmd::drill::state::MutableState;
use crate::cmd::drill::state::ServerState;
use crate::cmd::drill::template::render_session;

#[derive(Deserialize)]
pub struct ActionForm {
    action: String,
}

/// Applies a form action to the session. Out-of-order actions (say, a
/// rating posted while the answer is hidden, from a stale tab) are
/// ignored and the current phase is re-rendered.
pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<ActionForm>,
) -> (StatusCode, Html<String>) {
    let mut mutable = state.mutable.lock().unwrap();
    match form.action.as_str() {
        "Reveal" => {
            if let Err(e) = mutable.session.reveal() {
                log::debug!("ignoring reveal: {e}");
            }
        }
        "End" => {
            if let Err(e) = mutable.session.end() {
                log::debug!("ignoring end: {e}");
            }
        }
        "Shutdown" => {
            if let Some(tx) = state.shutdown_tx.lock().unwrap().take() {
                let _ = tx.send(());
            }
        }
        action => match action.parse::<u8>() {
            Ok(quality) => rate_current_card(&mut mutable, quality),
            Err(_) => log::debug!("ignoring unknown action: {action}"),
        },
    }
    let stats = mutable.db.load_stats().unwrap_or_else(|_| StudyStats::default());
    let markup = render_session(&mutable.session, &stats);
    (StatusCode::OK, Html(markup.into_string()))
}

/// Rates the current card and persists the outcome: the updated card, the
/// review counter, and the study streak. The streak update is safe to run
/// per review because it no-ops within a calendar day.
fn rate_current_card(mutable: &mut MutableState, quality: u8) {
    let now = Timestamp::now();
    let card = match mutable.session.rate(quality, now) {
        Ok(card) => card,
        Err(e) => {
            log::debug!("ignoring rating: {e}");
            return;
        }
    };
    if let Err(e) = mutable.db.save_card(&card) {
        log::error!("failed to save card {}: {e}", card.id);
    }
    match mutable.db.load_stats() {
        Ok(mut stats) => {
            stats.total_cards_reviewed += 1;
            stats = record_study_event(stats, now.date());
            if let Err(e) = mutable.db.save_stats(&stats) {
                log::error!("failed to save stats: {e}");
            }
        }
        Err(e) => log::error!("failed to load stats: {e}"),
    }
}
