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

use maud::DOCTYPE;
use maud::Markup;
use maud::html;
use studydeck_core::Flashcard;
use studydeck_core::Quality;
use studydeck_core::ReviewSession;
use studydeck_core::SessionOutcome;
use studydeck_core::SessionPhase;
use studydeck_core::StudyStats;

pub fn page_template(body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "studydeck" }
                link rel="stylesheet" href="/style.css";
            }
            body {
                (body)
                script src="/script.js" {};
            }
        }
    }
}

/// Renders the page for the session's current phase.
pub fn render_session(session: &ReviewSession, stats: &StudyStats) -> Markup {
    match session.phase() {
        SessionPhase::AwaitingReveal => match session.current_card() {
            Some(card) => render_question(card, session),
            None => render_completion(session, stats),
        },
        SessionPhase::AwaitingRating => match session.current_card() {
            Some(card) => render_answer(card, session),
            None => render_completion(session, stats),
        },
        SessionPhase::Completed => render_completion(session, stats),
    }
}

fn progress(session: &ReviewSession) -> Markup {
    let position = session.reviewed_count() + 1;
    let total = session.total_cards();
    html! {
        div class="progress" {
            "Card " (position) " of " (total)
        }
    }
}

fn end_button() -> Markup {
    html! {
        form method="post" class="end-form" {
            button name="action" value="End" class="end-button" { "End Session" }
        }
    }
}

fn render_question(card: &Flashcard, session: &ReviewSession) -> Markup {
    page_template(html! {
        main class="drill" {
            (progress(session))
            div class="card" {
                div class="category" { (card.category) }
                div class="question" { (card.question) }
            }
            form method="post" class="controls" {
                button name="action" value="Reveal" class="reveal-button" autofocus { "Show Answer" }
            }
            (end_button())
        }
    })
}

fn render_answer(card: &Flashcard, session: &ReviewSession) -> Markup {
    page_template(html! {
        main class="drill" {
            (progress(session))
            div class="card" {
                div class="category" { (card.category) }
                div class="question" { (card.question) }
                div class="answer" { (card.answer) }
                @if let Some(notes) = &card.notes {
                    div class="notes" { (notes) }
                }
            }
            form method="post" class="controls ratings" {
                @for quality in Quality::all() {
                    button name="action" value=(quality) class={ "rating-button rating-" (quality) } {
                        span class="rating-value" { (quality) }
                        span class="rating-label" { (quality.label()) }
                    }
                }
            }
            (end_button())
        }
    })
}

fn render_completion(session: &ReviewSession, stats: &StudyStats) -> Markup {
    let heading = match session.outcome() {
        Some(SessionOutcome::EndedEarly) => "Session Ended",
        _ => "Session Completed",
    };
    page_template(html! {
        main class="drill" {
            div class="completion" {
                h1 { (heading) }
                p { "Cards reviewed: " (session.reviewed_count()) }
                @if stats.current_streak > 0 {
                    p { "Current streak: " (stats.current_streak) " day(s)" }
                }
                form method="post" {
                    button name="action" value="Shutdown" class="end-button" { "Close" }
                }
            }
        }
    })
}
