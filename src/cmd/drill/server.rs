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

use std::sync::Arc;
use std::sync::Mutex;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use studydeck_core::Flashcard;
use studydeck_core::ReviewSession;
use studydeck_core::Timestamp;
use tokio::net::TcpListener;
use tokio::select;
use tokio::signal;
use tokio::sync::oneshot::Receiver;
use tokio::sync::oneshot::channel;

use crate::cmd::drill::get::get_handler;
use crate::cmd::drill::post::post_handler;
use crate::cmd::drill::state::MutableState;
use crate::cmd::drill::state::ServerState;
use crate::db::Database;
use crate::error::Fallible;
use crate::error::fail;

// max-age is one week in seconds.
const CACHE_CONTROL_IMMUTABLE: &str = "public, max-age=604800, immutable";

pub struct ServerConfig {
    pub db_path: String,
    pub host: String,
    pub port: u16,
    pub session_started_at: Timestamp,
    pub card_limit: Option<usize>,
    pub category: Option<String>,
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let db = Database::open(&config.db_path)?;

    let due: Vec<Flashcard> = db.due_cards(config.session_started_at)?;
    let due = filter_cards(due, config.card_limit, config.category);
    if due.is_empty() {
        println!("No cards due for review.");
        return Ok(());
    }

    // Non-empty by the check above, so this cannot fail.
    let session = ReviewSession::start(due)?;

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = channel();

    let state = ServerState {
        mutable: Arc::new(Mutex::new(MutableState { db, session })),
        shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
    };
    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/script.js", get(script_handler));
    let app = app.route("/style.css", get(style_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state.clone());
    let bind = format!("{}:{}", config.host, config.port);

    // Start the server with graceful shutdown on Ctrl+C or the close
    // button on the completion page.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_rx))
        .await?;

    // A session ended through the state machine (finished or ended early)
    // is a clean exit; anything else was interrupted.
    let mutable = state.mutable.lock().unwrap();
    if mutable.session.is_completed() {
        Ok(())
    } else {
        fail("Session interrupted before completion")
    }
}

fn filter_cards(
    cards: Vec<Flashcard>,
    card_limit: Option<usize>,
    category: Option<String>,
) -> Vec<Flashcard> {
    let cards = match category {
        Some(category) => cards
            .into_iter()
            .filter(|card| card.category == category)
            .collect(),
        None => cards,
    };
    match card_limit {
        Some(limit) => cards.into_iter().take(limit).collect(),
        None => cards,
    }
}

async fn script_handler() -> (StatusCode, [(HeaderName, &'static str); 1], &'static str) {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/javascript")],
        include_str!("script.js"),
    )
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

async fn shutdown_signal(shutdown_rx: Receiver<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let shutdown = async {
        shutdown_rx.await.ok();
    };

    select! {
        _ = ctrl_c => {
            log::debug!("Received Ctrl+C, shutting down gracefully");
        },
        _ = shutdown => {
            log::debug!("Received shutdown signal, shutting down gracefully");
        },
    }
}
