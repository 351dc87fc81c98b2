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

use std::process::exit;
use std::time::Duration;

use clap::Parser;
use studydeck_core::PomodoroConfig;
use studydeck_core::Timestamp;
use tokio::net::TcpStream;
use tokio::spawn;
use tokio::time::sleep;

use crate::cmd::add::add_card;
use crate::cmd::drill::server::ServerConfig;
use crate::cmd::drill::server::start_server;
use crate::cmd::due::list_due;
use crate::cmd::export::export_cards;
use crate::cmd::pomodoro::run_pomodoro;
use crate::cmd::stats::print_stats;
use crate::config::load_config;
use crate::error::Fallible;

const DEFAULT_DB: &str = "studydeck.db";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Add a flashcard.
    Add {
        /// The question shown during review.
        #[arg(long)]
        question: String,
        /// The answer revealed during review.
        #[arg(long)]
        answer: String,
        /// Category to file the card under.
        #[arg(long, default_value = "General")]
        category: String,
        /// Optional free-form notes shown alongside the answer.
        #[arg(long)]
        notes: Option<String>,
        /// Path to the card database.
        #[arg(long, default_value = DEFAULT_DB)]
        db: String,
    },
    /// Review due cards through a web interface.
    Drill {
        /// Path to the card database.
        #[arg(long, default_value = DEFAULT_DB)]
        db: String,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long)]
        host: Option<String>,
        /// The port to use for the web server. Default is 8000.
        #[arg(long)]
        port: Option<u16>,
        /// Maximum number of cards to review in a session. By default, all cards due are reviewed.
        #[arg(long)]
        card_limit: Option<usize>,
        /// Only review cards from this category.
        #[arg(long)]
        category: Option<String>,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
    },
    /// List the cards due for review.
    Due {
        /// Path to the card database.
        #[arg(long, default_value = DEFAULT_DB)]
        db: String,
    },
    /// Print study statistics.
    Stats {
        /// Path to the card database.
        #[arg(long, default_value = DEFAULT_DB)]
        db: String,
    },
    /// Export all cards as JSON.
    Export {
        /// Path to the card database.
        #[arg(long, default_value = DEFAULT_DB)]
        db: String,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<String>,
    },
    /// Run a pomodoro timer in the terminal.
    Pomodoro {
        /// Path to the card database.
        #[arg(long, default_value = DEFAULT_DB)]
        db: String,
        /// Length of a work interval in minutes.
        #[arg(long)]
        work_minutes: Option<u32>,
        /// Length of a short break in minutes.
        #[arg(long)]
        short_break_minutes: Option<u32>,
        /// Length of a long break in minutes.
        #[arg(long)]
        long_break_minutes: Option<u32>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Add {
            question,
            answer,
            category,
            notes,
            db,
        } => add_card(&db, &question, &answer, &category, notes.as_deref()),
        Command::Drill {
            db,
            host,
            port,
            card_limit,
            category,
            open_browser,
        } => {
            let file = load_config(None)?;
            let host = host
                .or(file.drill.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string());
            let port = port.or(file.drill.port).unwrap_or(DEFAULT_PORT);
            let card_limit = card_limit.or(file.drill.card_limit);
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                db_path: db,
                host,
                port,
                session_started_at: Timestamp::now(),
                card_limit,
                category,
            };
            start_server(config).await
        }
        Command::Due { db } => list_due(&db),
        Command::Stats { db } => print_stats(&db),
        Command::Export { db, output } => export_cards(&db, output.as_deref()),
        Command::Pomodoro {
            db,
            work_minutes,
            short_break_minutes,
            long_break_minutes,
        } => {
            let file = load_config(None)?;
            let defaults = file.pomodoro.to_timer_config();
            let config = PomodoroConfig {
                work_minutes: work_minutes.unwrap_or(defaults.work_minutes),
                short_break_minutes: short_break_minutes.unwrap_or(defaults.short_break_minutes),
                long_break_minutes: long_break_minutes.unwrap_or(defaults.long_break_minutes),
                pomodoros_until_long_break: defaults.pomodoros_until_long_break,
            };
            run_pomodoro(&db, config).await
        }
    }
}

pub async fn wait_for_server(host: &str, port: u16) -> Fallible<()> {
    loop {
        if let Ok(stream) = TcpStream::connect(format!("{host}:{port}")).await {
            drop(stream);
            break;
        }
        sleep(Duration::from_millis(1)).await;
    }
    Ok(())
}
