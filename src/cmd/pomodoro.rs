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

//! The terminal pomodoro timer. A one-second sleep loop drives the core
//! timer state machine; Ctrl+C ends the session, at which point completed
//! pomodoros are persisted and credited to the study streak.

use std::io::Write;
use std::io::stdout;
use std::time::Duration;

use studydeck_core::PomodoroConfig;
use studydeck_core::PomodoroPhase;
use studydeck_core::PomodoroTimer;
use studydeck_core::Timestamp;
use studydeck_core::record_study_event;
use tokio::pin;
use tokio::select;
use tokio::signal;
use tokio::time::sleep;

use crate::db::Database;
use crate::error::Fallible;

pub async fn run_pomodoro(db_path: &str, config: PomodoroConfig) -> Fallible<()> {
    let db = Database::open(db_path)?;
    let started_at = Timestamp::now();
    let mut timer = PomodoroTimer::new(config);
    timer.start();
    println!(
        "Pomodoro started: {} minute(s) of work. Press Ctrl+C to end the session.",
        config.work_minutes
    );

    let ctrl_c = signal::ctrl_c();
    pin!(ctrl_c);
    loop {
        select! {
            _ = &mut ctrl_c => {
                break;
            }
            _ = sleep(Duration::from_secs(1)) => {
                match timer.tick(1) {
                    Some(phase) => announce(phase, &timer, config),
                    None => {
                        print!("\r{} {}  ", timer.phase(), format_remaining(timer.remaining_seconds()));
                        let _ = stdout().flush();
                    }
                }
            }
        }
    }

    let ended_at = Timestamp::now();
    let completed = timer.completed_pomodoros();
    db.insert_pomodoro_session(started_at, ended_at, completed)?;
    if completed > 0 {
        let mut stats = db.load_stats()?;
        stats.total_pomodoros_completed += completed as u64;
        stats.total_study_minutes += (completed * config.work_minutes) as u64;
        stats = record_study_event(stats, ended_at.date());
        db.save_stats(&stats)?;
    }
    println!("\nSession ended: {completed} pomodoro(s) completed.");
    Ok(())
}

fn announce(phase: PomodoroPhase, timer: &PomodoroTimer, config: PomodoroConfig) {
    match phase {
        PomodoroPhase::ShortBreak => {
            println!(
                "\nPomodoro {} complete. Take a {} minute break.",
                timer.completed_pomodoros(),
                config.short_break_minutes
            );
        }
        PomodoroPhase::LongBreak => {
            println!(
                "\nPomodoro {} complete. Take a long {} minute break.",
                timer.completed_pomodoros(),
                config.long_break_minutes
            );
        }
        PomodoroPhase::Work => {
            println!("\nBreak over. Back to work for {} minute(s).", config.work_minutes);
        }
        _ => {}
    }
}

fn format_remaining(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
