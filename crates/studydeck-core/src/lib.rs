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

//! studydeck-core: the scheduling core of the studydeck study tool.
//!
//! This library provides:
//! - The SM-2 spaced repetition scheduler
//! - The review-session state machine and its queue
//! - Study streak and counter statistics
//! - A pomodoro timer state machine
//!
//! Everything here is synchronous and free of I/O. The current time and
//! date are passed in explicitly; `Timestamp::now()`/`Date::today()`
//! exist only behind the `clock` feature for hosts that want them.

pub mod error;
pub mod pomodoro;
pub mod queue;
pub mod session;
pub mod sm2;
pub mod stats;
pub mod types;

// Re-exports for convenience
pub use error::{CoreError, Fallible};
pub use pomodoro::{PomodoroConfig, PomodoroPhase, PomodoroTimer};
pub use queue::ReviewQueue;
pub use session::{ReviewSession, SessionOutcome, SessionPhase};
pub use sm2::Quality;
pub use stats::{StudyStats, record_study_event};
pub use types::card::{CardId, Flashcard};
pub use types::date::Date;
pub use types::scheduling::{SchedulingState, apply_review};
pub use types::timestamp::Timestamp;
