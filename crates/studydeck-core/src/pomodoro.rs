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

//! Pomodoro timer state machine.
//!
//! The timer holds no clock of its own: the host calls [`PomodoroTimer::tick`]
//! with elapsed seconds and reacts to the returned phase changes. Work
//! intervals alternate with short breaks, with a long break after every
//! N-th completed pomodoro.

use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PomodoroPhase {
    /// Created or reset; nothing is counting down.
    Ready,
    Work,
    ShortBreak,
    LongBreak,
    Paused,
}

impl Display for PomodoroPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PomodoroPhase::Ready => write!(f, "ready"),
            PomodoroPhase::Work => write!(f, "work"),
            PomodoroPhase::ShortBreak => write!(f, "short break"),
            PomodoroPhase::LongBreak => write!(f, "long break"),
            PomodoroPhase::Paused => write!(f, "paused"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PomodoroConfig {
    pub work_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    /// Every N-th completed pomodoro earns a long break.
    pub pomodoros_until_long_break: u32,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            pomodoros_until_long_break: 4,
        }
    }
}

pub struct PomodoroTimer {
    config: PomodoroConfig,
    phase: PomodoroPhase,
    /// The phase to return to when a pause lifts.
    paused_from: PomodoroPhase,
    remaining_seconds: u32,
    completed_pomodoros: u32,
}

impl PomodoroTimer {
    pub fn new(config: PomodoroConfig) -> Self {
        Self {
            config,
            phase: PomodoroPhase::Ready,
            paused_from: PomodoroPhase::Ready,
            remaining_seconds: config.work_minutes * 60,
            completed_pomodoros: 0,
        }
    }

    pub fn phase(&self) -> PomodoroPhase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn completed_pomodoros(&self) -> u32 {
        self.completed_pomodoros
    }

    /// Starts the first work interval, or resumes from a pause.
    pub fn start(&mut self) {
        match self.phase {
            PomodoroPhase::Ready => {
                self.phase = PomodoroPhase::Work;
                self.remaining_seconds = self.config.work_minutes * 60;
            }
            PomodoroPhase::Paused => {
                self.phase = self.paused_from;
            }
            _ => {}
        }
    }

    /// Freezes the countdown; `start` resumes it with the remaining time
    /// intact.
    pub fn pause(&mut self) {
        match self.phase {
            PomodoroPhase::Work | PomodoroPhase::ShortBreak | PomodoroPhase::LongBreak => {
                self.paused_from = self.phase;
                self.phase = PomodoroPhase::Paused;
            }
            _ => {}
        }
    }

    /// Back to a fresh timer, discarding completed pomodoros.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Completes the current interval immediately and returns the phase
    /// entered, if the timer was running.
    pub fn skip(&mut self) -> Option<PomodoroPhase> {
        match self.phase {
            PomodoroPhase::Work | PomodoroPhase::ShortBreak | PomodoroPhase::LongBreak => {
                Some(self.complete_interval())
            }
            _ => None,
        }
    }

    /// Advances the countdown by `seconds`. Returns the newly entered
    /// phase when the current interval completes, otherwise `None`. Does
    /// nothing while Ready or Paused.
    pub fn tick(&mut self, seconds: u32) -> Option<PomodoroPhase> {
        match self.phase {
            PomodoroPhase::Work | PomodoroPhase::ShortBreak | PomodoroPhase::LongBreak => {
                self.remaining_seconds = self.remaining_seconds.saturating_sub(seconds);
                if self.remaining_seconds == 0 {
                    Some(self.complete_interval())
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn complete_interval(&mut self) -> PomodoroPhase {
        match self.phase {
            PomodoroPhase::Work => {
                self.completed_pomodoros += 1;
                if self.completed_pomodoros % self.config.pomodoros_until_long_break == 0 {
                    self.phase = PomodoroPhase::LongBreak;
                    self.remaining_seconds = self.config.long_break_minutes * 60;
                } else {
                    self.phase = PomodoroPhase::ShortBreak;
                    self.remaining_seconds = self.config.short_break_minutes * 60;
                }
            }
            _ => {
                self.phase = PomodoroPhase::Work;
                self.remaining_seconds = self.config.work_minutes * 60;
            }
        }
        self.phase
    }
}
