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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use crate::session::SessionPhase;

/// Errors the core can produce. All of these are synchronous logic errors:
/// none are transient, so there is no retry policy anywhere in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A recall rating outside the 0-5 range.
    InvalidQuality(u8),
    /// A session operation called in the wrong phase.
    InvalidTransition {
        action: &'static str,
        phase: SessionPhase,
    },
    /// A review session started with no cards.
    EmptyQueue,
    /// A string that does not parse as a timestamp.
    InvalidTimestamp(String),
    /// A string that does not parse as a date.
    InvalidDate(String),
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            CoreError::InvalidQuality(q) => {
                write!(f, "quality rating {q} is out of range (expected 0-5)")
            }
            CoreError::InvalidTransition { action, phase } => {
                write!(f, "cannot {action} while the session is {phase}")
            }
            CoreError::EmptyQueue => {
                write!(f, "cannot start a review session with no cards")
            }
            CoreError::InvalidTimestamp(s) => {
                write!(f, "failed to parse timestamp: '{s}'")
            }
            CoreError::InvalidDate(s) => {
                write!(f, "invalid date: '{s}'")
            }
        }
    }
}

impl Error for CoreError {}

pub type Fallible<T> = Result<T, CoreError>;
