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

//! Optional `studydeck.toml` configuration. Command-line flags override
//! file values; both fall back to built-in defaults.

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;
use studydeck_core::PomodoroConfig;

use crate::error::Fallible;

pub const CONFIG_FILE: &str = "studydeck.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub drill: DrillSection,
    pub pomodoro: PomodoroSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DrillSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub card_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PomodoroSection {
    pub work_minutes: Option<u32>,
    pub short_break_minutes: Option<u32>,
    pub long_break_minutes: Option<u32>,
    pub pomodoros_until_long_break: Option<u32>,
}

impl PomodoroSection {
    /// Fills unset fields from the standard pomodoro defaults.
    pub fn to_timer_config(&self) -> PomodoroConfig {
        let defaults = PomodoroConfig::default();
        PomodoroConfig {
            work_minutes: self.work_minutes.unwrap_or(defaults.work_minutes),
            short_break_minutes: self
                .short_break_minutes
                .unwrap_or(defaults.short_break_minutes),
            long_break_minutes: self
                .long_break_minutes
                .unwrap_or(defaults.long_break_minutes),
            pomodoros_until_long_break: self
                .pomodoros_until_long_break
                .unwrap_or(defaults.pomodoros_until_long_break),
        }
    }
}

/// Reads the config file if it exists; a missing file is just defaults.
pub fn load_config(path: Option<&str>) -> Fallible<Config> {
    let path = path.unwrap_or(CONFIG_FILE);
    if !Path::new(path).exists() {
        return Ok(Config::default());
    }
    let text = read_to_string(path)?;
    let config = toml::from_str(&text)?;
    Ok(config)
}
