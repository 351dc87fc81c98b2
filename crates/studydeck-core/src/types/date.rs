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

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::error::CoreError;

/// Represents a calendar date.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Date(NaiveDate);

impl Date {
    pub fn new(naive_date: NaiveDate) -> Self {
        Self(naive_date)
    }

    #[cfg(feature = "clock")]
    pub fn today() -> Self {
        Self(chrono::Local::now().naive_local().date())
    }

    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// The signed number of whole days from `other` to `self`. Positive
    /// when `self` is later.
    pub fn days_since(self, other: Date) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl TryFrom<String> for Date {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .map_err(|_| CoreError::InvalidDate(value))?;
        Ok(Date(date))
    }
}

impl From<Date> for String {
    fn from(date: Date) -> String {
        date.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    fn date(s: &str) -> Date {
        Date::try_from(s.to_string()).unwrap()
    }

    #[test]
    fn test_serialize() -> Fallible<()> {
        let serialized = serde_json::to_string(&date("2024-01-02")).unwrap();
        assert_eq!(serialized, "\"2024-01-02\"");
        Ok(())
    }

    #[test]
    fn test_deserialize() -> Fallible<()> {
        let deserialized: Date = serde_json::from_str("\"2024-01-02\"").unwrap();
        assert_eq!(deserialized, date("2024-01-02"));
        Ok(())
    }

    #[test]
    fn test_invalid_date() {
        let result = Date::try_from("02/01/2024".to_string());
        assert_eq!(result, Err(CoreError::InvalidDate("02/01/2024".to_string())));
    }

    #[test]
    fn test_days_since() {
        assert_eq!(date("2024-03-02").days_since(date("2024-03-01")), 1);
        assert_eq!(date("2024-03-01").days_since(date("2024-03-01")), 0);
        assert_eq!(date("2024-03-01").days_since(date("2024-03-04")), -3);
        // Across a leap day.
        assert_eq!(date("2024-03-01").days_since(date("2024-02-28")), 2);
    }
}
