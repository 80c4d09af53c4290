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
use chrono::NaiveDateTime;
use chrono::SubsecRound;
use chrono::TimeDelta;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// A timestamp without a timezone and millisecond precision.
///
/// The string form sorts in chronological order, which the storage layer
/// relies on for due-date comparisons.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn new(ndt: NaiveDateTime) -> Self {
        Self(ndt.trunc_subsecs(3))
    }

    pub fn parse(s: &str) -> Fallible<Self> {
        let ndt = NaiveDateTime::parse_from_str(s, FORMAT)
            .map_err(|_| ErrorReport::new(format!("Failed to parse timestamp: '{s}'.")))?;
        Ok(Timestamp(ndt))
    }

    /// The current timestamp in the user's local time.
    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self(chrono::Local::now().naive_local().trunc_subsecs(3))
    }

    /// The earliest timestamp with a four-digit year.
    pub fn earliest() -> Self {
        Self(bound(1, 1, 1, 0).unwrap_or(NaiveDateTime::MIN))
    }

    /// The latest timestamp with a four-digit year.
    pub fn latest() -> Self {
        Self(bound(9999, 12, 31, 86_399_999).unwrap_or(NaiveDateTime::MAX))
    }

    /// This timestamp shifted by a whole number of days, saturating at
    /// [`Timestamp::earliest`] and [`Timestamp::latest`].
    pub fn add_days(self, days: i64) -> Self {
        let shifted = TimeDelta::try_days(days).and_then(|delta| self.0.checked_add_signed(delta));
        match shifted {
            Some(ndt) => Self(ndt).clamp(Self::earliest(), Self::latest()),
            None if days < 0 => Self::earliest(),
            None => Self::latest(),
        }
    }
}

/// Midnight of the given date plus `millis` milliseconds.
fn bound(year: i32, month: u32, day: u32, millis: i64) -> Option<NaiveDateTime> {
    let midnight = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
    midnight.checked_add_signed(TimeDelta::milliseconds(millis))
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Timestamp::parse(&value)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> String {
        ts.to_string()
    }
}

#[cfg(feature = "sqlite")]
impl rusqlite::types::ToSql for Timestamp {
    fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
        Ok(rusqlite::types::ToSqlOutput::from(self.to_string()))
    }
}

#[cfg(feature = "sqlite")]
impl rusqlite::types::FromSql for Timestamp {
    fn column_result(value: rusqlite::types::ValueRef<'_>) -> rusqlite::types::FromSqlResult<Self> {
        let s = value.as_str()?;
        Timestamp::parse(s).map_err(|e| rusqlite::types::FromSqlError::Other(Box::new(e)))
    }
}
