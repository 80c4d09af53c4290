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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

/// The highest grade.
pub const MAX_QUALITY: u8 = 5;

/// Grades at or above this count as a successful recall.
pub const PASSING_QUALITY: u8 = 3;

/// A learner-reported recall grade, from 0 (blackout) to 5 (perfect).
///
/// Construction rejects anything outside `0..=5`, so the scheduler never
/// sees an out-of-range grade.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: i64) -> Fallible<Self> {
        match u8::try_from(value) {
            Ok(q) if q <= MAX_QUALITY => Ok(Quality(q)),
            _ => fail(format!("quality must be between 0 and 5, got {value}")),
        }
    }

    /// Accepts a JSON-style number as long as it is a whole number.
    pub fn from_number(value: f64) -> Fallible<Self> {
        if value.fract() != 0.0 || !value.is_finite() {
            return fail(format!("quality must be a whole number between 0 and 5, got {value}"));
        }
        Quality::new(value as i64)
    }

    pub fn is_recall(self) -> bool {
        self.0 >= PASSING_QUALITY
    }
}

impl From<Quality> for f64 {
    fn from(q: Quality) -> f64 {
        q.0 as f64
    }
}

impl From<Quality> for i64 {
    fn from(q: Quality) -> i64 {
        q.0 as i64
    }
}

impl TryFrom<i64> for Quality {
    type Error = ErrorReport;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Quality::new(value)
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range() {
        for q in 0..=5 {
            assert_eq!(i64::from(Quality::new(q).unwrap()), q);
        }
        assert!(Quality::new(-1).is_err());
        assert!(Quality::new(6).is_err());
        assert!(Quality::new(256).is_err());
    }

    #[test]
    fn test_from_number() -> Fallible<()> {
        assert_eq!(Quality::from_number(4.0)?, Quality::new(4)?);
        assert_eq!(Quality::from_number(0.0)?, Quality::new(0)?);
        let err = Quality::from_number(4.5).unwrap_err();
        assert_eq!(err.message(), "quality must be a whole number between 0 and 5, got 4.5");
        assert!(Quality::from_number(f64::NAN).is_err());
        assert!(Quality::from_number(f64::INFINITY).is_err());
        let err = Quality::from_number(7.0).unwrap_err();
        assert_eq!(err.message(), "quality must be between 0 and 5, got 7");
        assert!(Quality::from_number(-1.0).is_err());
        Ok(())
    }

    #[test]
    fn test_recall_threshold() -> Fallible<()> {
        assert!(!Quality::new(2)?.is_recall());
        assert!(Quality::new(3)?.is_recall());
        assert!(Quality::new(5)?.is_recall());
        Ok(())
    }

    #[test]
    fn test_deserialize() -> Fallible<()> {
        let q: Quality = serde_json::from_str("4")?;
        assert_eq!(q, Quality::new(4)?);
        let err = serde_json::from_str::<Quality>("9").unwrap_err();
        assert!(err.to_string().contains("between 0 and 5"));
        Ok(())
    }
}
