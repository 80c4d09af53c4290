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

use serde::Deserialize;
use serde::Serialize;

use crate::types::timestamp::Timestamp;

/// The ease factor of an item that has never been reviewed.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// The ease factor never drops below this.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Memory-strength state for one learner and one vocabulary item.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    /// When the item becomes due again.
    pub next_review_date: Timestamp,
    /// Multiplier controlling how fast the interval grows.
    pub ease_factor: f64,
    /// Days until the next scheduled review.
    #[serde(rename = "interval")]
    pub interval_days: i64,
    /// Consecutive successful recalls since the last lapse.
    pub repetition_count: i64,
}

impl ReviewState {
    /// The state of an item that has never been reviewed, due at `due`.
    pub fn initial(due: Timestamp) -> Self {
        ReviewState {
            next_review_date: due,
            ease_factor: INITIAL_EASE_FACTOR,
            interval_days: 0,
            repetition_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_serialized_field_names() -> Fallible<()> {
        let state = ReviewState::initial(Timestamp::parse("2024-03-01T09:00:00.000")?);
        let json = serde_json::to_value(state)?;
        assert_eq!(json["interval"], 0);
        assert_eq!(json["repetition_count"], 0);
        assert_eq!(json["ease_factor"], 2.5);
        assert_eq!(json["next_review_date"], "2024-03-01T09:00:00.000");
        Ok(())
    }
}
