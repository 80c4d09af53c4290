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

//! SM-2 review scheduling.
//!
//! A successful recall (quality 3 or better) grows the interval: one day,
//! then six days, then the previous interval times the ease factor. A lapse
//! resets the repetition count and brings the item back the next day. The
//! ease factor moves with every grade and is floored at 1.3.

use crate::clock::Clock;
use crate::types::quality::MAX_QUALITY;
use crate::types::quality::Quality;
use crate::types::review_state::MIN_EASE_FACTOR;
use crate::types::review_state::ReviewState;
use crate::types::timestamp::Timestamp;

/// Interval after the first successful recall.
const FIRST_INTERVAL: i64 = 1;

/// Interval after the second consecutive successful recall.
const SECOND_INTERVAL: i64 = 6;

/// Interval after a lapse.
const LAPSE_INTERVAL: i64 = 1;

/// The change in ease factor produced by a grade.
pub fn ease_factor_delta(quality: Quality) -> f64 {
    let miss: f64 = (MAX_QUALITY as f64) - f64::from(quality);
    0.1 - miss * (0.08 + miss * 0.02)
}

pub fn next_ease_factor(ease_factor: f64, quality: Quality) -> f64 {
    f64::max(ease_factor + ease_factor_delta(quality), MIN_EASE_FACTOR)
}

/// Computes the state after grading an item.
///
/// `current` is `None` for an item that has never been reviewed, in which
/// case the defaults of [`ReviewState::initial`] apply. The review date
/// saturates at [`Timestamp::latest`] once the interval outgrows the
/// calendar, so every valid input has a result.
pub fn schedule<C>(current: Option<ReviewState>, quality: Quality, clock: &C) -> ReviewState
where
    C: Clock + ?Sized,
{
    let now: Timestamp = clock.now();
    let ReviewState {
        ease_factor,
        interval_days,
        repetition_count,
        ..
    } = current.unwrap_or_else(|| ReviewState::initial(now));

    let (interval_days, repetition_count): (i64, i64) = if quality.is_recall() {
        let interval = match repetition_count {
            0 => FIRST_INTERVAL,
            1 => SECOND_INTERVAL,
            _ => (interval_days as f64 * ease_factor).round() as i64,
        };
        (interval, repetition_count + 1)
    } else {
        (LAPSE_INTERVAL, 0)
    };

    ReviewState {
        next_review_date: now.add_days(interval_days),
        ease_factor: next_ease_factor(ease_factor, quality),
        interval_days,
        repetition_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::Fallible;
    use crate::types::review_state::INITIAL_EASE_FACTOR;

    fn feq(a: f64, b: f64) -> bool {
        f64::abs(a - b) < 1e-9
    }

    fn clock() -> FixedClock {
        FixedClock(Timestamp::parse("2024-05-10T18:30:00.000").unwrap())
    }

    fn q(value: i64) -> Quality {
        Quality::new(value).unwrap()
    }

    fn state(interval_days: i64, repetition_count: i64, ease_factor: f64) -> ReviewState {
        ReviewState {
            next_review_date: clock().now(),
            ease_factor,
            interval_days,
            repetition_count,
        }
    }

    #[test]
    fn test_first_review() {
        let clock = clock();
        let next = schedule(None, q(4), &clock);
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.repetition_count, 1);
        assert!(feq(next.ease_factor, INITIAL_EASE_FACTOR));
        assert_eq!(next.next_review_date, clock.now().add_days(1));
    }

    #[test]
    fn test_second_review() {
        let next = schedule(Some(state(1, 1, 2.5)), q(4), &clock());
        assert_eq!(next.interval_days, 6);
        assert_eq!(next.repetition_count, 2);
    }

    #[test]
    fn test_third_review_uses_old_ease_factor() {
        let next = schedule(Some(state(6, 2, 2.5)), q(5), &clock());
        assert_eq!(next.interval_days, 15);
        assert_eq!(next.repetition_count, 3);
        assert!(feq(next.ease_factor, 2.6));
    }

    #[test]
    fn test_lapse() {
        let next = schedule(Some(state(15, 3, 2.6)), q(1), &clock());
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.repetition_count, 0);
        assert!(feq(next.ease_factor, 2.06));
    }

    #[test]
    fn test_lapse_from_any_state() {
        for quality in 0..3 {
            for (interval, reps) in [(0, 0), (1, 1), (6, 2), (40, 7)] {
                let next = schedule(Some(state(interval, reps, 2.1)), q(quality), &clock());
                assert_eq!(next.interval_days, 1);
                assert_eq!(next.repetition_count, 0);
            }
        }
    }

    #[test]
    fn test_first_recall_ignores_interval() {
        // Only the repetition count decides the first two intervals.
        let next = schedule(Some(state(30, 0, 1.9)), q(3), &clock());
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.repetition_count, 1);
    }

    #[test]
    fn test_growth_rounds() {
        // 7 * 1.5 = 10.5 rounds up.
        let next = schedule(Some(state(7, 4, 1.5)), q(4), &clock());
        assert_eq!(next.interval_days, 11);
        // 10 * 1.3 = 13.
        let next = schedule(Some(state(10, 2, 1.3)), q(3), &clock());
        assert_eq!(next.interval_days, 13);
    }

    #[test]
    fn test_ease_factor_deltas() {
        let expected = [-0.8, -0.54, -0.32, -0.14, 0.0, 0.1];
        for (quality, delta) in expected.iter().enumerate() {
            assert!(feq(ease_factor_delta(q(quality as i64)), *delta));
        }
    }

    #[test]
    fn test_ease_factor_floor() {
        for quality in 0..=5 {
            for ease in [1.3, 1.35, 1.5, 2.0, 2.5, 3.2] {
                let next = schedule(Some(state(6, 2, ease)), q(quality), &clock());
                assert!(next.ease_factor >= MIN_EASE_FACTOR);
            }
        }
        let next = schedule(Some(state(6, 2, 1.4)), q(0), &clock());
        assert!(feq(next.ease_factor, MIN_EASE_FACTOR));
    }

    #[test]
    fn test_deterministic() {
        let clock = clock();
        let current = Some(state(6, 2, 2.2));
        assert_eq!(
            schedule(current, q(3), &clock),
            schedule(current, q(3), &clock)
        );
    }

    #[test]
    fn test_due_date_follows_clock() -> Fallible<()> {
        let later = FixedClock(Timestamp::parse("2024-12-31T23:00:00.000")?);
        let next = schedule(Some(state(1, 1, 2.5)), q(5), &later);
        assert_eq!(
            next.next_review_date,
            Timestamp::parse("2025-01-06T23:00:00.000")?
        );
        Ok(())
    }

    #[test]
    fn test_huge_interval_saturates_date() {
        let next = schedule(Some(state(200_000_000, 5, 2.5)), q(5), &clock());
        assert_eq!(next.interval_days, 500_000_000);
        assert_eq!(next.repetition_count, 6);
        assert_eq!(next.next_review_date, Timestamp::latest());
    }

    #[test]
    fn test_interval_overflow_saturates() {
        let next = schedule(Some(state(i64::MAX, 9, 2.5)), q(4), &clock());
        assert_eq!(next.interval_days, i64::MAX);
        assert_eq!(next.next_review_date, Timestamp::latest());
    }

    /// Dozens of perfect recalls in a row push the interval far past the
    /// calendar without failing.
    #[test]
    fn test_long_perfect_run() {
        let clock = clock();
        let mut current: Option<ReviewState> = None;
        let mut previous = clock.now();
        for _ in 0..60 {
            let next = schedule(current, q(5), &clock);
            assert!(next.next_review_date >= previous);
            assert!(next.next_review_date <= Timestamp::latest());
            previous = next.next_review_date;
            current = Some(next);
        }
        let last = current.unwrap();
        assert_eq!(last.repetition_count, 60);
        assert_eq!(last.next_review_date, Timestamp::latest());
    }

    /// A run of perfect recalls, starting from a new item.
    #[test]
    fn test_perfect_run() {
        let clock = clock();
        let mut current: Option<ReviewState> = None;
        let mut intervals = vec![];
        let mut eases = vec![];
        for _ in 0..4 {
            let next = schedule(current, q(5), &clock);
            intervals.push(next.interval_days);
            eases.push(next.ease_factor);
            current = Some(next);
        }
        // 6 * 2.7 = 16.2, 16 * 2.8 = 44.8.
        assert_eq!(intervals, vec![1, 6, 16, 45]);
        for (actual, expected) in eases.iter().zip([2.6, 2.7, 2.8, 2.9]) {
            assert!(f64::abs(actual - expected) < 1e-6);
        }
    }
}
