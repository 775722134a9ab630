// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Instants
//!
//! The interval algebra never inspects what an instant *is*. It only needs a
//! total order, the signed distance between two instants, and the ability to
//! move an instant by such a distance. [`Instant`] captures exactly that
//! contract so any timestamp type can back an [`Interval`](crate::interval::Interval).
//!
//! Implementations are provided for [`chrono::DateTime<Utc>`] and for the
//! integer [`TimePoint`](crate::time::TimePoint).

use chrono::{DateTime, TimeDelta, Utc};
use std::{
    fmt::Debug,
    ops::{Add, Neg},
};

/// A totally ordered point in time.
///
/// `Delta` is the signed duration between two instants. It must be able to
/// represent negative spans so that intervals can be shrunk by a negative pad.
///
/// # Examples
///
/// ```
/// use timeset_core::instant::Instant;
/// use timeset_core::time::{TimeDelta, TimePoint};
///
/// let a = TimePoint::new(10i64);
/// let b = TimePoint::new(25i64);
/// assert_eq!(b.delta_since(a), TimeDelta::new(15));
/// assert_eq!(a.checked_shift(TimeDelta::new(-3)), Some(TimePoint::new(7)));
/// ```
pub trait Instant: Copy + Ord + Debug {
    type Delta: Copy + Ord + Debug + Neg<Output = Self::Delta> + Add<Output = Self::Delta>;

    /// The empty duration.
    fn zero_delta() -> Self::Delta;

    /// Signed duration `self - earlier`.
    fn delta_since(self, earlier: Self) -> Self::Delta;

    /// Moves the instant by `delta`, or `None` if the result is not representable.
    fn checked_shift(self, delta: Self::Delta) -> Option<Self>;

    /// `a + b`, or `None` on overflow.
    fn checked_add_delta(a: Self::Delta, b: Self::Delta) -> Option<Self::Delta>;

    /// `-delta`, or `None` on overflow.
    fn checked_neg_delta(delta: Self::Delta) -> Option<Self::Delta>;
}

impl Instant for DateTime<Utc> {
    type Delta = TimeDelta;

    #[inline]
    fn zero_delta() -> Self::Delta {
        TimeDelta::zero()
    }

    #[inline]
    fn delta_since(self, earlier: Self) -> Self::Delta {
        self.signed_duration_since(earlier)
    }

    #[inline]
    fn checked_shift(self, delta: Self::Delta) -> Option<Self> {
        self.checked_add_signed(delta)
    }

    #[inline]
    fn checked_add_delta(a: Self::Delta, b: Self::Delta) -> Option<Self::Delta> {
        a.checked_add(&b)
    }

    // The chrono range is symmetric around zero.
    #[inline]
    fn checked_neg_delta(delta: Self::Delta) -> Option<Self::Delta> {
        Some(-delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_chrono_delta_since_is_signed() {
        assert_eq!(at(13, 20).delta_since(at(13, 15)), TimeDelta::minutes(5));
        assert_eq!(at(13, 15).delta_since(at(13, 20)), TimeDelta::minutes(-5));
    }

    #[test]
    fn test_chrono_checked_shift_both_directions() {
        assert_eq!(
            at(13, 15).checked_shift(TimeDelta::minutes(2)),
            Some(at(13, 17))
        );
        assert_eq!(
            at(13, 15).checked_shift(-TimeDelta::minutes(15)),
            Some(at(13, 0))
        );
    }

    #[test]
    fn test_chrono_checked_shift_overflow_is_none() {
        assert_eq!(DateTime::<Utc>::MAX_UTC.checked_shift(TimeDelta::days(1)), None);
    }

    #[test]
    fn test_chrono_zero_delta() {
        assert_eq!(<DateTime<Utc> as Instant>::zero_delta(), TimeDelta::zero());
    }
}
