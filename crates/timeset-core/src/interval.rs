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

//! # Intervals
//!
//! [`Interval`] is an immutable span between two [`Instant`]s. Which of the two
//! endpoints belong to the span is not baked into the type: every query takes
//! a [`Bounds`] describing whether the start and stop are closed or open, so
//! the same value can be read as `[a, b)`, `[a, b]`, `(a, b)` or `(a, b]`.
//!
//! Queries that accept "something to compare against" take an [`Endpoint`],
//! which is either a single instant or a whole interval. A missing target
//! (`None`) never matches.

use crate::{
    err::{IntervalError, InvalidArgumentError, InvalidArgumentKind},
    instant::Instant,
};
use std::fmt;

/// Closedness of an interval's two endpoints for a single query.
///
/// # Examples
///
/// ```
/// use timeset_core::interval::Bounds;
///
/// assert_eq!(Bounds::default(), Bounds::CLOSED_OPEN);
/// assert!(Bounds::CLOSED.start_inclusive && Bounds::CLOSED.stop_inclusive);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub start_inclusive: bool,
    pub stop_inclusive: bool,
}

impl Bounds {
    /// `[start, stop)`
    pub const CLOSED_OPEN: Bounds = Bounds::new(true, false);
    /// `[start, stop]`
    pub const CLOSED: Bounds = Bounds::new(true, true);
    /// `(start, stop)`
    pub const OPEN: Bounds = Bounds::new(false, false);
    /// `(start, stop]`
    pub const OPEN_CLOSED: Bounds = Bounds::new(false, true);

    #[inline]
    pub const fn new(start_inclusive: bool, stop_inclusive: bool) -> Self {
        Self {
            start_inclusive,
            stop_inclusive,
        }
    }

    /// `start <= x` when the start is closed, `start < x` otherwise.
    #[inline]
    fn admits_after_start<I: Ord>(&self, start: &I, x: &I) -> bool {
        if self.start_inclusive {
            start <= x
        } else {
            start < x
        }
    }

    /// `x <= stop` when the stop is closed, `x < stop` otherwise.
    #[inline]
    fn admits_before_stop<I: Ord>(&self, stop: &I, x: &I) -> bool {
        if self.stop_inclusive {
            x <= stop
        } else {
            x < stop
        }
    }
}

impl Default for Bounds {
    #[inline]
    fn default() -> Self {
        Bounds::CLOSED_OPEN
    }
}

/// The operand of a comparison against an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint<I> {
    Point(I),
    Span(Interval<I>),
}

impl<I: Copy> Endpoint<I> {
    /// Earliest and latest instant covered by the operand.
    ///
    /// A point is treated as the degenerate span `[p, p]`, which lets every
    /// comparison below be written once.
    #[inline]
    pub fn extent(&self) -> (I, I) {
        match *self {
            Endpoint::Point(p) => (p, p),
            Endpoint::Span(iv) => (iv.start, iv.stop),
        }
    }
}

impl<I> From<Interval<I>> for Endpoint<I> {
    #[inline]
    fn from(iv: Interval<I>) -> Self {
        Endpoint::Span(iv)
    }
}

impl<I> From<Interval<I>> for Option<Endpoint<I>> {
    #[inline]
    fn from(iv: Interval<I>) -> Self {
        Some(Endpoint::Span(iv))
    }
}

/// A span of time from `start` to `stop`, with `start <= stop`.
///
/// Ordering is lexicographic: first by start, then by stop.
///
/// # Examples
///
/// ```
/// use timeset_core::interval::{Bounds, Endpoint, Interval};
/// use timeset_core::time::TimePoint;
///
/// let t = TimePoint::<i64>::new;
/// let iv = Interval::new(t(5), t(1));
/// assert_eq!(iv.start(), t(1));
/// assert_eq!(iv.stop(), t(5));
/// assert!(iv.contains(Endpoint::Point(t(1)), Bounds::CLOSED_OPEN));
/// assert!(!iv.contains(Endpoint::Point(t(5)), Bounds::CLOSED_OPEN));
/// assert!(iv.contains(Endpoint::Point(t(5)), Bounds::CLOSED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval<I> {
    start: I,
    stop: I,
}

impl<I: Instant> Interval<I> {
    /// Creates the interval spanning `a` and `b`.
    ///
    /// The endpoints are swapped if `a > b`; construction never fails.
    #[inline]
    pub fn new(a: I, b: I) -> Self {
        if a > b {
            Self { start: b, stop: a }
        } else {
            Self { start: a, stop: b }
        }
    }

    #[inline]
    pub fn start(&self) -> I {
        self.start
    }

    #[inline]
    pub fn stop(&self) -> I {
        self.stop
    }

    /// `stop - start`; never negative.
    #[inline]
    pub fn duration(&self) -> I::Delta {
        self.stop.delta_since(self.start)
    }

    /// Returns `true` if the interval covers a single instant.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.stop
    }

    /// Grows the interval by `amount` on both sides.
    ///
    /// A negative `amount` shrinks it; shrinking by more than half the
    /// duration would invert the interval and is rejected.
    ///
    /// # Errors
    ///
    /// [`IntervalError::InvalidArgument`] if the pad would invert the
    /// interval or an endpoint leaves the range of the instant type.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeset_core::interval::Interval;
    /// use timeset_core::time::{TimeDelta, TimePoint};
    ///
    /// let iv = Interval::new(TimePoint::new(10i64), TimePoint::new(20i64));
    /// let padded = iv.pad(TimeDelta::new(5)).unwrap();
    /// assert_eq!((padded.start().value(), padded.stop().value()), (5, 25));
    ///
    /// assert!(iv.pad(TimeDelta::new(-6)).is_err());
    /// ```
    pub fn pad(&self, amount: I::Delta) -> Result<Self, IntervalError> {
        let overflow = || InvalidArgumentError::new(InvalidArgumentKind::ShiftOverflow);
        if amount < I::zero_delta() {
            // A doubled pad that overflows is below any representable -duration.
            let inverts = match I::checked_add_delta(amount, amount) {
                Some(shrink) => shrink < -self.duration(),
                None => true,
            };
            if inverts {
                return Err(InvalidArgumentError::new(
                    InvalidArgumentKind::NegativePadInvertsInterval,
                )
                .into());
            }
        }
        let back = I::checked_neg_delta(amount).ok_or_else(overflow)?;
        let start = self.start.checked_shift(back).ok_or_else(overflow)?;
        let stop = self.stop.checked_shift(amount).ok_or_else(overflow)?;
        Ok(Self::new(start, stop))
    }

    /// Checks whether `target` lies entirely inside this interval.
    ///
    /// For an interval target both of its endpoints must pass the same
    /// `bounds` check; partial overlap is not containment.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeset_core::interval::{Bounds, Endpoint, Interval};
    /// use timeset_core::time::TimePoint;
    ///
    /// let t = TimePoint::<i32>::new;
    /// let outer = Interval::new(t(0), t(10));
    /// assert!(outer.contains(Interval::new(t(2), t(8)), Bounds::CLOSED_OPEN));
    /// assert!(!outer.contains(Interval::new(t(2), t(10)), Bounds::CLOSED_OPEN));
    /// assert!(outer.contains(Interval::new(t(2), t(10)), Bounds::CLOSED));
    /// assert!(!outer.contains(None, Bounds::CLOSED));
    /// ```
    #[inline]
    pub fn contains(&self, target: impl Into<Option<Endpoint<I>>>, bounds: Bounds) -> bool {
        let Some(target) = target.into() else {
            return false;
        };
        let (lo, hi) = target.extent();
        bounds.admits_after_start(&self.start, &lo) && bounds.admits_before_stop(&self.stop, &hi)
    }

    /// Checks whether this interval and `other` share any instant.
    ///
    /// `bounds.start_inclusive` decides whether `self.start == other.stop`
    /// counts, `bounds.stop_inclusive` whether `self.stop == other.start`
    /// counts.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeset_core::interval::{Bounds, Interval};
    /// use timeset_core::time::TimePoint;
    ///
    /// let t = TimePoint::<i32>::new;
    /// let a = Interval::new(t(0), t(5));
    /// let b = Interval::new(t(5), t(9));
    /// assert!(!a.overlaps(b, Bounds::CLOSED_OPEN));
    /// assert!(a.overlaps(b, Bounds::CLOSED));
    /// assert!(b.overlaps(a, Bounds::CLOSED_OPEN));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: impl Into<Option<Interval<I>>>, bounds: Bounds) -> bool {
        let Some(other) = other.into() else {
            return false;
        };
        let head = if bounds.start_inclusive {
            self.start <= other.stop
        } else {
            self.start < other.stop
        };
        let tail = if bounds.stop_inclusive {
            self.stop >= other.start
        } else {
            self.stop > other.start
        };
        head && tail
    }

    /// The smallest interval enclosing both `self` and `other`.
    ///
    /// Disjoint inputs are bridged: the result also covers the gap between
    /// them.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            start: self.start.min(other.start),
            stop: self.stop.max(other.stop),
        }
    }

    /// The common part of `self` and `other`.
    ///
    /// Intervals that only touch at a single instant intersect in that
    /// instant when `endpoint_inclusive` is set, and not at all otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeset_core::interval::Interval;
    /// use timeset_core::time::TimePoint;
    ///
    /// let t = TimePoint::<i32>::new;
    /// let a = Interval::new(t(0), t(5));
    /// let b = Interval::new(t(3), t(9));
    /// assert_eq!(a.intersect(&b, false), Some(Interval::new(t(3), t(5))));
    ///
    /// let c = Interval::new(t(5), t(9));
    /// assert_eq!(a.intersect(&c, true), Some(Interval::new(t(5), t(5))));
    /// assert_eq!(a.intersect(&c, false), None);
    /// ```
    #[inline]
    pub fn intersect(&self, other: &Self, endpoint_inclusive: bool) -> Option<Self> {
        let start = self.start.max(other.start);
        let stop = self.stop.min(other.stop);
        (start < stop || (endpoint_inclusive && start == stop)).then_some(Self { start, stop })
    }

    /// Returns `true` if this interval ends before `target` begins.
    #[inline]
    pub fn strictly_before(&self, target: impl Into<Option<Endpoint<I>>>) -> bool {
        target
            .into()
            .is_some_and(|target| self.stop < target.extent().0)
    }

    /// Returns `true` if this interval begins after `target` ends.
    #[inline]
    pub fn strictly_after(&self, target: impl Into<Option<Endpoint<I>>>) -> bool {
        target
            .into()
            .is_some_and(|target| self.start > target.extent().1)
    }

    /// The `(start, stop)` pair.
    #[inline]
    pub fn to_tuple(&self) -> (I, I) {
        (self.start, self.stop)
    }
}

impl<I: Instant> From<(I, I)> for Interval<I> {
    #[inline]
    fn from((a, b): (I, I)) -> Self {
        Interval::new(a, b)
    }
}

impl<I: Instant> From<Interval<I>> for (I, I) {
    #[inline]
    fn from(iv: Interval<I>) -> Self {
        iv.to_tuple()
    }
}

impl<I: fmt::Display> fmt::Display for Interval<I> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.stop)
    }
}
