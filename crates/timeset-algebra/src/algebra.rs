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

//! Set algebra over [`IntervalSet`]s.
//!
//! Every operation returns a new set and leaves its inputs untouched.
//! Results satisfy the same invariants as sets built by reduction:
//! ascending, non-overlapping, non-touching intervals.

use crate::intervalset::IntervalSet;
use std::ops::{BitAnd, BitOr, BitXor, Not, Sub};
use timeset_core::{
    err::{EmptyCollectionError, IntervalError},
    instant::Instant,
    interval::{Bounds, Endpoint, Interval},
};
use tracing::instrument;

/// Every instant covered by `a` or `b`.
///
/// # Examples
///
/// ```
/// use timeset_algebra::{algebra, intervalset::IntervalSet};
/// use timeset_core::interval::Interval;
/// use timeset_core::time::TimePoint;
///
/// let iv = |a: i64, b: i64| Interval::new(TimePoint::new(a), TimePoint::new(b));
/// let a = IntervalSet::from_interval(iv(15, 17));
/// let b = IntervalSet::from_interval(iv(16, 18));
/// assert_eq!(algebra::union(&a, &b).iter().collect::<Vec<_>>(), vec![iv(15, 18)]);
/// ```
#[instrument(level = "trace", skip_all, fields(lhs = a.len(), rhs = b.len()))]
pub fn union<I: Instant>(a: &IntervalSet<I>, b: &IntervalSet<I>) -> IntervalSet<I> {
    if a.is_empty() {
        return b.clone();
    }
    if b.is_empty() {
        return a.clone();
    }
    IntervalSet::from_intervals(a.iter().chain(b.iter()))
}

/// Instants covered by both `a` and `b`.
///
/// Pieces where the two sets only touch at a single instant are kept as
/// zero-length intervals when `allow_zero_length` is set, and dropped
/// otherwise.
///
/// # Examples
///
/// ```
/// use timeset_algebra::{algebra, intervalset::IntervalSet};
/// use timeset_core::interval::Interval;
/// use timeset_core::time::TimePoint;
///
/// let iv = |a: i64, b: i64| Interval::new(TimePoint::new(a), TimePoint::new(b));
/// let a = IntervalSet::from_intervals(vec![iv(0, 2), iv(4, 6)]);
/// let b = IntervalSet::from_interval(iv(2, 5));
///
/// let strict = algebra::intersection(&a, &b, false);
/// assert_eq!(strict.iter().collect::<Vec<_>>(), vec![iv(4, 5)]);
///
/// let touching = algebra::intersection(&a, &b, true);
/// assert_eq!(touching.iter().collect::<Vec<_>>(), vec![iv(2, 2), iv(4, 5)]);
/// ```
#[instrument(level = "trace", skip_all, fields(lhs = a.len(), rhs = b.len(), allow_zero_length = allow_zero_length))]
pub fn intersection<I: Instant>(
    a: &IntervalSet<I>,
    b: &IntervalSet<I>,
    allow_zero_length: bool,
) -> IntervalSet<I> {
    if a.is_empty() || b.is_empty() {
        return IntervalSet::new();
    }

    let lhs: Vec<Interval<I>> = a.iter().collect();
    let rhs: Vec<Interval<I>> = b.iter().collect();
    let mut boundaries = Vec::with_capacity(2 * (lhs.len() + rhs.len()));
    let (mut i, mut j) = (0, 0);
    while i < lhs.len() && j < rhs.len() {
        let (x, y) = (lhs[i], rhs[j]);
        if let Some(piece) = x.intersect(&y, allow_zero_length) {
            boundaries.push(piece.start());
            boundaries.push(piece.stop());
        }
        if x.stop() < y.stop() {
            i += 1;
        } else {
            j += 1;
        }
    }
    IntervalSet::from_sorted_boundaries(boundaries)
}

/// Instants covered by `a` but not by `b`.
///
/// Equivalent to `a ∩ complement(a ∩ b, a.span())`: the overlap with `b` is
/// cut out of each interval of `a`, and gaps already present in `a` stay
/// gaps. A zero-length interval of `a` is removed when `b` covers its
/// instant.
///
/// # Examples
///
/// ```
/// use timeset_algebra::{algebra, intervalset::IntervalSet};
/// use timeset_core::interval::Interval;
/// use timeset_core::time::TimePoint;
///
/// let iv = |a: i64, b: i64| Interval::new(TimePoint::new(a), TimePoint::new(b));
/// let a = IntervalSet::from_intervals(vec![iv(0, 4), iv(6, 10)]);
/// let b = IntervalSet::from_interval(iv(3, 7));
/// assert_eq!(
///     algebra::subtract(&a, &b).iter().collect::<Vec<_>>(),
///     vec![iv(0, 3), iv(7, 10)]
/// );
/// ```
#[instrument(level = "trace", skip_all, fields(lhs = a.len(), rhs = b.len()))]
pub fn subtract<I: Instant>(a: &IntervalSet<I>, b: &IntervalSet<I>) -> IntervalSet<I> {
    if a.is_empty() {
        return IntervalSet::new();
    }
    if b.is_empty() {
        return a.clone();
    }

    let holes: Vec<Interval<I>> = intersection(a, b, false).iter().collect();
    let mut boundaries = Vec::with_capacity(a.boundaries().len() + 2 * holes.len());
    let mut j = 0;
    for interval in a.iter() {
        if interval.is_degenerate() {
            if !b.contains(Endpoint::Point(interval.start()), Bounds::CLOSED) {
                boundaries.push(interval.start());
                boundaries.push(interval.stop());
            }
            continue;
        }

        // Holes are ordered and each lies inside exactly one interval of `a`.
        let mut cursor = interval.start();
        while j < holes.len() && holes[j].start() < interval.stop() {
            let hole = holes[j];
            if hole.start() > cursor {
                boundaries.push(cursor);
                boundaries.push(hole.start());
            }
            cursor = hole.stop();
            j += 1;
        }
        if cursor < interval.stop() {
            boundaries.push(cursor);
            boundaries.push(interval.stop());
        }
    }
    IntervalSet::from_sorted_boundaries(boundaries)
}

/// The gaps of `set` within `span`.
///
/// `span` defaults to `set.span()`. Intervals of `set` straddling the edges
/// of `span` are clipped to it, and gaps of zero length are never emitted:
/// a set consisting of a single instant inside `span` yields `span` itself,
/// and a zero-length `span` always yields the empty set.
///
/// # Errors
///
/// [`IntervalError::EmptyCollection`] if `set` is empty and no `span` is given.
///
/// # Examples
///
/// ```
/// use timeset_algebra::{algebra, intervalset::IntervalSet};
/// use timeset_core::interval::Interval;
/// use timeset_core::time::TimePoint;
///
/// let iv = |a: i64, b: i64| Interval::new(TimePoint::new(a), TimePoint::new(b));
/// let s = IntervalSet::from_intervals(vec![iv(16, 17), iv(18, 19)]);
///
/// let inner = algebra::complement(&s, None).unwrap();
/// assert_eq!(inner.iter().collect::<Vec<_>>(), vec![iv(17, 18)]);
///
/// let outer = algebra::complement(&s, Some(iv(15, 20))).unwrap();
/// assert_eq!(
///     outer.iter().collect::<Vec<_>>(),
///     vec![iv(15, 16), iv(17, 18), iv(19, 20)]
/// );
/// ```
#[instrument(level = "trace", skip_all, fields(len = set.len(), explicit_span = span.is_some()))]
pub fn complement<I: Instant>(
    set: &IntervalSet<I>,
    span: Option<Interval<I>>,
) -> Result<IntervalSet<I>, IntervalError> {
    let span = match span {
        Some(span) => span,
        None if set.is_empty() => return Err(EmptyCollectionError::new("complement").into()),
        None => set.span()?,
    };
    if span.is_degenerate() {
        return Ok(IntervalSet::new());
    }
    if set.is_empty() {
        return Ok(IntervalSet::from_interval(span));
    }

    let mut boundaries: Vec<I> = Vec::with_capacity(set.boundaries().len() + 2);
    let mut cursor = span.start();
    for interval in set.iter() {
        if interval.stop() < span.start() {
            continue;
        }
        if interval.start() > span.stop() || cursor >= span.stop() {
            break;
        }
        if interval.start() > cursor {
            push_gap(&mut boundaries, cursor, interval.start());
        }
        cursor = cursor.max(interval.stop());
    }
    if cursor < span.stop() {
        push_gap(&mut boundaries, cursor, span.stop());
    }
    Ok(IntervalSet::from_sorted_boundaries(boundaries))
}

/// Appends `[start, stop]`, extending the previous gap when the two touch.
///
/// Gaps only touch across a zero-length interval of the input.
#[inline]
fn push_gap<I: Instant>(boundaries: &mut Vec<I>, start: I, stop: I) {
    match boundaries.last_mut() {
        Some(last) if *last == start => *last = stop,
        _ => {
            boundaries.push(start);
            boundaries.push(stop);
        }
    }
}

impl<I: Instant> IntervalSet<I> {
    /// See [`union`].
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        union(self, other)
    }

    /// See [`intersection`].
    #[inline]
    pub fn intersection(&self, other: &Self, allow_zero_length: bool) -> Self {
        intersection(self, other, allow_zero_length)
    }

    /// See [`subtract`].
    #[inline]
    pub fn subtract(&self, other: &Self) -> Self {
        subtract(self, other)
    }

    /// See [`complement`].
    #[inline]
    pub fn complement(&self, span: Option<Interval<I>>) -> Result<Self, IntervalError> {
        complement(self, span)
    }
}

impl<I: Instant> BitOr for &IntervalSet<I> {
    type Output = IntervalSet<I>;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        union(self, rhs)
    }
}

impl<I: Instant> BitAnd for &IntervalSet<I> {
    type Output = IntervalSet<I>;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        intersection(self, rhs, false)
    }
}

impl<I: Instant> Sub for &IntervalSet<I> {
    type Output = IntervalSet<I>;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        subtract(self, rhs)
    }
}

/// `!&set` is the complement of `set` within its own span.
impl<I: Instant> Not for &IntervalSet<I> {
    type Output = Result<IntervalSet<I>, IntervalError>;

    #[inline]
    fn not(self) -> Self::Output {
        complement(self, None)
    }
}

/// `&set ^ span` is the complement of `set` within `span`.
impl<I: Instant> BitXor<Interval<I>> for &IntervalSet<I> {
    type Output = Result<IntervalSet<I>, IntervalError>;

    #[inline]
    fn bitxor(self, span: Interval<I>) -> Self::Output {
        complement(self, Some(span))
    }
}
