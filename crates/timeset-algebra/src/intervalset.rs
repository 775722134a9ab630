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

//! IntervalSet: sorted, disjoint intervals over any [`Instant`].
//!
//! Storage is a single flat vector of boundaries `[s0, e0, s1, e1, ...]`;
//! interval `i` lives at `2i` and `2i + 1`. Intervals are materialized on
//! demand and never stored as separate objects.
//!
//! Invariants (always held by sets built through reduction):
//!    - the boundary count is even
//!    - `s_i <= e_i`
//!    - `e_i < s_{i+1}`: touching or overlapping inputs are merged
//!
//! Complexity:
//!    - reduction: `O(n log n)`
//!    - indexed access: `O(1)`
//!    - contains: `O(n)` with early exit once the query lies before an interval

use std::fmt;
use timeset_core::{
    err::{
        EmptyCollectionError, IndexOutOfRangeError, IntervalError, InvalidArgumentError,
        InvalidArgumentKind,
    },
    instant::Instant,
    interval::{Bounds, Endpoint, Interval},
};
use tracing::trace;

/// An immutable, ordered set of non-overlapping, non-touching intervals.
///
/// # Examples
///
/// ```
/// use timeset_algebra::intervalset::IntervalSet;
/// use timeset_core::interval::Interval;
/// use timeset_core::time::TimePoint;
///
/// let iv = |a: i64, b: i64| Interval::new(TimePoint::new(a), TimePoint::new(b));
/// let set = IntervalSet::from_intervals(vec![iv(5, 7), iv(1, 3), iv(3, 4)]);
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.get(0).unwrap(), iv(1, 4));
/// assert_eq!(set.get(1).unwrap(), iv(5, 7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntervalSet<I> {
    boundaries: Vec<I>,
}

impl<I> Default for IntervalSet<I> {
    #[inline]
    fn default() -> Self {
        Self {
            boundaries: Vec::new(),
        }
    }
}

impl<I> IntervalSet<I> {
    /// Creates an empty set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of intervals in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.boundaries.len() / 2
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// The flat `[start, stop, start, stop, ...]` boundary sequence.
    #[inline]
    pub fn boundaries(&self) -> &[I] {
        &self.boundaries
    }

    #[inline]
    pub fn into_boundaries(self) -> Vec<I> {
        self.boundaries
    }
}

impl<I: Instant> IntervalSet<I> {
    /// A set holding exactly `interval`.
    #[inline]
    pub fn from_interval(interval: Interval<I>) -> Self {
        Self {
            boundaries: vec![interval.start(), interval.stop()],
        }
    }

    /// Builds a set from arbitrary intervals, sorting and merging them.
    ///
    /// Intervals that overlap or merely touch are merged into one.
    pub fn from_intervals<It>(intervals: It) -> Self
    where
        It: IntoIterator<Item = Interval<I>>,
    {
        let intervals: Vec<Interval<I>> = intervals.into_iter().collect();
        let input_len = intervals.len();
        let boundaries = Self::reduce(intervals);
        trace!(input_len, output_len = boundaries.len() / 2, "reduced intervals");
        Self { boundaries }
    }

    /// Builds a set from intervals without sorting or merging them.
    ///
    /// The caller guarantees that `intervals` are already ascending and
    /// pairwise separated; nothing is checked in release builds.
    pub fn from_intervals_unreduced<It>(intervals: It) -> Self
    where
        It: IntoIterator<Item = Interval<I>>,
    {
        let intervals = intervals.into_iter();
        let mut boundaries = Vec::with_capacity(intervals.size_hint().0 * 2);
        for interval in intervals {
            boundaries.push(interval.start());
            boundaries.push(interval.stop());
        }
        debug_assert!(Self::is_well_formed(&boundaries));
        Self { boundaries }
    }

    /// Builds a set from a flat `[start1, stop1, start2, stop2, ...]` sequence.
    ///
    /// Each pair is normalized like [`Interval::new`] and the result is reduced.
    ///
    /// # Errors
    ///
    /// [`IntervalError::InvalidArgument`] if the sequence has odd length.
    pub fn try_from_boundaries(boundaries: Vec<I>) -> Result<Self, IntervalError> {
        if boundaries.len() % 2 != 0 {
            return Err(InvalidArgumentError::new(InvalidArgumentKind::OddBoundaryCount(
                boundaries.len(),
            ))
            .into());
        }
        Ok(Self::from_intervals(
            boundaries
                .chunks_exact(2)
                .map(|pair| Interval::new(pair[0], pair[1])),
        ))
    }

    /// Wraps a boundary sequence that is already sorted and separated.
    #[inline]
    pub(crate) fn from_sorted_boundaries(boundaries: Vec<I>) -> Self {
        debug_assert!(Self::is_well_formed(&boundaries));
        Self { boundaries }
    }

    /// The interval from the first start to the last stop.
    ///
    /// # Errors
    ///
    /// [`IntervalError::EmptyCollection`] if the set is empty.
    #[inline]
    pub fn span(&self) -> Result<Interval<I>, IntervalError> {
        match (self.boundaries.first(), self.boundaries.last()) {
            (Some(&first), Some(&last)) => Ok(Interval::new(first, last)),
            _ => Err(EmptyCollectionError::new("span").into()),
        }
    }

    /// The `index`-th interval in ascending order.
    ///
    /// # Errors
    ///
    /// [`IntervalError::IndexOutOfRange`] if `index >= self.len()`.
    #[inline]
    pub fn get(&self, index: usize) -> Result<Interval<I>, IntervalError> {
        if index >= self.len() {
            return Err(IndexOutOfRangeError::new(index, self.len()).into());
        }
        Ok(Interval::new(
            self.boundaries[2 * index],
            self.boundaries[2 * index + 1],
        ))
    }

    #[inline]
    pub fn first(&self) -> Option<Interval<I>> {
        self.get(0).ok()
    }

    #[inline]
    pub fn last(&self) -> Option<Interval<I>> {
        self.len().checked_sub(1).and_then(|i| self.get(i).ok())
    }

    /// Iterates the intervals in ascending order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, I> {
        Iter {
            pairs: self.boundaries.chunks_exact(2),
        }
    }

    /// Sum of the durations of all intervals.
    pub fn total_duration(&self) -> I::Delta {
        self.iter()
            .fold(I::zero_delta(), |acc, interval| acc + interval.duration())
    }

    /// Checks whether `target` lies entirely inside one interval of the set.
    ///
    /// The scan walks the intervals in ascending order: once the target ends
    /// before the current interval starts, no later interval can hold it.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeset_algebra::intervalset::IntervalSet;
    /// use timeset_core::interval::{Bounds, Endpoint, Interval};
    /// use timeset_core::time::TimePoint;
    ///
    /// let t = TimePoint::<i64>::new;
    /// let set = IntervalSet::from_intervals(vec![
    ///     Interval::new(t(1), t(3)),
    ///     Interval::new(t(6), t(9)),
    /// ]);
    /// assert!(set.contains(Endpoint::Point(t(7)), Bounds::CLOSED_OPEN));
    /// assert!(!set.contains(Endpoint::Point(t(4)), Bounds::CLOSED_OPEN));
    /// assert!(!set.contains(Interval::new(t(2), t(7)), Bounds::CLOSED));
    /// ```
    pub fn contains(&self, target: impl Into<Option<Endpoint<I>>>, bounds: Bounds) -> bool {
        let Some(target) = target.into() else {
            return false;
        };
        for interval in self.iter() {
            if interval.strictly_after(target) {
                return false;
            }
            if interval.contains(target, bounds) {
                return true;
            }
        }
        false
    }

    /// Sorts `intervals` and merges every pair that overlaps or touches.
    ///
    /// Returns the flat boundary sequence of the merged intervals.
    fn reduce(mut intervals: Vec<Interval<I>>) -> Vec<I> {
        if intervals.is_empty() {
            return Vec::new();
        }
        intervals.sort_unstable();

        let mut write_index = 0;
        for read_index in 1..intervals.len() {
            let current = intervals[read_index];
            if current.overlaps(intervals[write_index], Bounds::CLOSED) {
                intervals[write_index] = intervals[write_index].union(&current);
            } else {
                write_index += 1;
                intervals[write_index] = current;
            }
        }
        intervals.truncate(write_index + 1);

        let mut boundaries = Vec::with_capacity(intervals.len() * 2);
        for interval in &intervals {
            boundaries.push(interval.start());
            boundaries.push(interval.stop());
        }
        debug_assert!(Self::is_well_formed(&boundaries));
        boundaries
    }

    /// Checks the storage invariants in one pass over the boundaries.
    pub(crate) fn is_well_formed(boundaries: &[I]) -> bool {
        boundaries.len() % 2 == 0
            && boundaries
                .chunks_exact(2)
                .all(|pair| pair[0] <= pair[1])
            && boundaries
                .windows(2)
                .skip(1)
                .step_by(2)
                .all(|gap| gap[0] < gap[1])
    }
}

/// Iterator over the intervals of an [`IntervalSet`], in ascending order.
#[derive(Debug, Clone)]
pub struct Iter<'a, I> {
    pairs: std::slice::ChunksExact<'a, I>,
}

impl<I: Instant> Iterator for Iter<'_, I> {
    type Item = Interval<I>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.pairs.next().map(|pair| Interval::new(pair[0], pair[1]))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pairs.size_hint()
    }
}

impl<I: Instant> DoubleEndedIterator for Iter<'_, I> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.pairs
            .next_back()
            .map(|pair| Interval::new(pair[0], pair[1]))
    }
}

impl<I: Instant> ExactSizeIterator for Iter<'_, I> {}

impl<I: Instant> std::iter::FusedIterator for Iter<'_, I> {}

impl<'a, I: Instant> IntoIterator for &'a IntervalSet<I> {
    type Item = Interval<I>;
    type IntoIter = Iter<'a, I>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<I: Instant> FromIterator<Interval<I>> for IntervalSet<I> {
    #[inline]
    fn from_iter<It: IntoIterator<Item = Interval<I>>>(iter: It) -> Self {
        Self::from_intervals(iter)
    }
}

impl<I: Instant> From<Vec<Interval<I>>> for IntervalSet<I> {
    #[inline]
    fn from(intervals: Vec<Interval<I>>) -> Self {
        Self::from_intervals(intervals)
    }
}

impl<I: Instant> From<Interval<I>> for IntervalSet<I> {
    #[inline]
    fn from(interval: Interval<I>) -> Self {
        Self::from_interval(interval)
    }
}

impl<I: Instant + fmt::Display> fmt::Display for IntervalSet<I> {
    /// Renders at most the first five intervals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SHOWN: usize = 5;
        write!(f, "[")?;
        for (i, interval) in self.iter().take(SHOWN).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", interval)?;
        }
        if self.len() > SHOWN {
            write!(f, ", ...")?;
        }
        write!(f, "]")
    }
}
