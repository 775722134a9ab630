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

//! Incremental construction of an [`IntervalSet`] from start/stop events.
//!
//! The builder is a two-state machine. In [`BuilderState::AwaitingStart`]
//! only a start is accepted; in [`BuilderState::AwaitingStop`] only a stop.
//! One extra transition exists: a stop arriving while nothing has been
//! recorded yet first records the lower bound as the start, provided a
//! lower bound was configured. A start still open at build time is closed
//! at the upper bound.

use crate::intervalset::IntervalSet;
use timeset_core::{
    err::{BuilderStateError, BuilderStateKind, IntervalError},
    instant::Instant,
    interval::Interval,
};
use tracing::{debug, trace};

/// What the builder expects to receive next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuilderState {
    /// No interval is open; the next event should be a start.
    AwaitingStart,
    /// A start is pending and waits for its stop.
    AwaitingStop,
}

/// Accumulates alternating start/stop events into an [`IntervalSet`].
///
/// The optional `lower` bound stands in for a start that happened before
/// the first recorded event: a stop arriving at an empty builder opens the
/// interval at `lower`. The optional `upper` bound closes an interval that
/// is still open when [`build`](Self::build) is called.
///
/// # Examples
///
/// ```
/// use timeset_algebra::builder::IntervalSetBuilder;
/// use timeset_core::interval::Interval;
/// use timeset_core::time::TimePoint;
///
/// let t = TimePoint::<i64>::new;
/// let mut builder = IntervalSetBuilder::new(Some(t(0)), Some(t(10)));
/// builder.add_stop(t(2)).unwrap();
/// builder.add_start(t(6)).unwrap();
///
/// let set = builder.build().unwrap();
/// let got: Vec<_> = set.iter().collect();
/// assert_eq!(got, vec![Interval::new(t(0), t(2)), Interval::new(t(6), t(10))]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalSetBuilder<I> {
    lower: Option<I>,
    upper: Option<I>,
    boundaries: Vec<I>,
}

impl<I: Instant> Default for IntervalSetBuilder<I> {
    #[inline]
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<I: Instant> IntervalSetBuilder<I> {
    #[inline]
    pub fn new(lower: Option<I>, upper: Option<I>) -> Self {
        Self {
            lower,
            upper,
            boundaries: Vec::new(),
        }
    }

    /// A builder without bounds: every interval needs an explicit start and stop.
    #[inline]
    pub fn unbounded() -> Self {
        Self::new(None, None)
    }

    #[inline]
    pub fn lower(&self) -> Option<I> {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> Option<I> {
        self.upper
    }

    #[inline]
    pub fn state(&self) -> BuilderState {
        if self.boundaries.len() % 2 == 0 {
            BuilderState::AwaitingStart
        } else {
            BuilderState::AwaitingStop
        }
    }

    /// True while no event has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Opens an interval at `t`.
    ///
    /// # Errors
    ///
    /// [`IntervalError::InvalidState`] if a start is already pending.
    pub fn add_start(&mut self, t: I) -> Result<(), IntervalError> {
        if self.state() == BuilderState::AwaitingStop {
            debug!(pending = self.boundaries.len(), "rejected duplicate start");
            return Err(
                BuilderStateError::new(BuilderStateKind::DuplicateStart, self.boundaries.len())
                    .into(),
            );
        }
        trace!(?t, "start");
        self.boundaries.push(t);
        Ok(())
    }

    /// Closes the pending interval at `t`.
    ///
    /// On an empty builder with a lower bound, the lower bound is recorded as
    /// the start first.
    ///
    /// # Errors
    ///
    /// [`IntervalError::InvalidState`] if no start is pending and none can be
    /// seeded from the lower bound.
    pub fn add_stop(&mut self, t: I) -> Result<(), IntervalError> {
        if let (true, Some(lower)) = (self.boundaries.is_empty(), self.lower) {
            debug!(?lower, "seeding from lower bound");
            self.boundaries.push(lower);
        }
        if self.state() == BuilderState::AwaitingStart {
            let kind = if self.boundaries.is_empty() {
                BuilderStateKind::StopWithoutStart
            } else {
                BuilderStateKind::DuplicateStop
            };
            debug!(?kind, pending = self.boundaries.len(), "rejected stop");
            return Err(BuilderStateError::new(kind, self.boundaries.len()).into());
        }
        trace!(?t, "stop");
        self.boundaries.push(t);
        Ok(())
    }

    /// Pairs the recorded events into intervals and reduces them.
    ///
    /// A start still pending is closed at the upper bound. The builder is
    /// left untouched, so later events can be added and built again.
    ///
    /// # Errors
    ///
    /// [`IntervalError::InvalidState`] if a start is pending and no upper
    /// bound was configured.
    pub fn build(&self) -> Result<IntervalSet<I>, IntervalError> {
        let mut boundaries = self.boundaries.clone();
        if self.state() == BuilderState::AwaitingStop {
            match self.upper {
                Some(upper) => boundaries.push(upper),
                None => {
                    return Err(BuilderStateError::new(
                        BuilderStateKind::MissingUpperBound,
                        self.boundaries.len(),
                    )
                    .into());
                }
            }
        }
        let intervals: Vec<Interval<I>> = boundaries
            .chunks_exact(2)
            .map(|pair| Interval::new(pair[0], pair[1]))
            .collect();
        debug!(intervals = intervals.len(), "building interval set");
        Ok(IntervalSet::from_intervals(intervals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use timeset_core::time::TimePoint;

    type BuilderI = IntervalSetBuilder<TimePoint<i64>>;

    #[inline]
    fn t(v: i64) -> TimePoint<i64> {
        TimePoint::new(v)
    }

    #[inline]
    fn iv(a: i64, b: i64) -> Interval<TimePoint<i64>> {
        Interval::new(t(a), t(b))
    }

    fn kind_of(err: IntervalError) -> BuilderStateKind {
        match err {
            IntervalError::InvalidState(e) => e.kind(),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn starts_empty_awaiting_start() {
        let b = BuilderI::unbounded();
        assert!(b.is_empty());
        assert_eq!(b.state(), BuilderState::AwaitingStart);
        assert!(b.build().unwrap().is_empty());
    }

    #[test]
    fn explicit_pairs() {
        let mut b = BuilderI::unbounded();
        b.add_start(t(1)).unwrap();
        assert_eq!(b.state(), BuilderState::AwaitingStop);
        b.add_stop(t(3)).unwrap();
        b.add_start(t(5)).unwrap();
        b.add_stop(t(8)).unwrap();
        let got: Vec<_> = b.build().unwrap().iter().collect();
        assert_eq!(got, vec![iv(1, 3), iv(5, 8)]);
    }

    #[test]
    fn duplicate_start_is_rejected() {
        let mut b = BuilderI::unbounded();
        b.add_start(t(1)).unwrap();
        let err = b.add_start(t(2)).unwrap_err();
        assert_eq!(kind_of(err), BuilderStateKind::DuplicateStart);
        assert_eq!(
            err,
            IntervalError::InvalidState(BuilderStateError::new(
                BuilderStateKind::DuplicateStart,
                1
            ))
        );
    }

    #[test]
    fn duplicate_stop_is_rejected() {
        let mut b = BuilderI::unbounded();
        b.add_start(t(1)).unwrap();
        b.add_stop(t(2)).unwrap();
        let err = b.add_stop(t(3)).unwrap_err();
        assert_eq!(kind_of(err), BuilderStateKind::DuplicateStop);
    }

    #[test]
    fn stop_without_start_or_lower_bound_is_rejected() {
        let mut b = BuilderI::new(None, Some(t(10)));
        let err = b.add_stop(t(3)).unwrap_err();
        assert_eq!(kind_of(err), BuilderStateKind::StopWithoutStart);
        assert!(b.is_empty());
    }

    #[test]
    fn lower_bound_seeds_only_the_first_stop() {
        let mut b = BuilderI::new(Some(t(0)), None);
        b.add_stop(t(2)).unwrap();
        let err = b.add_stop(t(4)).unwrap_err();
        assert_eq!(kind_of(err), BuilderStateKind::DuplicateStop);
        let got: Vec<_> = b.build().unwrap().iter().collect();
        assert_eq!(got, vec![iv(0, 2)]);
    }

    #[test]
    fn pending_start_closed_by_upper_bound() {
        let mut b = BuilderI::new(None, Some(t(9)));
        b.add_start(t(4)).unwrap();
        let got: Vec<_> = b.build().unwrap().iter().collect();
        assert_eq!(got, vec![iv(4, 9)]);
    }

    #[test]
    fn pending_start_without_upper_bound_is_rejected() {
        let mut b = BuilderI::unbounded();
        b.add_start(t(4)).unwrap();
        let err = b.build().unwrap_err();
        assert_eq!(kind_of(err), BuilderStateKind::MissingUpperBound);
    }

    #[test]
    fn build_is_repeatable() {
        let mut b = BuilderI::new(None, Some(t(20)));
        b.add_start(t(1)).unwrap();
        let first = b.build().unwrap();
        assert_eq!(first.iter().collect::<Vec<_>>(), vec![iv(1, 20)]);

        b.add_stop(t(5)).unwrap();
        let second = b.build().unwrap();
        assert_eq!(second.iter().collect::<Vec<_>>(), vec![iv(1, 5)]);
        assert_eq!(b.build().unwrap(), second);
    }

    #[test]
    fn out_of_order_events_are_normalized_and_reduced() {
        let mut b = BuilderI::unbounded();
        b.add_start(t(6)).unwrap();
        b.add_stop(t(2)).unwrap();
        b.add_start(t(5)).unwrap();
        b.add_stop(t(9)).unwrap();
        let got: Vec<_> = b.build().unwrap().iter().collect();
        assert_eq!(got, vec![iv(2, 9)]);
    }

    #[test]
    fn bounded_scenario_keeps_trailing_zero_length_interval() {
        let mut b = BuilderI::new(Some(t(15)), Some(t(20)));
        b.add_stop(t(16)).unwrap();
        b.add_start(t(17)).unwrap();
        b.add_stop(t(18)).unwrap();
        b.add_start(t(20)).unwrap();
        let got: Vec<_> = b.build().unwrap().iter().collect();
        assert_eq!(got, vec![iv(15, 16), iv(17, 18), iv(20, 20)]);
    }

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 13, minute, 0).unwrap()
    }

    #[test]
    fn bounded_scenario_with_wall_clock_instants() {
        let mut b = IntervalSetBuilder::new(Some(at(15)), Some(at(20)));
        b.add_stop(at(16)).unwrap();
        b.add_start(at(17)).unwrap();
        b.add_stop(at(18)).unwrap();
        b.add_start(at(20)).unwrap();
        let set = b.build().unwrap();
        let got: Vec<_> = set.iter().map(|i| i.to_tuple()).collect();
        assert_eq!(
            got,
            vec![(at(15), at(16)), (at(17), at(18)), (at(20), at(20))]
        );
    }
}
