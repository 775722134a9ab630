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

use std::fmt::Display;

/// Why an argument to an interval operation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidArgumentKind {
    /// A negative pad larger than half the duration would invert the interval.
    NegativePadInvertsInterval,
    /// Shifting an endpoint left the representable range of the instant type.
    ShiftOverflow,
    /// A flat boundary sequence must hold start/stop pairs.
    OddBoundaryCount(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidArgumentError {
    kind: InvalidArgumentKind,
}

impl InvalidArgumentError {
    #[inline]
    pub fn new(kind: InvalidArgumentKind) -> Self {
        Self { kind }
    }

    #[inline]
    pub fn kind(&self) -> InvalidArgumentKind {
        self.kind
    }
}

impl Display for InvalidArgumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            InvalidArgumentKind::NegativePadInvertsInterval => write!(
                f,
                "Negative pad must not exceed half of the interval duration"
            ),
            InvalidArgumentKind::ShiftOverflow => {
                write!(f, "Shifting the interval left the range of the instant type")
            }
            InvalidArgumentKind::OddBoundaryCount(n) => write!(
                f,
                "Boundary sequence has odd length {}; expected start/stop pairs",
                n
            ),
        }
    }
}

impl std::error::Error for InvalidArgumentError {}

/// The start/stop discipline violation detected by a builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuilderStateKind {
    DuplicateStart,
    DuplicateStop,
    StopWithoutStart,
    MissingUpperBound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuilderStateError {
    kind: BuilderStateKind,
    pending: usize,
}

impl BuilderStateError {
    #[inline]
    pub fn new(kind: BuilderStateKind, pending: usize) -> Self {
        Self { kind, pending }
    }

    #[inline]
    pub fn kind(&self) -> BuilderStateKind {
        self.kind
    }

    /// Number of boundaries the builder held when the violation occurred.
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending
    }
}

impl Display for BuilderStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self.kind {
            BuilderStateKind::DuplicateStart => "Cannot add a second start to the builder",
            BuilderStateKind::DuplicateStop => "Cannot add a second stop to the builder",
            BuilderStateKind::StopWithoutStart => {
                "Cannot add a stop before any start when no lower bound is set"
            }
            BuilderStateKind::MissingUpperBound => {
                "Cannot close the pending start: no upper bound is set"
            }
        };
        write!(f, "{} ({} boundaries pending)", what, self.pending)
    }
}

impl std::error::Error for BuilderStateError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexOutOfRangeError {
    index: usize,
    len: usize,
}

impl IndexOutOfRangeError {
    #[inline]
    pub fn new(index: usize, len: usize) -> Self {
        Self { index, len }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }
}

impl Display for IndexOutOfRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Index {} is out of range for a set of {} intervals",
            self.index, self.len
        )
    }
}

impl std::error::Error for IndexOutOfRangeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyCollectionError {
    operation: &'static str,
}

impl EmptyCollectionError {
    #[inline]
    pub fn new(operation: &'static str) -> Self {
        Self { operation }
    }

    #[inline]
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

impl Display for EmptyCollectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Operation `{}` requires a non-empty interval set",
            self.operation
        )
    }
}

impl std::error::Error for EmptyCollectionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalError {
    InvalidArgument(InvalidArgumentError),
    InvalidState(BuilderStateError),
    IndexOutOfRange(IndexOutOfRangeError),
    EmptyCollection(EmptyCollectionError),
}

impl Display for IntervalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntervalError::InvalidArgument(e) => write!(f, "{e}"),
            IntervalError::InvalidState(e) => write!(f, "{e}"),
            IntervalError::IndexOutOfRange(e) => write!(f, "{e}"),
            IntervalError::EmptyCollection(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for IntervalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntervalError::InvalidArgument(e) => Some(e),
            IntervalError::InvalidState(e) => Some(e),
            IntervalError::IndexOutOfRange(e) => Some(e),
            IntervalError::EmptyCollection(e) => Some(e),
        }
    }
}

impl From<InvalidArgumentError> for IntervalError {
    #[inline]
    fn from(e: InvalidArgumentError) -> Self {
        IntervalError::InvalidArgument(e)
    }
}

impl From<BuilderStateError> for IntervalError {
    #[inline]
    fn from(e: BuilderStateError) -> Self {
        IntervalError::InvalidState(e)
    }
}

impl From<IndexOutOfRangeError> for IntervalError {
    #[inline]
    fn from(e: IndexOutOfRangeError) -> Self {
        IntervalError::IndexOutOfRange(e)
    }
}

impl From<EmptyCollectionError> for IntervalError {
    #[inline]
    fn from(e: EmptyCollectionError) -> Self {
        IntervalError::EmptyCollection(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_forwards_to_inner_error() {
        let e: IntervalError = IndexOutOfRangeError::new(4, 2).into();
        assert_eq!(
            format!("{}", e),
            "Index 4 is out of range for a set of 2 intervals"
        );
    }

    #[test]
    fn test_builder_error_reports_pending_count() {
        let e = BuilderStateError::new(BuilderStateKind::DuplicateStart, 3);
        assert_eq!(e.pending(), 3);
        assert!(format!("{}", e).contains("second start"));
    }

    #[test]
    fn test_source_is_the_wrapped_error() {
        let e: IntervalError = EmptyCollectionError::new("span").into();
        let src = e.source().expect("wrapped error has a source");
        assert_eq!(
            src.to_string(),
            "Operation `span` requires a non-empty interval set"
        );
    }

    #[test]
    fn test_odd_boundary_count_message() {
        let e = InvalidArgumentError::new(InvalidArgumentKind::OddBoundaryCount(3));
        assert!(format!("{}", e).contains("odd length 3"));
    }
}
