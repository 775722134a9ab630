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

//! Sets of disjoint intervals and the algebra between them.
//!
//! [`IntervalSet`](intervalset::IntervalSet) is the immutable value type,
//! [`IntervalSetBuilder`](builder::IntervalSetBuilder) turns a stream of
//! start/stop events into one, and [`algebra`] holds union, intersection,
//! subtraction and complement.

pub mod algebra;
pub mod builder;
pub mod intervalset;

pub mod prelude {
    pub use crate::algebra::{complement, intersection, subtract, union};
    pub use crate::builder::{BuilderState, IntervalSetBuilder};
    pub use crate::intervalset::{IntervalSet, Iter};
    pub use timeset_core::prelude::*;
}
