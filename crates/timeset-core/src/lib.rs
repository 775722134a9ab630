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

//! Value types for the time-interval algebra: the [`Instant`](instant::Instant)
//! contract, integer instants, [`Interval`](interval::Interval) and the shared
//! error taxonomy.

pub mod err;
pub mod instant;
pub mod interval;
pub mod time;

pub mod prelude {
    pub use crate::err::{
        BuilderStateError, BuilderStateKind, EmptyCollectionError, IndexOutOfRangeError,
        IntervalError, InvalidArgumentError, InvalidArgumentKind,
    };
    pub use crate::instant::Instant;
    pub use crate::interval::{Bounds, Endpoint, Interval};
    pub use crate::time::{TimeDelta, TimeInterval, TimePoint};
}
