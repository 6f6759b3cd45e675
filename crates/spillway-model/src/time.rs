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

//! Discrete simulation time.
//!
//! Every travel step and every activation takes exactly one tick. Budgets,
//! elapsed counters, busy counters and distances share this unit.

/// One unit of simulated time.
pub type Tick = u32;

/// Ticks left in a run of `budget` ticks after `elapsed` ticks have passed.
///
/// ```rust
/// # use spillway_model::time::remaining_ticks;
/// assert_eq!(remaining_ticks(30, 4), 26);
/// assert_eq!(remaining_ticks(30, 31), 0);
/// ```
#[inline]
pub fn remaining_ticks(budget: Tick, elapsed: Tick) -> Tick {
    budget.saturating_sub(elapsed)
}
