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

//! Reduction of the idle set to the best achievable value.
//!
//! Every terminal state's total value is recomputed from its activation
//! records rather than read from the cache. Ties resolve to the earliest
//! state in idle-set order, for the sequential and the parallel reduction
//! alike.

use crate::{error::EmptyTerminalSetError, state::SearchState};
use rayon::prelude::*;
use spillway_core::num::FlowNumeric;
use spillway_model::graph::Graph;

/// The best terminal state and its value.
#[derive(Debug, Clone, Copy)]
pub struct Aggregate<'s, T> {
    value: T,
    index: usize,
    state: &'s SearchState<T>,
}

impl<'s, T> Aggregate<'s, T>
where
    T: FlowNumeric,
{
    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    /// Position of the best state in the aggregated slice.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn state(&self) -> &'s SearchState<T> {
        self.state
    }
}

/// Higher value wins; equal values go to the lower index.
#[inline(always)]
fn better<T: Ord>(a: (T, usize), b: (T, usize)) -> (T, usize) {
    if b.0 > a.0 || (b.0 == a.0 && b.1 < a.1) {
        b
    } else {
        a
    }
}

/// Reduces terminal states to their maximum total value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResultAggregator {
    parallel: bool,
}

impl ResultAggregator {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the reduction on the rayon pool when enabled.
    #[inline]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the best state of `terminal`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTerminalSetError` if `terminal` is empty.
    pub fn aggregate<'s, T>(
        &self,
        terminal: &'s [SearchState<T>],
        graph: &Graph<T>,
    ) -> Result<Aggregate<'s, T>, EmptyTerminalSetError>
    where
        T: FlowNumeric,
    {
        let best = if self.parallel {
            terminal
                .par_iter()
                .enumerate()
                .map(|(index, state)| (state.total_value(graph), index))
                .reduce_with(better)
        } else {
            terminal
                .iter()
                .enumerate()
                .map(|(index, state)| (state.total_value(graph), index))
                .reduce(better)
        };

        let (value, index) = best.ok_or(EmptyTerminalSetError)?;
        Ok(Aggregate {
            value,
            index,
            state: &terminal[index],
        })
    }

    /// Returns only the maximum total value of `terminal`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTerminalSetError` if `terminal` is empty.
    #[inline]
    pub fn max_value<T>(
        &self,
        terminal: &[SearchState<T>],
        graph: &Graph<T>,
    ) -> Result<T, EmptyTerminalSetError>
    where
        T: FlowNumeric,
    {
        self.aggregate(terminal, graph).map(|best| best.value())
    }

    /// Returns the `k` best states of `terminal`, best first; equal values
    /// keep idle-set order.
    pub fn top_k<'s, T>(
        &self,
        terminal: &'s [SearchState<T>],
        graph: &Graph<T>,
        k: usize,
    ) -> Vec<Aggregate<'s, T>>
    where
        T: FlowNumeric,
    {
        let mut ranked: Vec<Aggregate<'s, T>> = if self.parallel {
            terminal
                .par_iter()
                .enumerate()
                .map(|(index, state)| Aggregate {
                    value: state.total_value(graph),
                    index,
                    state,
                })
                .collect()
        } else {
            terminal
                .iter()
                .enumerate()
                .map(|(index, state)| Aggregate {
                    value: state.total_value(graph),
                    index,
                    state,
                })
                .collect()
        };

        ranked.sort_by(|a, b| b.value.cmp(&a.value));
        ranked.truncate(k);
        ranked
    }
}
