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

use crate::{
    config::SearchConfig,
    monitor::frontier_monitor::{FrontierMonitor, PruneReason},
    state::SearchState,
    stats::FrontierStatistics,
};
use spillway_core::num::FlowNumeric;
use spillway_model::graph::Graph;

/// A monitor that ignores every event.
#[repr(transparent)]
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct NoOperationMonitor<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> NoOperationMonitor<T> {
    /// Creates a new `NoOperationMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> FrontierMonitor<T> for NoOperationMonitor<T>
where
    T: FlowNumeric,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }

    #[inline(always)]
    fn on_enter_search(
        &mut self,
        _graph: &Graph<T>,
        _config: &SearchConfig,
        _statistics: &FrontierStatistics,
    ) {
    }

    #[inline(always)]
    fn on_round(&mut self, _round: u64, _live: &[SearchState<T>], _statistics: &FrontierStatistics) {
    }

    #[inline(always)]
    fn on_prune(&mut self, _reason: PruneReason, _count: usize, _statistics: &FrontierStatistics) {}

    #[inline(always)]
    fn on_terminal(&mut self, _state: &SearchState<T>, _statistics: &FrontierStatistics) {}

    #[inline(always)]
    fn on_improvement(&mut self, _state: &SearchState<T>, _statistics: &FrontierStatistics) {}

    #[inline(always)]
    fn on_exit_search(&mut self, _statistics: &FrontierStatistics) {}
}
