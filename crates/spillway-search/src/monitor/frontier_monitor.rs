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

use crate::{config::SearchConfig, state::SearchState, stats::FrontierStatistics};
use spillway_core::num::FlowNumeric;
use spillway_model::graph::Graph;

/// Reasons for discarding live states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PruneReason {
    /// The optimistic bound fell below the incumbent. Sound.
    BoundDominated,
    /// Heuristic truncation of an oversized frontier.
    Truncated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
            PruneReason::Truncated => write!(f, "Truncated"),
        }
    }
}

/// Observes the frontier scheduler.
pub trait FrontierMonitor<T>
where
    T: FlowNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called once before the root state is classified.
    fn on_enter_search(
        &mut self,
        graph: &Graph<T>,
        config: &SearchConfig,
        statistics: &FrontierStatistics,
    );
    /// Called at the start of every round with the live set about to be
    /// pruned and expanded.
    fn on_round(&mut self, round: u64, live: &[SearchState<T>], statistics: &FrontierStatistics);
    /// Called after `count` live states were discarded in one go.
    fn on_prune(&mut self, reason: PruneReason, count: usize, statistics: &FrontierStatistics);
    /// Called when a state moves into the idle set.
    fn on_terminal(&mut self, state: &SearchState<T>, statistics: &FrontierStatistics);
    /// Called when `state` raises the incumbent to its value so far.
    fn on_improvement(&mut self, state: &SearchState<T>, statistics: &FrontierStatistics);
    /// Called once after the live set ran empty.
    fn on_exit_search(&mut self, statistics: &FrontierStatistics);
}

impl<T, M> FrontierMonitor<T> for &mut M
where
    T: FlowNumeric,
    M: FrontierMonitor<T> + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_search(
        &mut self,
        graph: &Graph<T>,
        config: &SearchConfig,
        statistics: &FrontierStatistics,
    ) {
        (**self).on_enter_search(graph, config, statistics);
    }

    #[inline(always)]
    fn on_round(&mut self, round: u64, live: &[SearchState<T>], statistics: &FrontierStatistics) {
        (**self).on_round(round, live, statistics);
    }

    #[inline(always)]
    fn on_prune(&mut self, reason: PruneReason, count: usize, statistics: &FrontierStatistics) {
        (**self).on_prune(reason, count, statistics);
    }

    #[inline(always)]
    fn on_terminal(&mut self, state: &SearchState<T>, statistics: &FrontierStatistics) {
        (**self).on_terminal(state, statistics);
    }

    #[inline(always)]
    fn on_improvement(&mut self, state: &SearchState<T>, statistics: &FrontierStatistics) {
        (**self).on_improvement(state, statistics);
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &FrontierStatistics) {
        (**self).on_exit_search(statistics);
    }
}

impl<'a, T> std::fmt::Debug for dyn FrontierMonitor<T> + 'a
where
    T: FlowNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrontierMonitor({})", self.name())
    }
}

impl<'a, T> std::fmt::Display for dyn FrontierMonitor<T> + 'a
where
    T: FlowNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrontierMonitor({})", self.name())
    }
}
