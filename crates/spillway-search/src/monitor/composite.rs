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

//! Fan-out monitor.
//!
//! `CompositeMonitor` forwards every event to its children in insertion
//! order, so logging and custom probes can be combined without touching the
//! scheduler.

use crate::{
    config::SearchConfig,
    monitor::frontier_monitor::{FrontierMonitor, PruneReason},
    state::SearchState,
    stats::FrontierStatistics,
};
use spillway_core::num::FlowNumeric;
use spillway_model::graph::Graph;

/// A monitor that forwards every event to all of its children.
pub struct CompositeMonitor<'a, T>
where
    T: FlowNumeric,
{
    monitors: Vec<Box<dyn FrontierMonitor<T> + 'a>>,
}

impl<'a, T> Default for CompositeMonitor<'a, T>
where
    T: FlowNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeMonitor<'a, T>
where
    T: FlowNumeric,
{
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a monitor; it receives events after all previously added ones.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: FrontierMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn FrontierMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn FrontierMonitor<T> + 'a>] {
        &self.monitors
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> FromIterator<Box<dyn FrontierMonitor<T> + 'a>> for CompositeMonitor<'a, T>
where
    T: FlowNumeric,
{
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn FrontierMonitor<T> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> std::fmt::Debug for CompositeMonitor<'a, T>
where
    T: FlowNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.monitors.iter()).finish()
    }
}

impl<'a, T> FrontierMonitor<T> for CompositeMonitor<'a, T>
where
    T: FlowNumeric,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    #[inline(always)]
    fn on_enter_search(
        &mut self,
        graph: &Graph<T>,
        config: &SearchConfig,
        statistics: &FrontierStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(graph, config, statistics);
        }
    }

    #[inline(always)]
    fn on_round(&mut self, round: u64, live: &[SearchState<T>], statistics: &FrontierStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_round(round, live, statistics);
        }
    }

    #[inline(always)]
    fn on_prune(&mut self, reason: PruneReason, count: usize, statistics: &FrontierStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_prune(reason, count, statistics);
        }
    }

    #[inline(always)]
    fn on_terminal(&mut self, state: &SearchState<T>, statistics: &FrontierStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_terminal(state, statistics);
        }
    }

    #[inline(always)]
    fn on_improvement(&mut self, state: &SearchState<T>, statistics: &FrontierStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_improvement(state, statistics);
        }
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &FrontierStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }
}
