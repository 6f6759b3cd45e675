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

//! Periodic progress lines.
//!
//! `LogMonitor` writes a column table through `tracing::info!` under the
//! `spillway::search` target: a header when the search starts, one line per
//! round once `log_interval` has elapsed since the previous line, and a
//! closing summary. Install any `tracing` subscriber to see it.

use crate::{
    config::SearchConfig,
    monitor::frontier_monitor::{FrontierMonitor, PruneReason},
    state::SearchState,
    stats::FrontierStatistics,
};
use spillway_core::num::FlowNumeric;
use spillway_model::graph::Graph;
use std::time::{Duration, Instant};
use tracing::info;

const RULE_WIDTH: usize = 96;

#[derive(Debug, Clone)]
pub struct LogMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    best_value: Option<T>,
    lines_written: u64,
}

impl<T> LogMonitor<T>
where
    T: FlowNumeric,
{
    pub fn new(log_interval: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            best_value: None,
            lines_written: 0,
        }
    }

    #[inline]
    pub fn log_interval(&self) -> Duration {
        self.log_interval
    }

    /// Progress lines written since the search started, header excluded.
    #[inline]
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    #[inline(always)]
    fn log_header(&self) {
        info!(
            target: "spillway::search",
            "{:<9} | {:<6} | {:<10} | {:<10} | {:<12} | {:<14} | {:<14}",
            "Elapsed",
            "Round",
            "Live",
            "Idle",
            "Best Value",
            "Pruned (Bound)",
            "Pruned (Trunc)"
        );
        info!(target: "spillway::search", "{}", "-".repeat(RULE_WIDTH));
    }

    #[inline(always)]
    fn log_line(&mut self, round: u64, live: usize, stats: &FrontierStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best = match self.best_value {
            Some(value) => format!("{}", value),
            None => "-".to_string(),
        };

        info!(
            target: "spillway::search",
            "{:<9} | {:<6} | {:<10} | {:<10} | {:<12} | {:<14} | {:<14}",
            format!("{:.1}s", elapsed),
            round,
            live,
            stats.terminal_states,
            best,
            stats.prunings_bound,
            stats.prunings_truncated
        );

        self.last_log_time = now;
        self.lines_written = self.lines_written.saturating_add(1);
    }
}

impl<T> Default for LogMonitor<T>
where
    T: FlowNumeric,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl<T> std::fmt::Display for LogMonitor<T>
where
    T: FlowNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LogMonitor(log_interval: {:?})", self.log_interval)
    }
}

impl<T> FrontierMonitor<T> for LogMonitor<T>
where
    T: FlowNumeric,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(
        &mut self,
        graph: &Graph<T>,
        config: &SearchConfig,
        _statistics: &FrontierStatistics,
    ) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_value = None;
        self.lines_written = 0;

        info!(target: "spillway::search", "{} with {}", graph, config);
        self.log_header();
    }

    fn on_round(&mut self, round: u64, live: &[SearchState<T>], statistics: &FrontierStatistics) {
        if round == 0 || self.last_log_time.elapsed() >= self.log_interval {
            self.log_line(round, live.len(), statistics);
        }
    }

    fn on_prune(&mut self, _reason: PruneReason, _count: usize, _statistics: &FrontierStatistics) {}

    fn on_terminal(&mut self, _state: &SearchState<T>, _statistics: &FrontierStatistics) {}

    fn on_improvement(&mut self, state: &SearchState<T>, _statistics: &FrontierStatistics) {
        self.best_value = Some(state.value_so_far());
    }

    fn on_exit_search(&mut self, statistics: &FrontierStatistics) {
        info!(target: "spillway::search", "{}", "-".repeat(RULE_WIDTH));
        info!(
            target: "spillway::search",
            "Search finished after {} rounds in {:.2?}.",
            statistics.rounds,
            statistics.time_total
        );
    }
}
