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

use spillway_core::num::SaturatingAddVal;
use std::time::Duration;

/// Statistics collected while the frontier scheduler runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrontierStatistics {
    /// Rounds (ticks) the live set was expanded for.
    pub rounds: u64,
    /// Live states handed to the joint step function.
    pub states_expanded: u64,
    /// Successors produced by the joint step function.
    pub successors_generated: u64,
    /// Joint actions in which an agent lost a target to a lower-index agent.
    pub collisions: u64,
    /// States retired into the idle set.
    pub terminal_states: u64,
    /// Live states retired early because every agent could only idle.
    pub stalled_states: u64,
    /// Live states discarded because their bound fell below the incumbent.
    pub prunings_bound: u64,
    /// Live states discarded by heuristic truncation.
    pub prunings_truncated: u64,
    /// Rounds in which truncation fired.
    pub truncation_events: u64,
    /// Times the incumbent value improved.
    pub improvements: u64,
    /// Largest live set seen at the start of a round.
    pub peak_frontier: u64,
    /// Total time spent in the scheduler.
    pub time_total: Duration,
}

impl FrontierStatistics {
    #[inline]
    pub fn on_round(&mut self, frontier: usize) {
        self.rounds = self.rounds.saturating_add_val(1);
        self.peak_frontier = self.peak_frontier.max(frontier as u64);
    }

    #[inline]
    pub fn on_state_expanded(&mut self) {
        self.states_expanded = self.states_expanded.saturating_add_val(1);
    }

    #[inline]
    pub fn on_successors_generated(&mut self, count: usize) {
        self.successors_generated = self.successors_generated.saturating_add_val(count as u64);
    }

    #[inline]
    pub fn on_collisions(&mut self, count: usize) {
        self.collisions = self.collisions.saturating_add_val(count as u64);
    }

    #[inline]
    pub fn on_terminal(&mut self) {
        self.terminal_states = self.terminal_states.saturating_add_val(1);
    }

    #[inline]
    pub fn on_stalled(&mut self) {
        self.stalled_states = self.stalled_states.saturating_add_val(1);
    }

    /// Records `count` states discarded by the incumbent bound.
    #[inline]
    pub fn on_pruning_bound(&mut self, count: usize) {
        self.prunings_bound = self.prunings_bound.saturating_add_val(count as u64);
    }

    /// Records one truncation that discarded `count` states.
    #[inline]
    pub fn on_truncation(&mut self, count: usize) {
        self.truncation_events = self.truncation_events.saturating_add_val(1);
        self.prunings_truncated = self.prunings_truncated.saturating_add_val(count as u64);
    }

    #[inline]
    pub fn on_improvement(&mut self) {
        self.improvements = self.improvements.saturating_add_val(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for FrontierStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Spillway Frontier Statistics:")?;
        writeln!(f, "  Rounds:                {}", self.rounds)?;
        writeln!(f, "  Peak frontier:         {}", self.peak_frontier)?;
        writeln!(f, "  States expanded:       {}", self.states_expanded)?;
        writeln!(f, "  Successors generated:  {}", self.successors_generated)?;
        writeln!(f, "  Collisions:            {}", self.collisions)?;
        writeln!(f, "  Terminal states:       {}", self.terminal_states)?;
        writeln!(f, "  Stalled states:        {}", self.stalled_states)?;
        writeln!(f, "  Prunings (bound):      {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (truncation): {}", self.prunings_truncated)?;
        writeln!(f, "  Truncation events:     {}", self.truncation_events)?;
        writeln!(f, "  Improvements:          {}", self.improvements)?;
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let mut stats = FrontierStatistics::default();
        stats.on_round(4);
        stats.on_round(9);
        stats.on_round(2);
        stats.on_successors_generated(7);
        stats.on_successors_generated(3);
        stats.on_truncation(5);
        stats.on_truncation(1);

        assert_eq!(stats.rounds, 3);
        assert_eq!(stats.peak_frontier, 9);
        assert_eq!(stats.successors_generated, 10);
        assert_eq!(stats.truncation_events, 2);
        assert_eq!(stats.prunings_truncated, 6);
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = FrontierStatistics {
            prunings_bound: u64::MAX - 1,
            ..Default::default()
        };
        stats.on_pruning_bound(10);
        assert_eq!(stats.prunings_bound, u64::MAX);
    }

    #[test]
    fn test_display_lists_every_counter() {
        let stats = FrontierStatistics::default();
        let text = format!("{}", stats);
        assert!(text.starts_with("Spillway Frontier Statistics:"));
        assert!(text.contains("Prunings (truncation): 0"));
        assert_eq!(text.lines().count(), 13);
    }
}
