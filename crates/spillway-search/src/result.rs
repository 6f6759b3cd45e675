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
    state::{OpenedRecord, SearchState},
    stats::FrontierStatistics,
};
use spillway_core::num::FlowNumeric;

/// Why the scheduler stopped.
///
/// A run always ends with an empty live set; what differs is whether
/// heuristic truncation discarded states on the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// Every live state was expanded or soundly pruned. The value is the
    /// optimum for the configured agents and budget.
    OptimalityProven,
    /// Truncation discarded `states_discarded` live states. The value is the
    /// best found, not necessarily the optimum.
    Truncated { states_discarded: u64 },
}

impl TerminationReason {
    /// Returns `true` if the reported value is guaranteed to be optimal.
    #[inline]
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::OptimalityProven)
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OptimalityProven => write!(f, "OptimalityProven"),
            Self::Truncated { states_discarded } => {
                write!(f, "Truncated(states_discarded: {})", states_discarded)
            }
        }
    }
}

/// Result of a frontier search.
#[derive(Debug, Clone)]
pub struct SearchOutcome<T> {
    value: T,
    best: SearchState<T>,
    termination_reason: TerminationReason,
    statistics: FrontierStatistics,
}

impl<T> SearchOutcome<T>
where
    T: FlowNumeric,
{
    #[inline]
    pub fn new(
        value: T,
        best: SearchState<T>,
        termination_reason: TerminationReason,
        statistics: FrontierStatistics,
    ) -> Self {
        Self {
            value,
            best,
            termination_reason,
            statistics,
        }
    }

    /// The maximum total value over all terminal states.
    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    /// The terminal state that achieved `value`.
    #[inline]
    pub fn best_state(&self) -> &SearchState<T> {
        &self.best
    }

    /// The activations of the best state, in the order they were chosen.
    #[inline]
    pub fn schedule(&self) -> &[OpenedRecord] {
        self.best.opened()
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Shorthand for `termination_reason().is_exact()`.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.termination_reason.is_exact()
    }

    #[inline]
    pub fn statistics(&self) -> &FrontierStatistics {
        &self.statistics
    }
}

impl<T> std::fmt::Display for SearchOutcome<T>
where
    T: FlowNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchOutcome(value: {}, activations: {}, termination: {})",
            self.value,
            self.best.opened().len(),
            self.termination_reason
        )
    }
}
