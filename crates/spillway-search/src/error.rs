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

//! Errors raised before a search starts.
//!
//! Configuration problems are rejected by `SearchConfig::validate` before
//! any `SearchState` is created. Invariant violations inside a running
//! search are assertions, not variants of these types.

use spillway_model::index::NodeIndex;
use thiserror::Error;

/// The time budget or the agent count cannot describe a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidBudgetError {
    /// A budget of zero ticks leaves nothing to schedule.
    #[error("the time budget must be at least one tick")]
    ZeroBudget,
    /// A search needs at least one agent.
    #[error("at least one agent is required")]
    ZeroAgents,
}

/// The truncation parameters of a `PruningPolicy` are out of range.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidPruningError {
    /// The keep ratio must lie in `(0, 1]`.
    #[error("keep ratio must lie in (0, 1], got {0}")]
    KeepRatio(f64),
    /// Truncating a frontier of size zero is meaningless.
    #[error("truncation threshold must be positive")]
    ZeroThreshold,
}

/// A search rejected its inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error(transparent)]
    InvalidBudget(#[from] InvalidBudgetError),
    #[error(transparent)]
    InvalidPruning(#[from] InvalidPruningError),
    /// The distance table was built for a different graph.
    #[error("distance table has no row for {0}; it was built for a different graph")]
    ForeignDistanceTable(NodeIndex),
}

/// The result aggregator was handed no terminal states.
///
/// A scheduler run always retires at least one state, so seeing this from a
/// run is a logic error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot aggregate an empty set of terminal states")]
pub struct EmptyTerminalSetError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_errors_convert_into_search_error() {
        let err: SearchError = InvalidBudgetError::ZeroAgents.into();
        assert_eq!(err, SearchError::InvalidBudget(InvalidBudgetError::ZeroAgents));
        assert_eq!(err.to_string(), "at least one agent is required");
    }

    #[test]
    fn test_pruning_error_message_contains_ratio() {
        let err: SearchError = InvalidPruningError::KeepRatio(1.5).into();
        assert_eq!(err.to_string(), "keep ratio must lie in (0, 1], got 1.5");
    }

    #[test]
    fn test_foreign_table_message_names_node() {
        let err = SearchError::ForeignDistanceTable(NodeIndex::new(9));
        assert!(err.to_string().contains("NodeIndex(9)"));
    }
}
