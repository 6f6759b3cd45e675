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

//! Scores for ranking and pruning live states.
//!
//! The value so far is a lower bound on every terminal state reachable
//! from a state: contributions are never revoked. The optimistic projection
//! is an upper bound: it pretends every remaining candidate is activated by
//! whichever agent could get there first, all at once and without blocking
//! each other.

use crate::state::SearchState;
use spillway_core::num::FlowNumeric;
use spillway_model::{
    distance::DistanceTable,
    graph::Graph,
    index::NodeIndex,
    time::{Tick, remaining_ticks},
};

/// How truncation ranks live states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Ranking {
    /// Rank by the value already secured.
    ValueSoFar,
    /// Rank by `optimistic_bound`.
    #[default]
    OptimisticProjection,
}

impl Ranking {
    /// Scores `state`; higher is better.
    #[inline]
    pub fn score<T>(&self, state: &SearchState<T>, graph: &Graph<T>, distances: &DistanceTable) -> T
    where
        T: FlowNumeric,
    {
        match self {
            Self::ValueSoFar => state.value_so_far(),
            Self::OptimisticProjection => optimistic_bound(state, graph, distances),
        }
    }
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValueSoFar => write!(f, "ValueSoFar"),
            Self::OptimisticProjection => write!(f, "OptimisticProjection"),
        }
    }
}

/// Earliest tick at which any agent of `state` could have `target` active.
///
/// Returns `None` if no agent has a known distance to `target`.
#[inline]
pub fn earliest_activation<T>(
    state: &SearchState<T>,
    target: NodeIndex,
    distances: &DistanceTable,
) -> Option<Tick>
where
    T: FlowNumeric,
{
    state
        .agents()
        .iter()
        .filter_map(|agent| {
            let distance = distances.get(agent.position(), target)?;
            Some(agent.busy().saturating_add(distance).saturating_add(1))
        })
        .min()
        .map(|delay| state.elapsed().saturating_add(delay))
}

/// An admissible upper bound on the value of any terminal state reachable
/// from `state`.
///
/// `value_so_far + Σ rate(t) × max(0, budget − earliest(t))` over the
/// remaining candidates `t`.
///
/// # Examples
///
/// ```rust
/// # use spillway_model::{graph::GraphBuilder, distance::DistanceTable};
/// # use spillway_search::{bound::optimistic_bound, config::SearchConfig, state::SearchState};
/// let mut builder = GraphBuilder::<u64>::new();
/// builder
///     .add_node("S", 0, ["A"])
///     .add_node("A", 10, ["B"])
///     .add_node("B", 20, Vec::<String>::new())
///     .set_start("S");
/// let graph = builder.build().unwrap();
/// let table = DistanceTable::new(&graph).unwrap();
///
/// let root = SearchState::initial(&graph, &SearchConfig::new().with_budget(5)).unwrap();
/// // A could be active from tick 2, B from tick 3.
/// assert_eq!(optimistic_bound(&root, &graph, &table), 10 * 3 + 20 * 2);
/// ```
pub fn optimistic_bound<T>(state: &SearchState<T>, graph: &Graph<T>, distances: &DistanceTable) -> T
where
    T: FlowNumeric,
{
    state
        .candidate_nodes()
        .fold(state.value_so_far(), |acc, target| {
            match earliest_activation(state, target, distances) {
                Some(tick) => acc.saturating_add_val(T::contribution(
                    graph.rate(target),
                    remaining_ticks(state.budget(), tick),
                )),
                None => acc,
            }
        })
}
