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

//! The joint step: one tick of every agent at once.
//!
//! Every combination of the per-agent action sets yields exactly one
//! successor. Combinations are enumerated odometer style with the last agent
//! varying fastest, so the successor order is deterministic.
//!
//! When several agents claim the same target in one combination only the
//! lowest-index agent activates it; the others stand still for the tick.
//! A node is therefore activated at most once in any state.

use crate::{
    action::{ActionSet, AgentAction},
    state::SearchState,
};
use smallvec::{SmallVec, smallvec};
use spillway_core::num::FlowNumeric;
use spillway_model::{
    graph::Graph,
    index::{AgentIndex, NodeIndex},
};

/// Counters of one call to `joint_successors`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepSummary {
    /// Successors appended to the output.
    pub generated: usize,
    /// Combinations in which at least one claim lost a target tie-break.
    pub collisions: usize,
}

/// Number of combinations of `action_sets`, saturating.
#[inline]
pub fn num_combinations(action_sets: &[ActionSet]) -> usize {
    action_sets
        .iter()
        .fold(1usize, |acc, set| acc.saturating_mul(set.len()))
}

/// Appends the successors of `state` for every combination of
/// `action_sets` to `out`.
///
/// `action_sets[i]` must be the action set of agent `i` and must not be
/// empty.
///
/// # Panics
///
/// Panics in debug builds if the number of action sets differs from the
/// number of agents or if an action set is empty.
pub fn joint_successors<T>(
    state: &SearchState<T>,
    action_sets: &[ActionSet],
    graph: &Graph<T>,
    out: &mut Vec<SearchState<T>>,
) -> StepSummary
where
    T: FlowNumeric,
{
    debug_assert_eq!(
        action_sets.len(),
        state.num_agents(),
        "called `joint_successors` with {} action sets for {} agents",
        action_sets.len(),
        state.num_agents()
    );
    debug_assert!(
        action_sets.iter().all(|set| !set.is_empty()),
        "called `joint_successors` with an empty action set"
    );

    let mut summary = StepSummary::default();
    let mut cursor: SmallVec<[usize; 2]> = smallvec![0; action_sets.len()];
    let mut claimed: SmallVec<[NodeIndex; 2]> = SmallVec::new();

    out.reserve(num_combinations(action_sets));

    loop {
        let mut next = state.clone();
        let mut collided = false;
        claimed.clear();

        for (agent, (set, &choice)) in action_sets.iter().zip(cursor.iter()).enumerate() {
            let agent = AgentIndex::new(agent);
            match set[choice] {
                AgentAction::Wait => next.wait(agent),
                AgentAction::Idle => {}
                AgentAction::MoveAndActivate { target, cost } => {
                    if claimed.contains(&target) {
                        collided = true;
                        continue;
                    }
                    claimed.push(target);
                    next.activate(agent, target, cost, graph.rate(target));
                }
            }
        }

        next.advance();
        out.push(next);
        summary.generated += 1;
        if collided {
            summary.collisions += 1;
        }

        if !advance_cursor(&mut cursor, action_sets) {
            break;
        }
    }

    summary
}

/// Steps the odometer; returns `false` once every combination was visited.
#[inline]
fn advance_cursor(cursor: &mut [usize], action_sets: &[ActionSet]) -> bool {
    for (digit, set) in cursor.iter_mut().zip(action_sets.iter()).rev() {
        *digit += 1;
        if *digit < set.len() {
            return true;
        }
        *digit = 0;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        action::enumerate_joint_actions,
        config::SearchConfig,
        testing::{distances, fork_graph, line_graph, valve_network},
    };
    use spillway_model::{graph::GraphBuilder, index::AgentIndex};

    fn ni(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn expand<T: FlowNumeric>(
        state: &SearchState<T>,
        graph: &Graph<T>,
        table: &spillway_model::distance::DistanceTable,
    ) -> (Vec<SearchState<T>>, StepSummary) {
        let sets = enumerate_joint_actions(state, table);
        let mut out = Vec::new();
        let summary = joint_successors(state, &sets, graph, &mut out);
        (out, summary)
    }

    #[test]
    fn test_single_agent_branches_per_target() {
        let graph = line_graph();
        let table = distances(&graph);
        let root = SearchState::initial(&graph, &SearchConfig::new().with_budget(5)).unwrap();

        let (successors, summary) = expand(&root, &graph, &table);
        assert_eq!(summary.generated, 2);
        assert_eq!(summary.collisions, 0);

        // A: cost 2 -> 10 * 3; B: cost 3 -> 20 * 2.
        assert_eq!(successors[0].value_so_far(), 30);
        assert_eq!(successors[0].opened()[0].tick(), 2);
        assert_eq!(successors[1].value_so_far(), 40);
        assert_eq!(successors[1].opened()[0].tick(), 3);
        for s in &successors {
            assert_eq!(s.elapsed(), 1);
        }
    }

    #[test]
    fn test_wait_discharges_busy_ticks() {
        let graph = line_graph();
        let table = distances(&graph);
        let root = SearchState::initial(&graph, &SearchConfig::new().with_budget(5)).unwrap();

        let (successors, _) = expand(&root, &graph, &table);
        let to_b = &successors[1];
        assert_eq!(to_b.agent(AgentIndex::new(0)).busy(), 2);

        let (after, summary) = expand(to_b, &graph, &table);
        assert_eq!(summary.generated, 1);
        assert_eq!(after[0].agent(AgentIndex::new(0)).busy(), 1);
        assert_eq!(after[0].elapsed(), 2);
        assert_eq!(after[0].value_so_far(), to_b.value_so_far());
    }

    #[test]
    fn test_combinations_follow_agent_order() {
        let graph = fork_graph();
        let table = distances(&graph);
        let config = SearchConfig::new().with_agents(2).with_budget(4);
        let root = SearchState::initial(&graph, &config).unwrap();

        let (successors, summary) = expand(&root, &graph, &table);
        assert_eq!(summary.generated, 4);
        assert_eq!(summary.collisions, 2);

        let targets: Vec<Vec<_>> = successors
            .iter()
            .map(|s| s.opened().iter().map(|r| (r.agent().get(), r.node())).collect())
            .collect();
        let (l, r) = (ni(1), ni(2));
        assert_eq!(
            targets,
            vec![
                vec![(0, l)],
                vec![(0, l), (1, r)],
                vec![(0, r), (1, l)],
                vec![(0, r)],
            ]
        );
    }

    #[test]
    fn test_losing_agent_stands_still() {
        let mut builder = GraphBuilder::<u64>::new();
        builder
            .add_node("S", 0, ["T"])
            .add_node("T", 5, Vec::<String>::new())
            .set_start("S");
        let graph = builder.build().unwrap();
        let table = distances(&graph);
        let config = SearchConfig::new().with_agents(2).with_budget(4);
        let root = SearchState::initial(&graph, &config).unwrap();

        let (successors, summary) = expand(&root, &graph, &table);
        assert_eq!(summary.generated, 1);
        assert_eq!(summary.collisions, 1);

        let next = &successors[0];
        assert_eq!(next.opened().len(), 1);
        assert_eq!(next.opened()[0].agent(), AgentIndex::new(0));
        assert_eq!(next.agent(AgentIndex::new(1)).position(), graph.start());
        assert!(next.agent(AgentIndex::new(1)).is_free());
        assert_eq!(next.value_so_far(), 10);
        assert!(next.is_terminal());
    }

    #[test]
    fn test_no_node_is_activated_twice() {
        let graph = valve_network();
        let table = distances(&graph);
        let config = SearchConfig::new().with_agents(2).with_budget(26);
        let root = SearchState::initial(&graph, &config).unwrap();

        let mut frontier = vec![root];
        for _ in 0..4 {
            let mut next = Vec::new();
            for state in &frontier {
                if state.is_terminal() {
                    continue;
                }
                let sets = enumerate_joint_actions(state, &table);
                joint_successors(state, &sets, &graph, &mut next);
            }
            frontier = next;
        }

        assert!(!frontier.is_empty());
        for state in &frontier {
            let mut nodes: Vec<_> = state.opened().iter().map(|r| r.node()).collect();
            let len = nodes.len();
            nodes.sort_unstable();
            nodes.dedup();
            assert_eq!(nodes.len(), len);
            assert_eq!(state.value_so_far(), state.total_value(&graph));
            assert_eq!(
                state.num_candidates() + state.opened().len(),
                graph.valuable_nodes().len()
            );
        }
    }

    #[test]
    fn test_num_combinations() {
        let one: ActionSet = [AgentAction::Idle].into_iter().collect();
        let three: ActionSet = [AgentAction::Wait; 3].into_iter().collect();
        assert_eq!(num_combinations(&[one.clone(), three.clone()]), 3);
        assert_eq!(num_combinations(&[three.clone(), three]), 9);
        assert_eq!(num_combinations(&[]), 1);
    }
}
