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

//! Snapshots of a cooperative search.
//!
//! A `SearchState` is never mutated once handed to the scheduler; every
//! joint step clones its parent and applies the chosen actions to the copy.
//! Outside this crate the state is read-only: all mutation goes through the
//! crate-private `wait`, `activate` and `advance` methods used by the joint
//! step function.

use crate::{config::SearchConfig, error::SearchError};
use fixedbitset::FixedBitSet;
use smallvec::SmallVec;
use spillway_core::num::FlowNumeric;
use spillway_model::{
    graph::Graph,
    index::{AgentIndex, NodeIndex},
    time::{Tick, remaining_ticks},
};

/// Number of agents stored inline before a state spills to the heap.
pub const INLINE_AGENTS: usize = 2;

/// Per-state agent storage.
pub type AgentVec = SmallVec<[Agent; INLINE_AGENTS]>;

/// One cooperating agent: where it stands and how long it is still busy.
///
/// While `busy > 0` the agent is travelling to (or activating) the node it
/// already stands on in the model; it can only wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Agent {
    position: NodeIndex,
    busy: Tick,
}

impl Agent {
    #[inline]
    pub fn new(position: NodeIndex, busy: Tick) -> Self {
        Self { position, busy }
    }

    #[inline]
    pub fn position(&self) -> NodeIndex {
        self.position
    }

    #[inline]
    pub fn busy(&self) -> Tick {
        self.busy
    }

    /// Returns `true` if the agent can choose a new action this tick.
    #[inline]
    pub fn is_free(&self) -> bool {
        self.busy == 0
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Agent(position: {}, busy: {})", self.position, self.busy)
    }
}

/// A node activation: which node, when it becomes active, and by whom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpenedRecord {
    node: NodeIndex,
    tick: Tick,
    agent: AgentIndex,
}

impl OpenedRecord {
    #[inline]
    pub fn new(node: NodeIndex, tick: Tick, agent: AgentIndex) -> Self {
        Self { node, tick, agent }
    }

    #[inline]
    pub fn node(&self) -> NodeIndex {
        self.node
    }

    /// The tick from which the node yields value.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    #[inline]
    pub fn agent(&self) -> AgentIndex {
        self.agent
    }

    /// Value earned by this activation: `rate × (budget − tick)`.
    #[inline]
    pub fn contribution<T>(&self, rate: T, budget: Tick) -> T
    where
        T: FlowNumeric,
    {
        T::contribution(rate, remaining_ticks(budget, self.tick))
    }
}

impl std::fmt::Display for OpenedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {} by {}", self.node, self.tick, self.agent)
    }
}

/// An immutable snapshot of the joint search.
///
/// The candidate set holds the valuable nodes nobody has activated yet; it
/// is indexed by `NodeIndex` over the whole graph. `value_so_far` caches the
/// sum of the contributions of `opened`, which already counts the full
/// remaining budget of every activation, including those that lie in the
/// future of `elapsed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState<T> {
    agents: AgentVec,
    candidates: FixedBitSet,
    opened: Vec<OpenedRecord>,
    value_so_far: T,
    elapsed: Tick,
    budget: Tick,
}

impl<T> SearchState<T>
where
    T: FlowNumeric,
{
    /// Creates the root state: every agent free at the start node, no time
    /// spent, every valuable node a candidate.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config`, so no state exists for a
    /// configuration a search cannot run with.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use spillway_model::graph::GraphBuilder;
    /// # use spillway_search::{config::SearchConfig, state::SearchState};
    /// let mut builder = GraphBuilder::<u64>::new();
    /// builder.add_node("S", 0, ["A"]).add_node("A", 10, ["S"]).set_start("S");
    /// let graph = builder.build().unwrap();
    ///
    /// let config = SearchConfig::new().with_agents(2).with_budget(5);
    /// let root = SearchState::initial(&graph, &config).unwrap();
    /// assert_eq!(root.num_agents(), 2);
    /// assert_eq!(root.num_candidates(), 1);
    /// assert_eq!(root.value_so_far(), 0);
    /// assert!(!root.is_terminal());
    /// ```
    pub fn initial(graph: &Graph<T>, config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;

        let mut candidates = FixedBitSet::with_capacity(graph.num_nodes());
        for node in graph.valuable_nodes() {
            candidates.insert(node.get());
        }

        let agents = (0..config.num_agents())
            .map(|_| Agent::new(graph.start(), 0))
            .collect();

        Ok(Self {
            agents,
            candidates,
            opened: Vec::with_capacity(graph.valuable_nodes().len()),
            value_so_far: T::zero(),
            elapsed: 0,
            budget: config.budget(),
        })
    }

    #[inline]
    pub fn num_agents(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Returns the agent at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..num_agents()`.
    #[inline]
    pub fn agent(&self, index: AgentIndex) -> &Agent {
        debug_assert!(
            index.get() < self.num_agents(),
            "called `SearchState::agent` with agent index out of bounds: the len is {} but the index is {}",
            self.num_agents(),
            index.get()
        );

        &self.agents[index.get()]
    }

    #[inline]
    pub fn elapsed(&self) -> Tick {
        self.elapsed
    }

    #[inline]
    pub fn budget(&self) -> Tick {
        self.budget
    }

    /// Ticks left before the budget runs out.
    #[inline]
    pub fn remaining(&self) -> Tick {
        remaining_ticks(self.budget, self.elapsed)
    }

    /// Valuable nodes not yet activated, as a bit set over node indices.
    #[inline]
    pub fn candidates(&self) -> &FixedBitSet {
        &self.candidates
    }

    /// Iterates over the candidate nodes in ascending index order.
    #[inline]
    pub fn candidate_nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.candidates.ones().map(NodeIndex::new)
    }

    #[inline]
    pub fn num_candidates(&self) -> usize {
        self.candidates.count_ones(..)
    }

    #[inline]
    pub fn is_candidate(&self, node: NodeIndex) -> bool {
        self.candidates.contains(node.get())
    }

    /// Activations in the order they were chosen.
    #[inline]
    pub fn opened(&self) -> &[OpenedRecord] {
        &self.opened
    }

    /// Cached total value of all activations so far.
    #[inline]
    pub fn value_so_far(&self) -> T {
        self.value_so_far
    }

    /// A state is terminal once the budget is spent or nothing is left to
    /// activate.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.elapsed >= self.budget || self.candidates.is_clear()
    }

    /// Recomputes the total value from the activation records.
    ///
    /// Agrees with `value_so_far` for every state derived by the joint step.
    pub fn total_value(&self, graph: &Graph<T>) -> T {
        self.opened.iter().fold(T::zero(), |acc, record| {
            acc.saturating_add_val(record.contribution(graph.rate(record.node()), self.budget))
        })
    }

    /// Discharges one tick of the agent's busy counter.
    #[inline]
    pub(crate) fn wait(&mut self, agent: AgentIndex) {
        let slot = &mut self.agents[agent.get()];
        debug_assert!(slot.busy > 0, "called `SearchState::wait` on a free agent");
        slot.busy = slot.busy.saturating_sub(1);
    }

    /// Sends a free agent to `target` and records its activation.
    ///
    /// The choosing tick is the first of the `cost` ticks, so the agent owes
    /// `cost − 1` more and the node is active from `elapsed + cost`.
    pub(crate) fn activate(&mut self, agent: AgentIndex, target: NodeIndex, cost: Tick, rate: T) {
        debug_assert!(cost > 0, "an activation costs at least one tick");
        debug_assert!(
            self.candidates.contains(target.get()),
            "called `SearchState::activate` with {} which is not a candidate",
            target
        );

        let tick = self.elapsed + cost;
        debug_assert!(
            tick <= self.budget,
            "activation of {} at tick {} lies beyond the budget {}",
            target,
            tick,
            self.budget
        );

        let slot = &mut self.agents[agent.get()];
        slot.position = target;
        slot.busy = cost - 1;

        self.candidates.set(target.get(), false);

        let record = OpenedRecord::new(target, tick, agent);
        self.value_so_far = self
            .value_so_far
            .saturating_add_val(record.contribution(rate, self.budget));
        self.opened.push(record);
    }

    /// Moves the clock forward by exactly one tick.
    #[inline]
    pub(crate) fn advance(&mut self) {
        debug_assert!(
            self.elapsed < self.budget,
            "advanced a state past its budget of {}",
            self.budget
        );
        self.elapsed += 1;
    }
}

impl<T> std::fmt::Display for SearchState<T>
where
    T: FlowNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchState(elapsed: {}/{}, value: {}, opened: {}, candidates: {})",
            self.elapsed,
            self.budget,
            self.value_so_far,
            self.opened.len(),
            self.num_candidates()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::line_graph;

    fn ni(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn ai(i: usize) -> AgentIndex {
        AgentIndex::new(i)
    }

    #[test]
    fn test_initial_state() {
        let graph = line_graph();
        let config = SearchConfig::new().with_budget(5);
        let state = SearchState::initial(&graph, &config).unwrap();

        assert_eq!(state.num_agents(), 1);
        assert_eq!(state.agent(ai(0)).position(), graph.start());
        assert!(state.agent(ai(0)).is_free());
        assert_eq!(state.elapsed(), 0);
        assert_eq!(state.remaining(), 5);
        assert_eq!(state.candidate_nodes().collect::<Vec<_>>(), vec![ni(1), ni(2)]);
        assert!(state.opened().is_empty());
        assert_eq!(state.value_so_far(), 0);
    }

    #[test]
    fn test_initial_rejects_invalid_config() {
        let graph = line_graph();
        let config = SearchConfig::new().with_budget(0);
        assert!(SearchState::initial(&graph, &config).is_err());
    }

    #[test]
    fn test_activation_bookkeeping() {
        let graph = line_graph();
        let config = SearchConfig::new().with_budget(5);
        let mut state = SearchState::initial(&graph, &config).unwrap();

        // S -> A is one edge: cost 2, active from tick 2.
        state.activate(ai(0), ni(1), 2, graph.rate(ni(1)));
        state.advance();

        assert_eq!(state.agent(ai(0)).position(), ni(1));
        assert_eq!(state.agent(ai(0)).busy(), 1);
        assert!(!state.is_candidate(ni(1)));
        assert_eq!(state.opened(), &[OpenedRecord::new(ni(1), 2, ai(0))]);
        assert_eq!(state.value_so_far(), 30);
        assert_eq!(state.total_value(&graph), 30);

        state.wait(ai(0));
        state.advance();
        assert!(state.agent(ai(0)).is_free());
        assert_eq!(state.elapsed(), 2);
    }

    #[test]
    fn test_terminal_when_candidates_are_exhausted() {
        let graph = line_graph();
        let config = SearchConfig::new().with_budget(10);
        let mut state = SearchState::initial(&graph, &config).unwrap();
        state.activate(ai(0), ni(1), 2, graph.rate(ni(1)));
        assert!(!state.is_terminal());
        state.activate(ai(0), ni(2), 2, graph.rate(ni(2)));
        assert!(state.is_terminal());
    }

    #[test]
    fn test_terminal_when_budget_is_spent() {
        let graph = line_graph();
        let config = SearchConfig::new().with_budget(1);
        let mut state = SearchState::initial(&graph, &config).unwrap();
        state.advance();
        assert!(state.is_terminal());
        assert_eq!(state.remaining(), 0);
    }

    #[test]
    fn test_contribution_is_zero_at_budget() {
        let record = OpenedRecord::new(ni(1), 5, ai(0));
        assert_eq!(record.contribution(10u64, 5), 0);
        assert_eq!(record.contribution(10u64, 8), 30);
    }

    #[test]
    fn test_display() {
        let graph = line_graph();
        let state = SearchState::initial(&graph, &SearchConfig::new().with_budget(5)).unwrap();
        assert_eq!(
            format!("{}", state),
            "SearchState(elapsed: 0/5, value: 0, opened: 0, candidates: 2)"
        );
        assert_eq!(
            format!("{}", OpenedRecord::new(ni(2), 4, ai(1))),
            "NodeIndex(2) @ 4 by AgentIndex(1)"
        );
    }
}
