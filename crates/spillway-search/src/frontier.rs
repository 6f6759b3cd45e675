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

//! Round-based frontier search over joint agent actions.
//!
//! The scheduler keeps two sets: *live* states still to be expanded and
//! *idle* states that are terminal. Every round expands each live state by
//! one tick through the joint step function, so all live states share the
//! same elapsed time; successors that are terminal move to the idle set,
//! the rest form the next live set. The run ends when the live set is empty
//! and the idle set is reduced to its best state.
//!
//! Before expansion a round may discard live states:
//!
//! - *bound pruning* drops states whose optimistic projection is strictly
//!   below the incumbent, the best value so far seen in the run. It never
//!   changes the reported value.
//! - *truncation* keeps only the best ranked fraction of an oversized
//!   frontier. It never fires in the first round. Once it discards a state
//!   the outcome is reported as `Truncated`.
//!
//! The incumbent is always witnessed by a live or idle state: a live state's
//! descendants never lose value, so the witness's lineage survives bound
//! pruning. After a truncation the incumbent is recomputed from the
//! survivors. The idle set is therefore never empty at the end of a run.
//!
//! With `parallel` enabled, per-state expansion runs on the rayon pool and
//! the results merge back in frontier order, which makes the outcome
//! identical to a sequential run.

use crate::{
    action::{enumerate_joint_actions, is_stalled},
    aggregate::ResultAggregator,
    bound::optimistic_bound,
    config::{PruningPolicy, SearchConfig},
    error::SearchError,
    monitor::frontier_monitor::{FrontierMonitor, PruneReason},
    result::{SearchOutcome, TerminationReason},
    state::SearchState,
    stats::FrontierStatistics,
    step::{StepSummary, joint_successors},
};
use rayon::prelude::*;
use spillway_core::num::FlowNumeric;
use spillway_model::{distance::DistanceTable, graph::Graph};
use std::cmp::Reverse;
use tracing::{debug, trace};

/// Reusable frontier search engine.
///
/// The live and idle buffers keep their capacity across runs. The idle set
/// of the most recent run stays available through `terminal_states` until
/// the next call to `search`.
#[derive(Debug, Clone)]
pub struct FrontierScheduler<T> {
    live: Vec<SearchState<T>>,
    idle: Vec<SearchState<T>>,
}

impl<T> Default for FrontierScheduler<T>
where
    T: FlowNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrontierScheduler<T>
where
    T: FlowNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            live: Vec::new(),
            idle: Vec::new(),
        }
    }

    /// Creates a scheduler with room for `frontier` live and idle states.
    #[inline]
    pub fn preallocated(frontier: usize) -> Self {
        Self {
            live: Vec::with_capacity(frontier),
            idle: Vec::with_capacity(frontier),
        }
    }

    /// The idle set of the most recent run, in retirement order.
    #[inline]
    pub fn terminal_states(&self) -> &[SearchState<T>] {
        &self.idle
    }

    /// Searches for the best joint schedule on `graph`.
    ///
    /// # Errors
    ///
    /// Returns `SearchError` if `config` is invalid or `distances` lacks a
    /// row for the start or for a valuable node of `graph`. Nothing is
    /// searched in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use spillway_model::{graph::GraphBuilder, distance::DistanceTable};
    /// # use spillway_search::{
    /// #     config::SearchConfig, frontier::FrontierScheduler,
    /// #     monitor::no_op::NoOperationMonitor,
    /// # };
    /// let mut builder = GraphBuilder::<u64>::new();
    /// builder
    ///     .add_node("S", 0, ["A"])
    ///     .add_node("A", 10, ["B"])
    ///     .add_node("B", 20, Vec::<String>::new())
    ///     .set_start("S");
    /// let graph = builder.build().unwrap();
    /// let table = DistanceTable::new(&graph).unwrap();
    ///
    /// let mut scheduler = FrontierScheduler::new();
    /// let config = SearchConfig::new().with_budget(5);
    /// let outcome = scheduler
    ///     .search(&graph, &table, &config, NoOperationMonitor::new())
    ///     .unwrap();
    /// assert_eq!(outcome.value(), 50);
    /// assert!(outcome.is_exact());
    /// ```
    pub fn search<S>(
        &mut self,
        graph: &Graph<T>,
        distances: &DistanceTable,
        config: &SearchConfig,
        mut monitor: S,
    ) -> Result<SearchOutcome<T>, SearchError>
    where
        S: FrontierMonitor<T>,
    {
        config.validate()?;
        check_distance_table(graph, distances)?;
        let root = SearchState::initial(graph, config)?;

        self.reset();
        let session = FrontierSearchSession::new(self, graph, distances, config, &mut monitor);
        Ok(session.run(root))
    }

    /// Clears both sets, keeping their capacity.
    #[inline]
    fn reset(&mut self) {
        self.live.clear();
        self.idle.clear();
    }
}

fn check_distance_table<T>(graph: &Graph<T>, distances: &DistanceTable) -> Result<(), SearchError>
where
    T: FlowNumeric,
{
    let relevant = std::iter::once(graph.start()).chain(graph.valuable_nodes().iter().copied());
    for node in relevant {
        if !distances.contains(node) {
            return Err(SearchError::ForeignDistanceTable(node));
        }
    }
    Ok(())
}

/// What expanding one live state produced.
enum Expansion<T> {
    /// Every agent could only idle; the state retires unchanged.
    Stalled(SearchState<T>),
    Expanded {
        successors: Vec<SearchState<T>>,
        summary: StepSummary,
    },
}

#[inline]
fn expand<T>(state: SearchState<T>, graph: &Graph<T>, distances: &DistanceTable) -> Expansion<T>
where
    T: FlowNumeric,
{
    let action_sets = enumerate_joint_actions(&state, distances);
    if is_stalled(&action_sets) {
        return Expansion::Stalled(state);
    }

    let mut successors = Vec::new();
    let summary = joint_successors(&state, &action_sets, graph, &mut successors);
    Expansion::Expanded {
        successors,
        summary,
    }
}

/// State and logic of a single search run.
struct FrontierSearchSession<'a, T, S>
where
    T: FlowNumeric,
{
    scheduler: &'a mut FrontierScheduler<T>,
    graph: &'a Graph<T>,
    distances: &'a DistanceTable,
    config: &'a SearchConfig,
    monitor: &'a mut S,
    incumbent: T,
    retired_best: T,
    stats: FrontierStatistics,
    start_time: std::time::Instant,
}

impl<'a, T, S> std::fmt::Debug for FrontierSearchSession<'a, T, S>
where
    T: FlowNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrontierSearchSession")
            .field("live", &self.scheduler.live.len())
            .field("idle", &self.scheduler.idle.len())
            .field("incumbent", &self.incumbent)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, S> FrontierSearchSession<'a, T, S>
where
    T: FlowNumeric,
    S: FrontierMonitor<T>,
{
    #[inline]
    fn new(
        scheduler: &'a mut FrontierScheduler<T>,
        graph: &'a Graph<T>,
        distances: &'a DistanceTable,
        config: &'a SearchConfig,
        monitor: &'a mut S,
    ) -> Self {
        Self {
            scheduler,
            graph,
            distances,
            config,
            monitor,
            incumbent: T::zero(),
            retired_best: T::zero(),
            stats: FrontierStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self, root: SearchState<T>) -> SearchOutcome<T> {
        self.monitor
            .on_enter_search(self.graph, self.config, &self.stats);
        debug!(graph = %self.graph, config = %self.config, "frontier search started");

        self.incumbent = root.value_so_far();
        if root.is_terminal() {
            self.retire(root);
        } else {
            self.scheduler.live.push(root);
        }

        let mut round: u64 = 0;
        while !self.scheduler.live.is_empty() {
            self.stats.on_round(self.scheduler.live.len());
            self.monitor
                .on_round(round, &self.scheduler.live, &self.stats);

            if self.config.bound_pruning() {
                self.prune_dominated();
            }
            if round > 0 {
                self.truncate();
            }

            trace!(
                round,
                live = self.scheduler.live.len(),
                idle = self.scheduler.idle.len(),
                incumbent = %self.incumbent,
                "expanding round"
            );
            self.expand_round();
            round += 1;
        }

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        self.finalize_result()
    }

    /// Reduces the idle set and assembles the outcome.
    ///
    /// # Note
    ///
    /// This consumes self.
    fn finalize_result(self) -> SearchOutcome<T> {
        let aggregator = ResultAggregator::new().with_parallel(self.config.parallel());
        let (value, best) = {
            let best = aggregator
                .aggregate(&self.scheduler.idle, self.graph)
                .expect("the frontier always retires at least one state");
            (best.value(), best.state().clone())
        };

        let termination_reason = if self.stats.prunings_truncated > 0 {
            TerminationReason::Truncated {
                states_discarded: self.stats.prunings_truncated,
            }
        } else {
            TerminationReason::OptimalityProven
        };

        debug!(
            value = %value,
            rounds = self.stats.rounds,
            terminal_states = self.stats.terminal_states,
            reason = %termination_reason,
            "frontier search finished"
        );

        SearchOutcome::new(value, best, termination_reason, self.stats)
    }

    /// Drops live states whose optimistic projection is below the incumbent.
    fn prune_dominated(&mut self) {
        let (graph, distances, incumbent) = (self.graph, self.distances, self.incumbent);
        let before = self.scheduler.live.len();
        self.scheduler
            .live
            .retain(|state| optimistic_bound(state, graph, distances) >= incumbent);

        let pruned = before - self.scheduler.live.len();
        if pruned > 0 {
            self.stats.on_pruning_bound(pruned);
            self.monitor
                .on_prune(PruneReason::BoundDominated, pruned, &self.stats);
            trace!(pruned, incumbent = %incumbent, "dropped dominated states");
        }
    }

    /// Applies the configured truncation to an oversized live set.
    fn truncate(&mut self) {
        let policy = self.config.pruning();
        let PruningPolicy::Truncate { ranking, .. } = policy else {
            return;
        };

        let before = self.scheduler.live.len();
        let keep = policy.retained(before);
        if keep >= before {
            return;
        }

        let (graph, distances) = (self.graph, self.distances);
        self.scheduler
            .live
            .sort_by_cached_key(|state| Reverse(ranking.score(state, graph, distances)));
        self.scheduler.live.truncate(keep);

        let discarded = before - keep;
        self.stats.on_truncation(discarded);
        self.monitor
            .on_prune(PruneReason::Truncated, discarded, &self.stats);
        debug!(discarded, kept = keep, ranking = %ranking, "truncated frontier");

        self.incumbent = self
            .scheduler
            .live
            .iter()
            .map(SearchState::value_so_far)
            .fold(self.retired_best, T::max);
    }

    fn expand_round(&mut self) {
        let live = std::mem::take(&mut self.scheduler.live);
        let (graph, distances) = (self.graph, self.distances);

        if self.config.parallel() {
            let expansions: Vec<Expansion<T>> = live
                .into_par_iter()
                .map(|state| expand(state, graph, distances))
                .collect();
            for expansion in expansions {
                self.merge(expansion);
            }
        } else {
            for state in live {
                let expansion = expand(state, graph, distances);
                self.merge(expansion);
            }
        }
    }

    fn merge(&mut self, expansion: Expansion<T>) {
        match expansion {
            Expansion::Stalled(state) => {
                self.stats.on_stalled();
                self.retire(state);
            }
            Expansion::Expanded {
                successors,
                summary,
            } => {
                self.stats.on_state_expanded();
                self.stats.on_successors_generated(summary.generated);
                self.stats.on_collisions(summary.collisions);
                for successor in successors {
                    self.accept(successor);
                }
            }
        }
    }

    /// Updates the incumbent and routes a successor into the next live set
    /// or the idle set.
    #[inline]
    fn accept(&mut self, state: SearchState<T>) {
        if state.value_so_far() > self.incumbent {
            self.incumbent = state.value_so_far();
            self.stats.on_improvement();
            self.monitor.on_improvement(&state, &self.stats);
        }

        if state.is_terminal() {
            self.retire(state);
        } else {
            self.scheduler.live.push(state);
        }
    }

    #[inline]
    fn retire(&mut self, state: SearchState<T>) {
        self.stats.on_terminal();
        self.retired_best = self.retired_best.max(state.value_so_far());
        self.monitor.on_terminal(&state, &self.stats);
        self.scheduler.idle.push(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        monitor::no_op::NoOperationMonitor,
        testing::{distances, fork_graph, line_graph, random_graph, valve_network},
    };
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use spillway_model::{graph::GraphBuilder, index::AgentIndex};

    fn solve(graph: &Graph<u64>, config: &SearchConfig) -> SearchOutcome<u64> {
        let table = distances(graph);
        FrontierScheduler::new()
            .search(graph, &table, config, NoOperationMonitor::new())
            .unwrap()
    }

    /// `S - X1 - ... - X(d-1) - T(rate)`: the target `d` edges away.
    fn chain_graph(d: usize, rate: u64) -> Graph<u64> {
        let mut builder = GraphBuilder::new();
        for i in 0..d {
            builder.add_node(format!("X{}", i), 0, [format!("X{}", i + 1)]);
        }
        builder.add_node(format!("X{}", d), rate, Vec::<String>::new());
        builder.set_start("X0");
        builder.build().unwrap()
    }

    #[derive(Default)]
    struct CountingMonitor {
        entered: usize,
        exited: usize,
        rounds: u64,
        terminals: u64,
        improvements: u64,
        pruned: [usize; 2],
        last_improvement: u64,
    }

    impl FrontierMonitor<u64> for CountingMonitor {
        fn name(&self) -> &str {
            "CountingMonitor"
        }

        fn on_enter_search(
            &mut self,
            _graph: &Graph<u64>,
            _config: &SearchConfig,
            _statistics: &FrontierStatistics,
        ) {
            self.entered += 1;
        }

        fn on_round(&mut self, round: u64, live: &[SearchState<u64>], _s: &FrontierStatistics) {
            assert_eq!(round, self.rounds);
            assert!(live.iter().all(|s| s.elapsed() as u64 == round));
            self.rounds += 1;
        }

        fn on_prune(&mut self, reason: PruneReason, count: usize, _s: &FrontierStatistics) {
            match reason {
                PruneReason::BoundDominated => self.pruned[0] += count,
                PruneReason::Truncated => self.pruned[1] += count,
            }
        }

        fn on_terminal(&mut self, state: &SearchState<u64>, _s: &FrontierStatistics) {
            assert!(state.is_terminal() || state.remaining() > 0);
            self.terminals += 1;
        }

        fn on_improvement(&mut self, state: &SearchState<u64>, _s: &FrontierStatistics) {
            assert!(state.value_so_far() > self.last_improvement);
            self.last_improvement = state.value_so_far();
            self.improvements += 1;
        }

        fn on_exit_search(&mut self, _s: &FrontierStatistics) {
            self.exited += 1;
        }
    }

    #[test]
    fn test_line_scenario() {
        let graph = line_graph();
        let outcome = solve(&graph, &SearchConfig::new().with_budget(5));

        assert_eq!(outcome.value(), 50);
        assert!(outcome.is_exact());
        let schedule: Vec<_> = outcome
            .schedule()
            .iter()
            .map(|r| (r.node().get(), r.tick()))
            .collect();
        assert_eq!(schedule, vec![(1, 2), (2, 4)]);
    }

    #[test]
    fn test_nothing_reachable_in_time_yields_zero() {
        let graph = line_graph();
        // A could only become active at the very last tick.
        assert_eq!(solve(&graph, &SearchConfig::new().with_budget(2)).value(), 0);

        let outcome = solve(&graph, &SearchConfig::new().with_budget(1));
        assert_eq!(outcome.value(), 0);
        assert_eq!(outcome.statistics().stalled_states, 1);
        assert_eq!(outcome.statistics().terminal_states, 1);
        assert!(outcome.schedule().is_empty());
    }

    #[test]
    fn test_no_valuable_nodes_yields_zero() {
        let mut builder = GraphBuilder::<u64>::new();
        builder.add_node("S", 0, ["X"]).add_node("X", 0, ["S"]).set_start("S");
        let graph = builder.build().unwrap();
        let outcome = solve(&graph, &SearchConfig::new().with_agents(2));
        assert_eq!(outcome.value(), 0);
        assert_eq!(outcome.statistics().rounds, 0);
    }

    #[test]
    fn test_single_target_value() {
        for d in 1..5 {
            for budget in (d as u32 + 1)..(d as u32 + 7) {
                let graph = chain_graph(d, 7);
                let outcome = solve(&graph, &SearchConfig::new().with_budget(budget));
                let expected = 7 * (budget as u64).saturating_sub(d as u64 + 1);
                assert_eq!(outcome.value(), expected, "d = {}, budget = {}", d, budget);
            }
        }
    }

    #[test]
    fn test_shared_target_is_activated_once() {
        let graph = chain_graph(1, 5);
        let table = distances(&graph);
        let mut scheduler = FrontierScheduler::new();
        let config = SearchConfig::new().with_agents(2).with_budget(4);
        let outcome = scheduler
            .search(&graph, &table, &config, NoOperationMonitor::new())
            .unwrap();

        assert_eq!(outcome.value(), 10);
        assert_eq!(outcome.schedule().len(), 1);
        assert_eq!(outcome.schedule()[0].agent(), AgentIndex::new(0));
        assert!(outcome.statistics().collisions > 0);
        for state in scheduler.terminal_states() {
            assert!(state.opened().len() <= 1);
        }
    }

    #[test]
    fn test_valve_network_single_agent() {
        let graph = valve_network();
        let config = SearchConfig::new().with_budget(30);
        let outcome = solve(&graph, &config);
        assert_eq!(outcome.value(), 1651);
        assert!(outcome.is_exact());

        let exhaustive = solve(&graph, &config.with_bound_pruning(false));
        assert_eq!(exhaustive.value(), 1651);
        assert_eq!(exhaustive.statistics().prunings_bound, 0);
        assert!(outcome.statistics().states_expanded <= exhaustive.statistics().states_expanded);
    }

    #[test]
    fn test_valve_network_two_agents() {
        let graph = valve_network();
        let config = SearchConfig::new().with_agents(2).with_budget(26);
        let outcome = solve(&graph, &config);
        assert_eq!(outcome.value(), 1707);
        assert!(outcome.is_exact());
        assert_eq!(outcome.best_state().total_value(&graph), 1707);

        let mut nodes: Vec<_> = outcome.schedule().iter().map(|r| r.node()).collect();
        nodes.sort_unstable();
        assert_eq!(nodes, graph.valuable_nodes().to_vec());
        for record in outcome.schedule() {
            assert!(record.tick() <= 26);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let graph = valve_network();
        for agents in 1..=2 {
            let config = SearchConfig::new().with_agents(agents).with_budget(20);
            let sequential = solve(&graph, &config);
            let parallel = solve(&graph, &config.with_parallel(true));

            assert_eq!(sequential.value(), parallel.value());
            assert_eq!(sequential.schedule(), parallel.schedule());
            let (s, p) = (sequential.statistics(), parallel.statistics());
            assert_eq!(s.states_expanded, p.states_expanded);
            assert_eq!(s.terminal_states, p.terminal_states);
            assert_eq!(s.prunings_bound, p.prunings_bound);
        }
    }

    #[test]
    fn test_bound_pruning_preserves_the_optimum() {
        let mut rng = StdRng::seed_from_u64(0x0F10_0D);
        for _ in 0..15 {
            let num_nodes = rng.random_range(3..9);
            let graph = random_graph(&mut rng, num_nodes);
            let agents = rng.random_range(1..3);
            let budget = rng.random_range(1..10);
            let config = SearchConfig::new().with_agents(agents).with_budget(budget);

            let pruned = solve(&graph, &config);
            let exhaustive = solve(&graph, &config.with_bound_pruning(false));
            assert_eq!(pruned.value(), exhaustive.value());
            assert!(pruned.is_exact());
        }
    }

    #[test]
    fn test_budget_monotonicity_single_agent() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            let num_nodes = rng.random_range(3..10);
            let graph = random_graph(&mut rng, num_nodes);
            let mut previous = 0;
            for budget in 1..14 {
                let value = solve(&graph, &SearchConfig::new().with_budget(budget)).value();
                assert!(value >= previous, "budget {} lost value", budget);
                previous = value;
            }
        }
    }

    #[test]
    fn test_second_agent_never_hurts() {
        let valves = valve_network();
        let one = solve(&valves, &SearchConfig::new().with_budget(26)).value();
        let two = solve(&valves, &SearchConfig::new().with_agents(2).with_budget(26)).value();
        assert!(two >= one);

        let fork = fork_graph();
        let one = solve(&fork, &SearchConfig::new().with_budget(4)).value();
        let two = solve(&fork, &SearchConfig::new().with_agents(2).with_budget(4)).value();
        assert_eq!((one, two), (14, 24));
    }

    #[test]
    fn test_truncation_is_flagged_and_never_beats_exact() {
        let graph = valve_network();
        let exact = SearchConfig::new().with_agents(2).with_budget(26);
        let truncated = exact
            .with_bound_pruning(false)
            .with_pruning(PruningPolicy::truncate(10, 0.5));

        let reference = solve(&graph, &exact);
        let outcome = solve(&graph, &truncated);

        assert!(outcome.value() <= reference.value());
        assert!(!outcome.is_exact());
        let discarded = outcome.statistics().prunings_truncated;
        assert!(discarded > 0);
        assert!(outcome.statistics().truncation_events > 0);
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Truncated {
                states_discarded: discarded
            }
        );
    }

    #[test]
    fn test_truncation_with_bound_pruning_still_finishes() {
        let graph = valve_network();
        for ratio in [0.01, 0.3, 0.9] {
            let config = SearchConfig::new()
                .with_agents(2)
                .with_budget(26)
                .with_pruning(PruningPolicy::truncate(5, ratio));
            let outcome = solve(&graph, &config);
            assert!(outcome.value() <= 1707);
            assert!(outcome.value() > 0);
        }
    }

    #[test]
    fn test_truncation_below_threshold_stays_exact() {
        let graph = valve_network();
        let config = SearchConfig::new()
            .with_budget(30)
            .with_pruning(PruningPolicy::truncate(usize::MAX, 0.5));
        let outcome = solve(&graph, &config);
        assert_eq!(outcome.value(), 1651);
        assert_eq!(outcome.termination_reason(), &TerminationReason::OptimalityProven);
    }

    #[test]
    fn test_monitor_sees_consistent_events() {
        let graph = valve_network();
        let table = distances(&graph);
        let config = SearchConfig::new()
            .with_agents(2)
            .with_budget(14)
            .with_pruning(PruningPolicy::truncate(20, 0.8));
        let mut monitor = CountingMonitor::default();

        let outcome = FrontierScheduler::new()
            .search(&graph, &table, &config, &mut monitor)
            .unwrap();
        let stats = outcome.statistics();

        assert_eq!((monitor.entered, monitor.exited), (1, 1));
        assert_eq!(monitor.rounds, stats.rounds);
        assert_eq!(monitor.terminals, stats.terminal_states);
        assert_eq!(monitor.improvements, stats.improvements);
        assert_eq!(monitor.pruned[0] as u64, stats.prunings_bound);
        assert_eq!(monitor.pruned[1] as u64, stats.prunings_truncated);
        assert!(monitor.last_improvement >= outcome.value() || !outcome.is_exact());
    }

    #[test]
    fn test_scheduler_is_reusable() {
        let graph = valve_network();
        let table = distances(&graph);
        let config = SearchConfig::new().with_budget(30);
        let mut scheduler = FrontierScheduler::preallocated(64);

        let first = scheduler
            .search(&graph, &table, &config, NoOperationMonitor::new())
            .unwrap();
        let idle_after_first = scheduler.terminal_states().len();
        let second = scheduler
            .search(&graph, &table, &config, NoOperationMonitor::new())
            .unwrap();

        assert_eq!(first.value(), second.value());
        assert_eq!(first.schedule(), second.schedule());
        assert_eq!(idle_after_first, scheduler.terminal_states().len());
    }

    #[test]
    fn test_invalid_config_is_rejected_before_searching() {
        let graph = line_graph();
        let table = distances(&graph);
        let mut scheduler = FrontierScheduler::new();
        let err = scheduler
            .search(
                &graph,
                &table,
                &SearchConfig::new().with_agents(0),
                NoOperationMonitor::new(),
            )
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidBudget(_)));
        assert!(scheduler.terminal_states().is_empty());
    }

    #[test]
    fn test_foreign_distance_table_is_rejected() {
        let graph = valve_network();
        let other = distances(&line_graph());
        let err = FrontierScheduler::new()
            .search(&graph, &other, &SearchConfig::new(), NoOperationMonitor::new())
            .unwrap_err();
        assert!(matches!(err, SearchError::ForeignDistanceTable(_)));
    }
}
